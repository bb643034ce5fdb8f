use crate::domain_types::category::Category;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 儀表板畫面
///
/// 每個畫面對應一組有序的資料類別。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Overview,
    Fundamentals,
    BalanceSheet,
    CashFlow,
    IncomeStatement,
    News,
    Ownership,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("未知的畫面: {0}")]
pub struct UnknownView(pub String);

impl View {
    pub const ALL: [View; 7] = [
        View::Overview,
        View::Fundamentals,
        View::BalanceSheet,
        View::CashFlow,
        View::IncomeStatement,
        View::News,
        View::Ownership,
    ];

    /// 畫面需要的資料類別，依顯示順序排列
    pub fn categories(&self) -> &'static [Category] {
        match self {
            View::Overview => &[Category::Logo, Category::CompanyInfo],
            View::Fundamentals => &[Category::Stats, Category::Fundamentals, Category::Dividends],
            View::BalanceSheet => &[Category::BalanceSheet],
            View::CashFlow => &[Category::CashFlow],
            View::IncomeStatement => &[Category::IncomeStatement],
            View::News => &[Category::News],
            View::Ownership => &[
                Category::InstitutionalOwnership,
                Category::InsiderTransactions,
            ],
        }
    }

    /// 命令行使用的名稱
    pub fn slug(&self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::Fundamentals => "fundamentals",
            View::BalanceSheet => "balance-sheet",
            View::CashFlow => "cash-flow",
            View::IncomeStatement => "income-statement",
            View::News => "news",
            View::Ownership => "ownership",
        }
    }

    /// 側邊欄顯示名稱
    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Fundamentals => "Fundamentals",
            View::BalanceSheet => "Balance Sheet",
            View::CashFlow => "Cash Flow",
            View::IncomeStatement => "Income Statement",
            View::News => "News",
            View::Ownership => "Ownership",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        View::ALL
            .iter()
            .copied()
            .find(|v| v.slug() == normalized)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}
