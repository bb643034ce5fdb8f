use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 行情資料類別
///
/// 每個類別擁有獨立的快取鍵命名空間與 TTL 策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Logo,                  // 公司標誌
    CompanyInfo,           // 公司資訊
    News,                  // 新聞
    Stats,                 // 關鍵統計
    Fundamentals,          // 季度基本面
    Dividends,             // 股息
    BalanceSheet,          // 資產負債表
    CashFlow,              // 現金流量表
    IncomeStatement,       // 損益表
    InstitutionalOwnership, // 機構持股
    InsiderTransactions,   // 內部人交易
}

/// 無法解析的類別名稱
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("未知的資料類別: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    /// 全部類別，順序固定
    pub const ALL: [Category; 11] = [
        Category::Logo,
        Category::CompanyInfo,
        Category::News,
        Category::Stats,
        Category::Fundamentals,
        Category::Dividends,
        Category::BalanceSheet,
        Category::CashFlow,
        Category::IncomeStatement,
        Category::InstitutionalOwnership,
        Category::InsiderTransactions,
    ];

    /// 類別的標準名稱，用於配置、日誌與監控標籤
    pub fn name(&self) -> &'static str {
        match self {
            Category::Logo => "logo",
            Category::CompanyInfo => "company_info",
            Category::News => "news",
            Category::Stats => "stats",
            Category::Fundamentals => "fundamentals",
            Category::Dividends => "dividends",
            Category::BalanceSheet => "balance_sheet",
            Category::CashFlow => "cash_flow",
            Category::IncomeStatement => "income_statement",
            Category::InstitutionalOwnership => "institutional_ownership",
            Category::InsiderTransactions => "insider_transactions",
        }
    }

    /// 快取鍵後綴
    ///
    /// 與既有 Redis 資料相容，`CompanyInfo` 與 `InstitutionalOwnership`
    /// 使用較短的後綴。任一後綴都不是另一後綴以 `_` 分隔的尾段。
    pub fn key_suffix(&self) -> &'static str {
        match self {
            Category::CompanyInfo => "company",
            Category::InstitutionalOwnership => "institutional",
            other => other.name(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// 接受標準名稱或快取鍵後綴，不分大小寫，`-` 視同 `_`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name() == normalized || c.key_suffix() == normalized)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
