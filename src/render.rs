//! 顯示轉換
//!
//! 將資料源回傳的原始 JSON 投影為儀表板各畫面實際顯示的欄位。
//! 缺少的欄位以 `null` 呈現，不視為錯誤。

use serde_json::{json, Map, Value};

use crate::domain_types::{Category, MarketData};
use crate::utils::{format_number, timestamp_ms_to_iso};

/// 依類別轉換單筆資料
pub fn render(category: Category, data: &MarketData) -> MarketData {
    match category {
        Category::Logo => json!({ "url": field(data, "url") }),
        Category::CompanyInfo => pick(data, &["companyName", "industry", "description", "CEO"]),
        Category::News => each(data, render_article),
        Category::Stats => render_stats(data),
        Category::Fundamentals => each(data, render_quarter),
        Category::Dividends => each(data, |d| pick(d, &["paymentDate", "amount"])),
        Category::BalanceSheet => data
            .get("balancesheet")
            .and_then(|sheets| sheets.get(0))
            .cloned()
            .unwrap_or(Value::Null),
        Category::CashFlow | Category::IncomeStatement => data.clone(),
        Category::InstitutionalOwnership => {
            each(data, |i| pick(i, &["date", "entityProperName", "reportedHolding"]))
        }
        Category::InsiderTransactions => each(data, |t| {
            pick(t, &["filingDate", "fullName", "transactionShares", "transactionPrice"])
        }),
    }
}

/// 將一個畫面的結果組成以類別名稱為鍵的物件，`raw` 時略過轉換
pub fn render_results(results: &[(Category, MarketData)], raw: bool) -> Value {
    let body: Map<String, Value> = results
        .iter()
        .map(|(category, data)| {
            let value = if raw { data.clone() } else { render(*category, data) };
            (category.name().to_string(), value)
        })
        .collect();
    Value::Object(body)
}

fn field(data: &Value, name: &str) -> Value {
    data.get(name).cloned().unwrap_or(Value::Null)
}

fn formatted(data: &Value, name: &str) -> Value {
    data.get(name)
        .and_then(Value::as_f64)
        .map(|n| Value::String(format_number(n)))
        .unwrap_or(Value::Null)
}

fn pick(data: &Value, names: &[&str]) -> Value {
    let picked: Map<String, Value> = names
        .iter()
        .map(|name| (name.to_string(), field(data, name)))
        .collect();
    Value::Object(picked)
}

fn each(data: &Value, f: impl Fn(&Value) -> Value) -> Value {
    match data.as_array() {
        Some(items) => Value::Array(items.iter().map(f).collect()),
        None => Value::Array(Vec::new()),
    }
}

fn render_article(article: &Value) -> Value {
    let posted_at = article
        .get("datetime")
        .and_then(Value::as_i64)
        .and_then(timestamp_ms_to_iso)
        .map(Value::String)
        .unwrap_or(Value::Null);

    json!({
        "headline": field(article, "headline"),
        "source": field(article, "source"),
        "posted_at": posted_at,
        "url": field(article, "url"),
        "summary": field(article, "summary"),
        "image": field(article, "image"),
    })
}

fn render_stats(stats: &Value) -> Value {
    json!({
        "ratios": pick(stats, &["peRatio", "forwardPERatio", "pegRatio", "priceToSales", "priceToBook"]),
        "revenue": formatted(stats, "revenue"),
        "cash": formatted(stats, "totalCash"),
        "debt": formatted(stats, "currentDebt"),
        "day200MovingAvg": field(stats, "day200MovingAvg"),
        "day50MovingAvg": field(stats, "day50MovingAvg"),
    })
}

fn render_quarter(quarter: &Value) -> Value {
    let label = match (quarter.get("fiscalQuarter"), quarter.get("fiscalYear")) {
        (Some(q), Some(y)) => Value::String(format!("Q{} {}", plain(q), plain(y))),
        _ => Value::Null,
    };

    json!({
        "quarter": label,
        "filingDate": field(quarter, "filingDate"),
        "revenue": formatted(quarter, "revenue"),
        "netIncome": formatted(quarter, "incomeNet"),
    })
}

// 字串值不帶引號輸出
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
