//! IEX Cloud 行情資料客戶端
//!
//! 每個資料類別對應一個 REST 端點，回應以 JSON 原樣交給快取層。
//! 客戶端不做重試，失敗會被分類為 [`FetchError`] 回傳。
//!
//! # 使用範例
//!
//! ```rust,ignore
//! use finance_dashboard::market_data::IexClient;
//!
//! let client = IexClient::new(&config.market_data)?;
//! let logo = client.fetch("MSFT", Category::Logo).await?;
//! ```

use crate::config::types::MarketDataConfig;
use crate::domain_types::{Category, MarketData};
use crate::market_data::fetcher::{FetchError, MarketDataFetcher};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

/// IEX Cloud 客戶端
#[derive(Clone, Debug)]
pub struct IexClient {
    client: reqwest::Client,
    base_url: Url,
    token: String,
    news_count: u32,
    dividends_range: String,
}

impl IexClient {
    /// 依配置建立客戶端
    pub fn new(config: &MarketDataConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FetchError::Network(format!("HTTP 客戶端初始化失敗: {}", e)))?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)
                .map_err(|e| FetchError::InvalidEndpoint(format!("{}: {}", config.base_url, e)))?,
            token: config.token.clone(),
            news_count: config.news_count,
            dividends_range: config.dividends_range.clone(),
        })
    }

    /// 類別對應的端點路徑段，代號保持原樣
    fn path_segments(&self, symbol: &str, category: Category) -> Vec<String> {
        let news_count = self.news_count.to_string();

        match category {
            Category::Logo => stock_path(symbol, &["logo"]),
            Category::CompanyInfo => stock_path(symbol, &["company"]),
            Category::News => stock_path(symbol, &["news", "last", &news_count]),
            Category::Stats => stock_path(symbol, &["advanced-stats"]),
            Category::Fundamentals => vec![
                "time-series".to_string(),
                "fundamentals".to_string(),
                symbol.to_string(),
                "quarterly".to_string(),
            ],
            Category::Dividends => stock_path(symbol, &["dividends", &self.dividends_range]),
            Category::BalanceSheet => stock_path(symbol, &["balance-sheet"]),
            Category::CashFlow => stock_path(symbol, &["cash-flow"]),
            Category::IncomeStatement => stock_path(symbol, &["income"]),
            Category::InstitutionalOwnership => stock_path(symbol, &["institutional-ownership"]),
            Category::InsiderTransactions => stock_path(symbol, &["insider-transactions"]),
        }
    }

    /// 類別對應的端點路徑（未編碼）
    pub fn endpoint(&self, symbol: &str, category: Category) -> String {
        format!("/{}", self.path_segments(symbol, category).join("/"))
    }

    /// 完整請求 URL，代號作為單一路徑段進行百分比編碼
    pub fn url(&self, symbol: &str, category: Category) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(self.path_segments(symbol, category));
        Ok(url)
    }

    fn classify_status(status: StatusCode, symbol: &str, body: String) -> FetchError {
        match status {
            StatusCode::NOT_FOUND => FetchError::InvalidSymbol(symbol.to_string()),
            StatusCode::TOO_MANY_REQUESTS | StatusCode::PAYMENT_REQUIRED => {
                FetchError::RateLimited(body)
            }
            other => FetchError::Http {
                status: other.as_u16(),
                message: body,
            },
        }
    }
}

fn stock_path(symbol: &str, tail: &[&str]) -> Vec<String> {
    let mut segments = vec!["stock".to_string(), symbol.to_string()];
    segments.extend(tail.iter().map(|s| s.to_string()));
    segments
}

#[async_trait]
impl MarketDataFetcher for IexClient {
    async fn fetch(&self, symbol: &str, category: Category) -> Result<MarketData, FetchError> {
        let url = self.url(symbol, category)?;
        debug!(symbol = symbol, category = %category, "請求行情資料: {}", url.path());

        let response = self
            .client
            .get(url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(symbol = symbol, category = %category, status = status.as_u16(), "行情資料源回應失敗");
            return Err(Self::classify_status(status, symbol, body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::MalformedResponse(e.to_string()))
    }
}
