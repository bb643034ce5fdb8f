use crate::domain_types::{Category, MarketData};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// 外部行情資料源錯誤
#[derive(Error, Debug)]
pub enum FetchError {
    /// 網路層失敗（連線、逾時）
    #[error("行情資料源網路錯誤: {0}")]
    Network(String),

    /// 額度用盡或被限流
    #[error("行情資料源限流: {0}")]
    RateLimited(String),

    /// 代碼不存在
    #[error("無效的股票代碼: {0}")]
    InvalidSymbol(String),

    /// 回應無法解析
    #[error("行情資料回應格式錯誤: {0}")]
    MalformedResponse(String),

    /// 基礎 URL 無法組成請求
    #[error("行情資料源端點無效: {0}")]
    InvalidEndpoint(String),

    /// 其他非成功 HTTP 狀態
    #[error("行情資料源回應 HTTP {status}: {message}")]
    Http { status: u16, message: String },
}

impl FetchError {
    /// 是否可能在稍後重試成功
    ///
    /// 只提供分類，快取層不做重試。
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Network(_) | FetchError::RateLimited(_) => true,
            FetchError::Http { status, .. } => *status >= 500,
            FetchError::InvalidSymbol(_)
            | FetchError::MalformedResponse(_)
            | FetchError::InvalidEndpoint(_) => false,
        }
    }
}

/// 行情資料抓取接口
#[async_trait]
pub trait MarketDataFetcher: Send + Sync + 'static {
    /// 抓取指定代碼與類別的資料
    async fn fetch(&self, symbol: &str, category: Category) -> Result<MarketData, FetchError>;
}

#[async_trait]
impl<F: MarketDataFetcher> MarketDataFetcher for Arc<F> {
    async fn fetch(&self, symbol: &str, category: Category) -> Result<MarketData, FetchError> {
        (**self).fetch(symbol, category).await
    }
}
