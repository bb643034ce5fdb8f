//! 行情資料源模組
//!
//! 抓取接口與 IEX Cloud HTTP 實作。

pub mod fetcher;
pub mod iex;

pub use fetcher::{FetchError, MarketDataFetcher};
pub use iex::IexClient;
