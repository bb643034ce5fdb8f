use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::cache::ttl::MAX_TTL_SECS;
use crate::domain_types::Category;

/// 應用程序配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub log: LogConfig,
    pub redis: RedisConfig,
    pub market_data: MarketDataConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        self.log.validate()?;
        self.redis.validate()?;
        self.market_data.validate()?;
        self.cache.validate()?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::one_of(
            &self.level.to_lowercase(),
            &["trace", "debug", "info", "warn", "error"].iter().map(|s| s.to_string()).collect::<Vec<String>>(),
            "log.level"
        )?;

        ValidationUtils::one_of(
            &self.format.to_lowercase(),
            &["pretty", "json"].iter().map(|s| s.to_string()).collect::<Vec<String>>(),
            "log.format"
        )?;

        Ok(())
    }
}

/// Redis配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
    /// 鍵命名空間前綴，預設為空
    #[serde(default)]
    pub key_prefix: String,
}

impl Validator for RedisConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::has_scheme(&self.url, &["redis", "rediss"], "redis.url")?;
        ValidationUtils::in_range(self.pool_size, 1, 100, "redis.pool_size")?;
        ValidationUtils::in_range(self.connection_timeout_secs, 1, 60, "redis.connection_timeout_secs")?;

        Ok(())
    }
}

/// 行情資料源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    pub base_url: String,
    /// API 權杖，建議以 DASHBOARD__MARKET_DATA__TOKEN 提供
    pub token: String,
    pub request_timeout_secs: u64,
    /// 新聞畫面抓取的篇數
    #[serde(default = "default_news_count")]
    pub news_count: u32,
    /// 股息查詢區間，例如 `5y`
    #[serde(default = "default_dividends_range")]
    pub dividends_range: String,
}

fn default_news_count() -> u32 {
    10
}

fn default_dividends_range() -> String {
    "5y".to_string()
}

impl Validator for MarketDataConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::has_scheme(&self.base_url, &["http", "https"], "market_data.base_url")?;
        ValidationUtils::not_empty(&self.token, "market_data.token")?;
        ValidationUtils::in_range(self.request_timeout_secs, 1, 120, "market_data.request_timeout_secs")?;
        ValidationUtils::in_range(self.news_count, 1, 50, "market_data.news_count")?;
        ValidationUtils::one_of(
            &self.dividends_range.as_str(),
            &["next", "1m", "3m", "6m", "ytd", "1y", "2y", "5y"],
            "market_data.dividends_range"
        )?;

        Ok(())
    }
}

/// 快取配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 同一鍵的並發未命中只抓取一次
    #[serde(default = "default_single_flight")]
    pub single_flight: bool,
    /// 以類別名稱為鍵的 TTL 覆寫（秒），0 代表不過期
    #[serde(default)]
    pub ttl_overrides_secs: HashMap<String, u64>,
}

fn default_single_flight() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            single_flight: default_single_flight(),
            ttl_overrides_secs: HashMap::new(),
        }
    }
}

impl Validator for CacheConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        for (name, secs) in &self.ttl_overrides_secs {
            if name.parse::<Category>().is_err() {
                return Err(ValidationError::InvalidValue(format!(
                    "cache.ttl_overrides_secs 含未知類別: {}",
                    name
                )));
            }
            ValidationUtils::in_range(
                *secs,
                0,
                MAX_TTL_SECS,
                &format!("cache.ttl_overrides_secs.{}", name),
            )?;
        }

        Ok(())
    }
}
