use crate::cache::keys::CacheKey;
use crate::cache::locks::KeyLocks;
use crate::cache::metrics::{CacheMetrics, MetricType};
use crate::cache::stats::{CacheStats, StatsSnapshot};
use crate::cache::store::{CacheStore, StoreError};
use crate::cache::ttl::TtlTable;
use crate::config::types::CacheConfig;
use crate::domain_types::{Category, MarketData, UnknownCategory, View};
use crate::market_data::fetcher::{FetchError, MarketDataFetcher};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

/// 讀穿快取錯誤
#[derive(Error, Debug)]
pub enum FetchThroughError {
    /// 存儲無法使用，請求失敗而非視為未命中
    #[error("快取存儲錯誤: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// 外部資料源失敗，不重試也不回退
    #[error("行情資料抓取失敗: {0}")]
    Fetch(#[from] FetchError),

    /// 抓取結果無法序列化
    #[error("行情資料序列化失敗: {0}")]
    Serialization(String),

    /// 資料無法轉換為呼叫端要求的型別
    #[error("{category} 資料無法轉換: {message}")]
    Decode { category: Category, message: String },
}

enum Lookup {
    Hit(MarketData),
    Absent,
    Corrupt,
}

/// 讀穿（cache-aside）快取
///
/// 先查存儲，未命中才呼叫資料源，成功後依類別 TTL 寫回。
/// 存儲與資料源由建構時注入。
pub struct FetchThroughCache<S: CacheStore, F: MarketDataFetcher> {
    store: Arc<S>,
    fetcher: Arc<F>,
    ttl: TtlTable,
    locks: Option<KeyLocks>,
    stats: CacheStats,
}

impl<S: CacheStore, F: MarketDataFetcher> FetchThroughCache<S, F> {
    /// 使用預設 TTL 表並啟用單一抓取鎖
    pub fn new(store: Arc<S>, fetcher: Arc<F>) -> Self {
        Self {
            store,
            fetcher,
            ttl: TtlTable::default(),
            locks: Some(KeyLocks::new()),
            stats: CacheStats::new(),
        }
    }

    /// 依配置建立，TTL 覆寫中出現未知類別時失敗
    pub fn from_config(
        store: Arc<S>,
        fetcher: Arc<F>,
        config: &CacheConfig,
    ) -> Result<Self, UnknownCategory> {
        let ttl = TtlTable::from_overrides(&config.ttl_overrides_secs)?;
        Ok(Self::new(store, fetcher)
            .with_ttl_table(ttl)
            .with_single_flight(config.single_flight))
    }

    pub fn with_ttl_table(mut self, ttl: TtlTable) -> Self {
        self.ttl = ttl;
        self
    }

    /// 關閉後同一鍵的並發未命中可能各自抓取，後寫入者覆蓋
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.locks = enabled.then(KeyLocks::new);
        self
    }

    pub fn ttl_for(&self, category: Category) -> Option<Duration> {
        self.ttl.ttl_for(category)
    }

    pub fn ttl_table(&self) -> &TtlTable {
        &self.ttl
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// 取得資料：命中直接回傳，未命中則抓取並寫回
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        symbol: &str,
        category: Category,
    ) -> Result<MarketData, FetchThroughError> {
        let key = CacheKey::new(symbol, category);

        let outcome = match self.lookup(&key, category).await? {
            Lookup::Hit(data) => return Ok(self.hit(&key, category, data)),
            other => other,
        };

        let guard = match &self.locks {
            Some(locks) => Some(locks.acquire(&key).await),
            None => None,
        };

        // 等鎖期間其他請求可能已寫入
        let outcome = if guard.is_some() {
            match self.lookup(&key, category).await? {
                Lookup::Hit(data) => return Ok(self.hit(&key, category, data)),
                other => other,
            }
        } else {
            outcome
        };

        if matches!(outcome, Lookup::Corrupt) {
            self.stats.record_corrupt();
            CacheMetrics::record(category, MetricType::Corrupt);
        }
        self.stats.record_miss();
        CacheMetrics::record(category, MetricType::Miss);
        debug!("快取未命中，向資料源抓取: {}", key);

        self.fetch_and_store(symbol, category, &key).await
    }

    /// 取得資料並轉換為指定型別
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        symbol: &str,
        category: Category,
    ) -> Result<T, FetchThroughError> {
        let data = self.get(symbol, category).await?;
        serde_json::from_value(data).map_err(|e| FetchThroughError::Decode {
            category,
            message: e.to_string(),
        })
    }

    /// 依畫面順序取得所有類別，遇到第一個錯誤即中止
    pub async fn get_view(
        &self,
        symbol: &str,
        view: View,
    ) -> Result<Vec<(Category, MarketData)>, FetchThroughError> {
        let mut results = Vec::with_capacity(view.categories().len());
        for category in view.categories() {
            let data = self.get(symbol, *category).await?;
            results.push((*category, data));
        }
        Ok(results)
    }

    fn hit(&self, key: &CacheKey, category: Category, data: MarketData) -> MarketData {
        self.stats.record_hit();
        CacheMetrics::record(category, MetricType::Hit);
        debug!("快取命中: {}", key);
        data
    }

    async fn lookup(&self, key: &CacheKey, category: Category) -> Result<Lookup, StoreError> {
        let payload = match self.store.get(key).await {
            Ok(payload) => payload,
            Err(e) => {
                error!("快取讀取失敗 [{}]: {}", key, e);
                CacheMetrics::record(category, MetricType::StoreError { operation: "get" });
                return Err(e);
            }
        };

        let Some(bytes) = payload else {
            return Ok(Lookup::Absent);
        };

        match serde_json::from_slice(&bytes) {
            Ok(data) => Ok(Lookup::Hit(data)),
            Err(e) => {
                // 損壞的項目視為未命中，重新抓取後整筆覆寫
                warn!("快取值反序列化失敗 [{}]: {}", key, e);
                Ok(Lookup::Corrupt)
            }
        }
    }

    async fn fetch_and_store(
        &self,
        symbol: &str,
        category: Category,
        key: &CacheKey,
    ) -> Result<MarketData, FetchThroughError> {
        let started = Instant::now();
        let data = match self.fetcher.fetch(symbol, category).await {
            Ok(data) => data,
            Err(e) => {
                self.stats.record_fetch_failure();
                CacheMetrics::record(category, MetricType::FetchError);
                warn!("行情資料抓取失敗 [{}]: {}", key, e);
                return Err(e.into());
            }
        };
        CacheMetrics::record_fetch_latency(category, started.elapsed());
        self.stats.record_fetch();
        CacheMetrics::record(category, MetricType::Fetch);

        let payload = serde_json::to_vec(&data)
            .map_err(|e| FetchThroughError::Serialization(e.to_string()))?;
        let ttl = self.ttl.ttl_for(category);

        if let Err(e) = self.store.set(key, payload, ttl).await {
            error!("快取寫入失敗 [{}]: {}", key, e);
            CacheMetrics::record(category, MetricType::StoreError { operation: "set" });
            return Err(e.into());
        }

        debug!("快取寫入成功: {} (ttl: {:?})", key, ttl);
        Ok(data)
    }
}
