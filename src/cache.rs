//! 讀穿快取模組
//!
//! 快取鍵、TTL 策略、存儲接口與讀穿協調器。

pub mod clock;
pub mod fetch_through;
pub mod keys;
pub mod locks;
pub mod memory;
pub mod metrics;
pub mod stats;
pub mod store;
pub mod ttl;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use fetch_through::{FetchThroughCache, FetchThroughError};
pub use keys::CacheKey;
pub use locks::KeyLocks;
pub use memory::MemoryStore;
pub use metrics::{CacheMetrics, MetricType, METRIC_NAMESPACE};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::{CacheStore, StoreError};
pub use ttl::{TtlPolicy, TtlTable, DAILY_TTL, MAX_TTL_SECS};
