use crate::domain_types::Category;
use metrics::{counter, histogram};
use std::time::Duration;

/// 監控指標命名空間
pub const METRIC_NAMESPACE: &str = "dashboard_cache";

/// 監控指標類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Hit,
    Miss,
    Fetch,
    FetchError,
    StoreError { operation: &'static str },
    Corrupt,
}

/// 快取監控指標記錄器
///
/// 只透過 `metrics` 門面記錄，未安裝 recorder 時為空操作。
pub struct CacheMetrics;

impl CacheMetrics {
    /// 記錄快取指標
    ///
    /// # Arguments
    /// * `category` - 資料類別
    /// * `metric_type` - 指標類型
    pub fn record(category: Category, metric_type: MetricType) {
        let category = category.name();
        match metric_type {
            MetricType::Hit => {
                counter!(format!("{}.hit", METRIC_NAMESPACE), "category" => category)
                    .increment(1);
            }
            MetricType::Miss => {
                counter!(format!("{}.miss", METRIC_NAMESPACE), "category" => category)
                    .increment(1);
            }
            MetricType::Fetch => {
                counter!(format!("{}.fetch", METRIC_NAMESPACE), "category" => category)
                    .increment(1);
            }
            MetricType::FetchError => {
                counter!(
                    format!("{}.fetch_error", METRIC_NAMESPACE),
                    "category" => category
                )
                .increment(1);
            }
            MetricType::StoreError { operation } => {
                counter!(
                    format!("{}.store_error", METRIC_NAMESPACE),
                    "operation" => operation,
                    "category" => category
                )
                .increment(1);
            }
            MetricType::Corrupt => {
                counter!(format!("{}.corrupt", METRIC_NAMESPACE), "category" => category)
                    .increment(1);
            }
        }
    }

    /// 記錄外部資料源延遲
    pub fn record_fetch_latency(category: Category, duration: Duration) {
        histogram!(
            format!("{}.fetch_latency_ms", METRIC_NAMESPACE),
            "category" => category.name()
        )
        .record(duration.as_secs_f64() * 1000.0);
    }
}
