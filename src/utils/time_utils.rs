// time_utils.rs
//
// 提供時間轉換相關的工具函數，資料源以毫秒時間戳回傳時間欄位。

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// 將毫秒時間戳轉換為 DateTime<Utc>，超出範圍時回傳 None
pub fn timestamp_ms_to_datetime(ts: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ts).single()
}

/// 將毫秒時間戳轉換為 ISO-8601 UTC 字串
pub fn timestamp_ms_to_iso(ts: i64) -> Option<String> {
    timestamp_ms_to_datetime(ts).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}
