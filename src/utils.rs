// utils.rs - 公共工具模組
//
// 提供數值格式化與時間轉換等通用函數，供顯示層使用。

pub mod format;
pub mod time_utils;

pub use format::format_number;
pub use time_utils::{timestamp_ms_to_datetime, timestamp_ms_to_iso};
