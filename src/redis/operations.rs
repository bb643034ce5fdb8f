//! Redis操作模組
//!
//! 將 Redis 連接池包裝為快取存儲。

pub mod cache;

pub use cache::*;
