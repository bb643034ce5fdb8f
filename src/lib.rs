// 模組定義
pub mod cache;
pub mod config;
pub mod domain_types;
pub mod market_data;
pub mod redis;
pub mod render;
pub mod utils;
