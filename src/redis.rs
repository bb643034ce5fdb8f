//! Redis存儲模組
//!
//! 此模組提供Redis連接池管理，以及實作快取存儲接口的Redis後端。

pub mod operations;
pub mod pool;

#[cfg(test)]
pub mod test_config;

pub use operations::cache::RedisCacheStore;
pub use pool::*;
