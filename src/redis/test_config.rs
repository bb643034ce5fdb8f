//! 集中化的 Redis 測試配置
//!
//! 提供一致的測試環境配置，支援不同部署環境（本地開發、Docker 容器）

use crate::config::types::RedisConfig;
use crate::redis::pool::{ConnectionPool, RedisPool, RedisPoolError};
use std::sync::Arc;

/// Redis 測試配置建構器
pub struct RedisTestConfig;

impl RedisTestConfig {
    /// 獲取測試用 Redis URL
    ///
    /// 優先級：
    /// 1. REDIS_TEST_URL 環境變數
    /// 2. 檢測 Docker 環境使用 redis:6379
    /// 3. 預設 localhost:6379
    pub fn get_test_url() -> String {
        if let Ok(url) = std::env::var("REDIS_TEST_URL") {
            return url;
        }

        if Self::is_docker_environment() {
            "redis://redis:6379".to_string()
        } else {
            "redis://localhost:6379".to_string()
        }
    }

    /// 檢測是否在 Docker 環境中執行
    fn is_docker_environment() -> bool {
        std::env::var("DOCKER_CONTAINER").is_ok() || std::path::Path::new("/.dockerenv").exists()
    }

    /// 建立標準測試 Redis 配置
    pub fn create_test_config() -> RedisConfig {
        RedisConfig {
            url: Self::get_test_url(),
            pool_size: 3,
            connection_timeout_secs: 2,
            key_prefix: "test:".to_string(),
        }
    }

    /// 建立測試用 Redis 連接池
    pub fn create_test_pool() -> Result<Arc<ConnectionPool>, RedisPoolError> {
        let pool = ConnectionPool::new(Self::create_test_config())?;
        Ok(Arc::new(pool))
    }

    /// Redis 不可用時回傳 `None` 並印出跳過訊息
    pub async fn skip_if_redis_unavailable(test_name: &str) -> Option<Arc<ConnectionPool>> {
        let pool = Self::create_test_pool().ok()?;
        if pool.check_health().await {
            Some(pool)
        } else {
            println!("跳過Redis測試 '{}' - 無Redis環境可用", test_name);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_get_test_url_with_env_var() {
        std::env::set_var("REDIS_TEST_URL", "redis://custom:1234");

        let url = RedisTestConfig::get_test_url();
        assert_eq!(url, "redis://custom:1234");

        std::env::remove_var("REDIS_TEST_URL");
    }

    #[test]
    #[serial]
    fn test_create_test_config() {
        let config = RedisTestConfig::create_test_config();
        assert!(config.url.starts_with("redis://"));
        assert_eq!(config.pool_size, 3);
        assert_eq!(config.key_prefix, "test:");
    }
}
