use async_trait::async_trait;
use deadpool_redis::redis::{cmd, AsyncCommands};
use std::time::Duration;
use tracing::{debug, error};

use crate::cache::keys::CacheKey;
use crate::cache::store::{CacheStore, StoreError};
use crate::cache::ttl::MAX_TTL_SECS;
use crate::redis::pool::{RedisPool, RedisPoolError};

impl From<RedisPoolError> for StoreError {
    fn from(error: RedisPoolError) -> Self {
        StoreError::Unavailable(error.to_string())
    }
}

const MAX_TTL_MILLIS: u64 = MAX_TTL_SECS * 1000;

/// Redis 快取存儲
///
/// 值以原始位元組存放；有 TTL 時使用 `SET .. PX`，否則使用不帶過期的 `SET`。
pub struct RedisCacheStore<P: RedisPool> {
    pool: P,
    key_prefix: String,
}

impl<P: RedisPool> RedisCacheStore<P> {
    /// 創建新的快取存儲，鍵不加前綴
    pub fn new(pool: P) -> Self {
        Self::with_prefix(pool, "")
    }

    /// 所有鍵加上命名空間前綴
    pub fn with_prefix(pool: P, key_prefix: impl Into<String>) -> Self {
        Self {
            pool,
            key_prefix: key_prefix.into(),
        }
    }

    /// 生成實際寫入 Redis 的鍵
    fn prefix_key(&self, key: &CacheKey) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// 啟動時確認 Redis 可用，失敗即回報而不等到第一次讀取
    pub async fn check_health(&self) -> Result<(), StoreError> {
        if self.pool.check_health().await {
            Ok(())
        } else {
            Err(StoreError::Unavailable("Redis PING 失敗".to_string()))
        }
    }

    /// 毫秒 TTL，不足一毫秒的值進位為一毫秒
    ///
    /// Redis 以 i64 毫秒計算到期時間，超過配置上限的值截斷為上限。
    fn ttl_millis(ttl: Duration) -> u64 {
        u64::try_from(ttl.as_millis())
            .unwrap_or(u64::MAX)
            .clamp(1, MAX_TTL_MILLIS)
    }
}

#[async_trait]
impl<P: RedisPool> CacheStore for RedisCacheStore<P> {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, StoreError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.pool.get_conn().await?;

        match conn.get::<_, Option<Vec<u8>>>(&prefixed_key).await {
            Ok(Some(value)) => {
                debug!("快取命中: {}", prefixed_key);
                Ok(Some(value))
            }
            Ok(None) => {
                debug!("快取未命中: {}", prefixed_key);
                Ok(None)
            }
            Err(e) => {
                error!("快取讀取失敗: {}", e);
                Err(StoreError::Unavailable(e.to_string()))
            }
        }
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.pool.get_conn().await?;

        let result = if let Some(ttl) = ttl {
            cmd("SET")
                .arg(&prefixed_key)
                .arg(value)
                .arg("PX")
                .arg(Self::ttl_millis(ttl))
                .query_async::<()>(&mut conn)
                .await
        } else {
            conn.set::<_, _, ()>(&prefixed_key, value).await
        };

        match result {
            Ok(()) => {
                debug!("快取設置成功: {} (ttl: {:?})", prefixed_key, ttl);
                Ok(())
            }
            Err(e) => {
                error!("快取設置失敗: {}", e);
                Err(StoreError::Unavailable(e.to_string()))
            }
        }
    }
}
