use crate::cache::keys::CacheKey;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// 快取存儲錯誤
#[derive(Error, Debug)]
pub enum StoreError {
    /// 存儲無法連線或操作失敗，不可視為未命中
    #[error("快取存儲不可用: {0}")]
    Unavailable(String),
}

/// 快取存儲接口
///
/// 值為已序列化的位元組，`set` 總是整筆覆寫。
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// 讀取尚未過期的值，不存在或已過期時回傳 `None`
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, StoreError>;

    /// 寫入值；有 `ttl` 時經過該時間後不可讀，否則不自動過期
    async fn set(
        &self,
        key: &CacheKey,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: CacheStore> CacheStore for Arc<S> {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key).await
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        (**self).set(key, value, ttl).await
    }
}
