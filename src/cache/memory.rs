use crate::cache::clock::{Clock, SystemClock};
use crate::cache::keys::CacheKey;
use crate::cache::store::{CacheStore, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    payload: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if now >= deadline)
    }
}

/// 進程內快取存儲
///
/// 過期項目在讀取時移除。適合單機執行與測試，
/// 多進程共享請使用 [`crate::redis::RedisCacheStore`]。
pub struct MemoryStore<C: Clock = SystemClock> {
    entries: DashMap<String, Entry>,
    clock: C,
}

impl MemoryStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// 未過期的項目數
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries.iter().filter(|e| !e.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 剩餘存活時間；不存在或已過期為 `None`，不過期的項目回傳 `Some(None)`
    pub fn ttl_remaining(&self, key: &CacheKey) -> Option<Option<Duration>> {
        let now = self.clock.now();
        let entry = self.entries.get(key.as_str())?;
        if entry.is_expired(now) {
            return None;
        }
        Some(entry.expires_at.map(|deadline| deadline - now))
    }

    /// 直接讀取原始位元組，不經過 trait
    pub fn peek(&self, key: &CacheKey) -> Option<Vec<u8>> {
        let now = self.clock.now();
        self.entries
            .get(key.as_str())
            .filter(|e| !e.is_expired(now))
            .map(|e| e.payload.clone())
    }
}

#[async_trait]
impl<C: Clock> CacheStore for MemoryStore<C> {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, StoreError> {
        let now = self.clock.now();

        let expired = match self.entries.get(key.as_str()) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.payload.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            // 讀取與移除之間可能已被覆寫，只移除仍過期的項目
            self.entries
                .remove_if(key.as_str(), |_, entry| entry.is_expired(now));
            debug!("記憶體快取項目已過期: {}", key);
        }

        Ok(None)
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        // 超出 Instant 可表示範圍的 TTL 視為不過期
        let expires_at = ttl.and_then(|ttl| self.clock.now().checked_add(ttl));
        self.entries.insert(
            key.as_str().to_string(),
            Entry {
                payload: value,
                expires_at,
            },
        );
        Ok(())
    }
}
