use crate::cache::keys::CacheKey;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// 每個快取鍵一把非同步互斥鎖
///
/// 同一鍵的未命中路徑序列化執行，不同鍵互不阻塞。
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

/// 持有中的鍵鎖，離開作用域時釋放並清理閒置項目
pub struct KeyLockGuard<'a> {
    owner: &'a KeyLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得鍵鎖，必要時等待其他持有者釋放
    pub async fn acquire(&self, key: &CacheKey) -> KeyLockGuard<'_> {
        let mutex = self
            .locks
            .entry(key.as_str().to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = mutex.lock_owned().await;

        KeyLockGuard {
            owner: self,
            key: key.as_str().to_string(),
            guard: Some(guard),
        }
    }

    /// 目前登記的鍵數
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for KeyLockGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // 表中那份 Arc 是唯一引用時代表沒有等待者
        self.owner
            .locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
