use crate::domain_types::Category;
use std::fmt;

/// 快取鍵
///
/// 由 `(symbol, category)` 決定，格式為 `{symbol}_{suffix}`。
/// 相同的代碼與類別永遠產生相同的鍵；同一代碼下不同類別的鍵互不相同。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// 建立快取鍵，代碼原樣傳入不做驗證
    pub fn new(symbol: &str, category: Category) -> Self {
        let suffix = category.key_suffix();
        let mut key = String::with_capacity(symbol.len() + 1 + suffix.len());
        key.push_str(symbol);
        key.push('_');
        key.push_str(suffix);
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
