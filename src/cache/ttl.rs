use crate::domain_types::{Category, UnknownCategory};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// 有限期快取的預設存活時間（24 小時）
pub const DAILY_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// 配置允許的最大 TTL 覆寫（秒），約十年
pub const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// 單一類別的 TTL 策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlPolicy {
    /// 寫入後經過指定時間即不可讀
    Expires(Duration),
    /// 不自動過期
    Unbounded,
}

impl TtlPolicy {
    /// 轉為存儲層使用的可選 TTL
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            TtlPolicy::Expires(ttl) => Some(*ttl),
            TtlPolicy::Unbounded => None,
        }
    }

    /// 以秒數表示，0 代表不過期
    pub fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            TtlPolicy::Unbounded
        } else {
            TtlPolicy::Expires(Duration::from_secs(secs))
        }
    }

    /// 預設策略
    ///
    /// 只有 Logo 與 CompanyInfo 設定 24 小時過期，其餘類別不過期。
    /// 這與既有部署的行為一致，需要調整時請透過配置覆寫。
    pub fn default_for(category: Category) -> Self {
        match category {
            Category::Logo | Category::CompanyInfo => TtlPolicy::Expires(DAILY_TTL),
            _ => TtlPolicy::Unbounded,
        }
    }
}

/// 每個類別的 TTL 查找表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlTable {
    policies: BTreeMap<Category, TtlPolicy>,
}

impl Default for TtlTable {
    fn default() -> Self {
        let policies = Category::ALL
            .iter()
            .map(|c| (*c, TtlPolicy::default_for(*c)))
            .collect();
        Self { policies }
    }
}

impl TtlTable {
    /// 在預設表上套用以類別名稱為鍵的秒數覆寫
    pub fn from_overrides(overrides: &HashMap<String, u64>) -> Result<Self, UnknownCategory> {
        let mut table = Self::default();
        for (name, secs) in overrides {
            let category: Category = name.parse()?;
            table = table.with_policy(category, TtlPolicy::from_secs(*secs));
        }
        Ok(table)
    }

    pub fn with_policy(mut self, category: Category, policy: TtlPolicy) -> Self {
        self.policies.insert(category, policy);
        self
    }

    pub fn policy(&self, category: Category) -> TtlPolicy {
        self.policies
            .get(&category)
            .copied()
            .unwrap_or_else(|| TtlPolicy::default_for(category))
    }

    /// 寫入存儲時使用的 TTL
    pub fn ttl_for(&self, category: Category) -> Option<Duration> {
        self.policy(category).as_duration()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, TtlPolicy)> + '_ {
        self.policies.iter().map(|(c, p)| (*c, *p))
    }
}
