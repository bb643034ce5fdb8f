use async_trait::async_trait;
use finance_dashboard::cache::{FetchThroughCache, ManualClock, MemoryStore};
use finance_dashboard::domain_types::{Category, MarketData};
use finance_dashboard::market_data::{FetchError, MarketDataFetcher};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

/// 回傳固定資料並記錄每個類別被抓取次數的資料源
pub struct StaticFetcher {
    responses: HashMap<Category, MarketData>,
    calls: Mutex<HashMap<Category, usize>>,
}

impl StaticFetcher {
    pub fn msft() -> Self {
        let responses = [
            (Category::Logo, json!({ "url": "https://storage.googleapis.com/iex/api/logos/MSFT.png" })),
            (
                Category::CompanyInfo,
                json!({
                    "companyName": "Microsoft Corporation",
                    "industry": "Software",
                    "description": "Microsoft develops and licenses software.",
                    "CEO": "Satya Nadella"
                }),
            ),
            (
                Category::News,
                json!([{
                    "headline": "Microsoft beats estimates",
                    "source": "Reuters",
                    "datetime": 1_650_000_000_000i64,
                    "url": "https://example.com/news/1",
                    "summary": "Cloud growth continues.",
                    "image": "https://example.com/news/1.png"
                }]),
            ),
            (Category::Stats, json!({ "peRatio": 35.2, "revenue": 198_270_000_000.0 })),
            (Category::Fundamentals, json!([])),
            (Category::Dividends, json!([{ "paymentDate": "2022-06-09", "amount": 0.62 }])),
        ];

        Self {
            responses: responses.into_iter().collect(),
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn calls(&self, category: Category) -> usize {
        self.calls.lock().unwrap().get(&category).copied().unwrap_or(0)
    }
}

#[async_trait]
impl MarketDataFetcher for StaticFetcher {
    async fn fetch(&self, symbol: &str, category: Category) -> Result<MarketData, FetchError> {
        *self.calls.lock().unwrap().entry(category).or_insert(0) += 1;
        if symbol != "MSFT" {
            return Err(FetchError::InvalidSymbol(symbol.to_string()));
        }
        self.responses
            .get(&category)
            .cloned()
            .ok_or_else(|| FetchError::MalformedResponse(format!("no fixture for {}", category)))
    }
}

pub type TestCache = FetchThroughCache<MemoryStore<ManualClock>, StaticFetcher>;

pub fn setup() -> (TestCache, Arc<MemoryStore<ManualClock>>, Arc<StaticFetcher>, ManualClock) {
    let clock = ManualClock::new();
    let store = Arc::new(MemoryStore::with_clock(clock.clone()));
    let fetcher = Arc::new(StaticFetcher::msft());
    let cache = FetchThroughCache::new(store.clone(), fetcher.clone());
    (cache, store, fetcher, clock)
}
