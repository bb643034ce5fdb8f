mod common;

use assert_matches::assert_matches;
use common::setup;
use finance_dashboard::cache::{CacheKey, CacheStore, FetchThroughCache, FetchThroughError, MemoryStore, DAILY_TTL};
use finance_dashboard::config::MarketDataConfig;
use finance_dashboard::domain_types::{Category, View};
use finance_dashboard::market_data::{FetchError, IexClient};
use finance_dashboard::render::render_results;
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_overview_populates_daily_entries() {
    let (cache, store, fetcher, _clock) = setup();

    let results = cache.get_view("MSFT", View::Overview).await.unwrap();
    let categories: Vec<Category> = results.iter().map(|(c, _)| *c).collect();
    assert_eq!(categories, vec![Category::Logo, Category::CompanyInfo]);

    for category in [Category::Logo, Category::CompanyInfo] {
        let key = CacheKey::new("MSFT", category);
        assert_eq!(store.ttl_remaining(&key), Some(Some(DAILY_TTL)));
        assert_eq!(fetcher.calls(category), 1);
    }
    assert!(store.peek(&CacheKey::new("MSFT", Category::Logo)).is_some());

    let body = render_results(&results, false);
    assert_eq!(body["company_info"]["CEO"], "Satya Nadella");
    assert_eq!(body["logo"]["url"], "https://storage.googleapis.com/iex/api/logos/MSFT.png");
}

#[tokio::test]
async fn test_daily_entries_expire_but_news_does_not() {
    let (cache, store, fetcher, clock) = setup();

    cache.get_view("MSFT", View::Overview).await.unwrap();
    cache.get_view("MSFT", View::News).await.unwrap();
    assert_eq!(
        store.ttl_remaining(&CacheKey::new("MSFT", Category::News)),
        Some(None)
    );

    clock.advance(Duration::from_secs(23 * 3600));
    cache.get_view("MSFT", View::Overview).await.unwrap();
    assert_eq!(fetcher.calls(Category::Logo), 1);

    clock.advance(Duration::from_secs(3600));
    cache.get_view("MSFT", View::Overview).await.unwrap();
    cache.get_view("MSFT", View::News).await.unwrap();

    assert_eq!(fetcher.calls(Category::Logo), 2);
    assert_eq!(fetcher.calls(Category::CompanyInfo), 2);
    assert_eq!(fetcher.calls(Category::News), 1);
}

#[tokio::test]
async fn test_preexisting_news_is_served_from_store() {
    let (cache, store, fetcher, _clock) = setup();
    let stale = json!([{ "headline": "older headline" }]);

    store
        .set(
            &CacheKey::new("MSFT", Category::News),
            serde_json::to_vec(&stale).unwrap(),
            None,
        )
        .await
        .unwrap();

    let news = cache.get("MSFT", Category::News).await.unwrap();
    assert_eq!(news, stale);
    assert_eq!(fetcher.calls(Category::News), 0);
}

#[tokio::test]
async fn test_unknown_symbol_is_not_cached() {
    let (cache, store, fetcher, _clock) = setup();

    let err = cache.get("ZZZZ", Category::Logo).await.unwrap_err();
    assert_matches!(err, FetchThroughError::Fetch(FetchError::InvalidSymbol(ref s)) if s == "ZZZZ");
    assert!(store.is_empty());

    cache.get("ZZZZ", Category::Logo).await.unwrap_err();
    assert_eq!(fetcher.calls(Category::Logo), 2);
    assert_eq!(cache.stats().fetch_failures, 2);
}

#[tokio::test]
async fn test_fundamentals_view_renders_stats() {
    let (cache, _store, _fetcher, _clock) = setup();

    let results = cache.get_view("MSFT", View::Fundamentals).await.unwrap();
    let body = render_results(&results, false);

    assert_eq!(body["stats"]["revenue"], "198.27B");
    assert_eq!(body["dividends"][0]["amount"], 0.62);
    assert_eq!(body["fundamentals"], json!([]));
}

#[tokio::test]
async fn test_iex_client_behind_cache_requests_once() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/stock/MSFT/company")
        .match_query(Matcher::UrlEncoded("token".into(), "Tpk_integration".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"companyName":"Microsoft Corporation","CEO":"Satya Nadella"}"#)
        .expect(1)
        .create_async()
        .await;

    let config = MarketDataConfig {
        base_url: server.url(),
        token: "Tpk_integration".to_string(),
        request_timeout_secs: 5,
        news_count: 10,
        dividends_range: "5y".to_string(),
    };
    let fetcher = Arc::new(IexClient::new(&config).unwrap());
    let cache = FetchThroughCache::new(Arc::new(MemoryStore::new()), fetcher);

    let first = cache.get("MSFT", Category::CompanyInfo).await.unwrap();
    let second = cache.get("MSFT", Category::CompanyInfo).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first["companyName"], "Microsoft Corporation");
    mock.assert_async().await;
}
