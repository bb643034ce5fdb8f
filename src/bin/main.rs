use anyhow::{anyhow, Context, Result};
use clap::Parser;
use finance_dashboard::cache::FetchThroughCache;
use finance_dashboard::config::{self, LogConfig};
use finance_dashboard::domain_types::View;
use finance_dashboard::market_data::IexClient;
use finance_dashboard::redis::{ConnectionPool, RedisCacheStore};
use finance_dashboard::render::render_results;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// 股票儀表板命令列：讀取一個畫面所需的資料並輸出 JSON
#[derive(Parser, Debug)]
#[command(name = "finance_dashboard", version, about)]
struct Cli {
    /// 股票代號
    #[arg(long, default_value = "MSFT")]
    symbol: String,

    /// 畫面
    #[arg(long, default_value = "overview")]
    view: View,

    /// 輸出原始資料，不做顯示轉換
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化配置
    let app_config = config::init_config().context("無法加載配置")?;

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    let pool = ConnectionPool::new(app_config.redis.clone())
        .context("無法建立 Redis 連接池")?;
    let store = Arc::new(RedisCacheStore::with_prefix(
        pool,
        app_config.redis.key_prefix.clone(),
    ));
    store
        .check_health()
        .await
        .context("Redis 健康檢查失敗")?;

    let fetcher = Arc::new(IexClient::new(&app_config.market_data).context("無法建立 IEX 客戶端")?);

    let cache = FetchThroughCache::from_config(store, fetcher, &app_config.cache)
        .context("TTL 覆寫配置錯誤")?;

    info!(symbol = %cli.symbol, view = %cli.view, "載入畫面資料");
    let results = cache
        .get_view(&cli.symbol, cli.view)
        .await
        .with_context(|| format!("無法取得 {} 的 {} 資料", cli.symbol, cli.view.title()))?;

    let body = render_results(&results, cli.raw);
    println!("{}", serde_json::to_string_pretty(&body)?);

    let stats = cache.stats();
    debug!(
        hits = stats.hits,
        misses = stats.misses,
        fetches = stats.fetches,
        hit_rate = stats.hit_rate(),
        "快取統計"
    );

    Ok(())
}

// 初始化日誌系統，輸出到 stderr 以免混入 JSON 結果
fn init_logging(log_config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_config.level.to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match log_config.format.to_lowercase().as_str() {
        "json" => builder.json().try_init(),
        _ => builder.pretty().try_init(),
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    debug!("日誌系統初始化完成");
    Ok(())
}
