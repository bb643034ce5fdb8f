use crate::config::types::RedisConfig;
use async_trait::async_trait;
use deadpool::managed::QueueMode;
use deadpool_redis::{
    redis::{cmd, RedisError},
    Config, Connection, CreatePoolError, Pool, PoolConfig, PoolError, Runtime, Timeouts,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

/// Redis 連接池錯誤
#[derive(Error, Debug)]
pub enum RedisPoolError {
    /// URL 或池配置無效
    #[error("Redis連接池初始化錯誤: {0}")]
    PoolInitError(String),

    /// 等待或建立連接失敗
    #[error("無法從連接池獲取連接: {0}")]
    GetConnectionError(String),
}

impl From<PoolError> for RedisPoolError {
    fn from(error: PoolError) -> Self {
        RedisPoolError::GetConnectionError(error.to_string())
    }
}

impl From<CreatePoolError> for RedisPoolError {
    fn from(error: CreatePoolError) -> Self {
        RedisPoolError::PoolInitError(error.to_string())
    }
}

/// 快取存儲所需的連接來源
#[async_trait]
pub trait RedisPool: Send + Sync + 'static {
    async fn get_conn(&self) -> Result<Connection, RedisPoolError>;

    /// 以 PING 確認伺服器可用
    async fn check_health(&self) -> bool;
}

/// deadpool-redis 連接池
pub struct ConnectionPool {
    pool: Pool,
}

impl ConnectionPool {
    /// 依配置建立連接池
    ///
    /// 連接在第一次使用時才建立，URL 格式錯誤會在此回報。
    pub fn new(config: RedisConfig) -> Result<Self, RedisPoolError> {
        let timeout = Duration::from_secs(config.connection_timeout_secs);
        let mut cfg = Config::from_url(&config.url);
        cfg.pool = Some(PoolConfig {
            max_size: config.pool_size as usize,
            timeouts: Timeouts {
                wait: Some(timeout),
                create: Some(timeout),
                recycle: Some(Duration::from_secs(60)),
            },
            queue_mode: QueueMode::Fifo,
        });

        let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
        info!("Redis連接池已建立，大小: {}", config.pool_size);

        Ok(Self { pool })
    }
}

#[async_trait]
impl RedisPool for ConnectionPool {
    async fn get_conn(&self) -> Result<Connection, RedisPoolError> {
        let conn = self.pool.get().await.inspect_err(|e| {
            error!("無法從Redis連接池獲取連接: {}", e);
        })?;
        debug!("取得Redis連接");
        Ok(conn)
    }

    async fn check_health(&self) -> bool {
        let mut conn = match self.get_conn().await {
            Ok(conn) => conn,
            Err(_) => return false,
        };

        let pong: Result<String, RedisError> = cmd("PING").query_async(&mut conn).await;
        match pong {
            Ok(reply) => reply == "PONG",
            Err(e) => {
                error!("Redis PING 失敗: {}", e);
                false
            }
        }
    }
}

/// 共享同一個連接池
#[async_trait]
impl RedisPool for Arc<ConnectionPool> {
    async fn get_conn(&self) -> Result<Connection, RedisPoolError> {
        (**self).get_conn().await
    }

    async fn check_health(&self) -> bool {
        (**self).check_health().await
    }
}
