use once_cell::sync::OnceCell;
use config::ConfigError;
use std::path::Path;
use tracing::{warn, debug};
use crate::config::types::ApplicationConfig;
use crate::config::loader::{ConfigLoader, Environment};
use crate::config::validation::Validator;

// 全局配置實例
static CONFIG: OnceCell<ApplicationConfig> = OnceCell::new();

/// 獲取已初始化的應用程序配置
pub fn get_config() -> Option<&'static ApplicationConfig> {
    CONFIG.get()
}

/// 初始化配置（在應用程序啟動時調用）
pub fn init_config() -> Result<&'static ApplicationConfig, ConfigError> {
    if let Some(existing) = CONFIG.get() {
        warn!("配置已經被初始化，跳過重複初始化");
        return Ok(existing);
    }

    let app_config = ApplicationConfig::load_from_env()?;
    Ok(CONFIG.get_or_init(|| app_config))
}

/// ApplicationConfig 加載方法實現
impl ApplicationConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::from_source(ConfigLoader::load(env)?)
    }

    /// 從指定目錄與環境加載配置
    pub fn load_from_dir(config_dir: &Path, env: Environment) -> Result<Self, ConfigError> {
        Self::from_source(ConfigLoader::load_from_dir(config_dir, env)?)
    }

    fn from_source(source: config::Config) -> Result<Self, ConfigError> {
        let app_config: ApplicationConfig = source.try_deserialize()?;

        // 缺少權杖或連線設定時無法提供服務，直接回報
        app_config
            .validate()
            .map_err(|err| ConfigError::Message(format!("配置驗證失敗: {}", err)))?;
        debug!("配置驗證通過");

        Ok(app_config)
    }
}
