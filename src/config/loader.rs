use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "PARLEY_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（后者覆盖前者）：
    /// 1. 开发环境默认值
    /// 2. ./config.yaml
    /// 3. `PARLEY_` 前缀的环境变量，嵌套字段用 `__` 分隔
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.logging.level.trim().is_empty() {
            return Err(ConfigValidationError::MissingLogLevel);
        }

        if config.auth.enabled && config.auth.api_keys.is_empty() && config.auth.jwt_secret.is_empty()
        {
            return Err(ConfigValidationError::NoAuthMethod);
        }

        if config.cache.max_entries == 0 {
            return Err(ConfigValidationError::InvalidCacheSize);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("Server port must be greater than 0")]
    InvalidPort,

    #[error("Log level is not configured")]
    MissingLogLevel,

    #[error("Authentication is enabled but neither API keys nor a JWT secret are configured")]
    NoAuthMethod,

    #[error("Conversation cache must hold at least one entry")]
    InvalidCacheSize,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.yaml")
}
