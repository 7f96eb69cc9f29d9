use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录，未设置时输出到标准输出
    pub log_dir: Option<PathBuf>,
    /// 日志文件名前缀
    pub file_prefix: String,
}

/// API 密钥条目
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ApiKeyEntry {
    /// 密钥
    pub key: String,
    /// 对应的用户 ID
    pub user_id: String,
    /// 对应的用户名
    pub username: String,
}

/// 认证配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// 是否启用认证，关闭时所有请求视为匿名用户
    pub enabled: bool,
    /// 有效 API 密钥
    pub api_keys: Vec<ApiKeyEntry>,
    /// JWT 密钥，为空时不接受 JWT
    pub jwt_secret: String,
    /// JWT 签发者
    pub jwt_issuer: String,
    /// JWT 受众
    pub jwt_audience: String,
}

/// 反馈配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FeedbackConfig {
    /// 是否接收用户反馈
    pub enabled: bool,
}

/// 会话缓存配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// 最多保留的会话数，超出时淘汰最久未访问的会话
    pub max_entries: usize,
    /// 单个会话历史的最大字节数
    pub max_history_bytes: usize,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 认证配置
    pub auth: AuthConfig,
    /// 反馈配置
    pub feedback: FeedbackConfig,
    /// 会话缓存配置
    pub cache: CacheConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
                file_prefix: "parley.log".into(),
            },
            auth: AuthConfig {
                enabled: false,
                api_keys: Vec::new(),
                jwt_secret: String::new(),
                jwt_issuer: "parley".into(),
                jwt_audience: "parley-api".into(),
            },
            feedback: FeedbackConfig { enabled: true },
            cache: CacheConfig {
                max_entries: 1000,
                max_history_bytes: 64 * 1024,
            },
            app_name: "parley".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.auth.enabled = true;
        config
    }
}
