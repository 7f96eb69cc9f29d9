//! 可观测性模块
//!
//! 提供结构化日志初始化与健康检查端点。

use axum::{Json, response::IntoResponse};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::api::dto::{HealthResponse, LivenessResponse};
use crate::config::config::LoggingConfig;
use crate::error::{AppError, Result};

// ===== Health Check Handlers =====

/// 就绪检查
pub async fn readiness() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// 存活检查
pub async fn liveness() -> impl IntoResponse {
    Json(LivenessResponse { alive: true })
}

// ===== Structured Logging =====

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// 初始化结构化日志
///
/// `RUST_LOG` 优先于配置中的日志级别。配置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 需要在进程生命周期内持有，否则缓冲的日志会丢失。
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true)
        .with_line_number(true);

    let (result, guard) = match (&config.log_dir, config.structured) {
        (Some(dir), structured) => {
            let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let builder = builder.with_ansi(false).with_writer(writer);
            let result = if structured {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            (result, Some(guard))
        }
        (None, true) => (builder.json().try_init(), None),
        (None, false) => (builder.try_init(), None),
    };

    result.map_err(|e| AppError::Internal(format!("Failed to set tracing subscriber: {}", e)))?;
    Ok(guard)
}
