//! 错误处理模块
//!
//! 定义应用程序的错误类型，以及错误到 HTTP 响应的映射。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::dto::{ErrorResponse, ForbiddenResponse, PromptTooLongResponse, UnauthorizedResponse};
use crate::security::validation::ValidationError;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 请求载荷校验失败
    #[error("Payload validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// 认证错误
    #[error("Unauthorized: {0}")]
    Authentication(String),

    /// 授权错误
    #[error("Forbidden: {0}")]
    Authorization(String),

    /// 提示词超出模型上下文窗口
    #[error("Prompt is too long: {0}")]
    PromptTooLong(String),

    /// 语言模型后端错误
    #[error("{response}: {cause}")]
    Backend { response: String, cause: String },

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 构造后端错误
    pub fn backend(response: impl Into<String>, cause: impl Into<String>) -> Self {
        AppError::Backend {
            response: response.into(),
            cause: cause.into(),
        }
    }

    /// HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Authorization(_) => StatusCode::FORBIDDEN,
            AppError::PromptTooLong(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// Axum response implementation for AppError
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AppError::Validation(err) => {
                let body = ErrorResponse::new("Invalid request payload", err.to_string())
                    .with_detail("field", err.field())
                    .with_detail("code", err.code());
                (status, Json(body)).into_response()
            }
            AppError::Authentication(message) => {
                (status, Json(UnauthorizedResponse::new(format!("Unauthorized: {message}"))))
                    .into_response()
            }
            AppError::Authorization(message) => {
                (status, Json(ForbiddenResponse::new(message))).into_response()
            }
            AppError::PromptTooLong(cause) => {
                (status, Json(PromptTooLongResponse::new(cause))).into_response()
            }
            AppError::Backend { response, cause } => {
                (status, Json(ErrorResponse::new(response, cause))).into_response()
            }
            other => {
                let body = ErrorResponse::new("Internal server error", other.to_string());
                (status, Json(body)).into_response()
            }
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
