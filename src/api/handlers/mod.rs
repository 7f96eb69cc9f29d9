pub mod auth_handler;
pub mod feedback_handler;
pub mod query_handler;

use axum::extract::rejection::JsonRejection;

use crate::error::AppError;
use crate::security::validation::ValidationError;

/// 将请求体解析失败映射为校验错误
pub(crate) fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::Validation(ValidationError::InvalidBody {
        reason: rejection.body_text(),
    })
}
