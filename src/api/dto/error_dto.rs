//! 错误 DTO
//!
//! 各类错误响应体。`detail` 为字符串映射（通常包含 `response` 与 `cause`），
//! 认证与授权失败时为纯文本。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 错误响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(examples(
    json!({
        "detail": {
            "response": "Error while validation question",
            "cause": "Failed to handle request to https://bam-api.res.ibm.com/v2/text"
        }
    }),
    json!({
        "detail": {
            "response": "Error retrieving conversation history",
            "cause": "Invalid conversation ID 1237-e89b-12d3-a456-426614174000"
        }
    })
))]
pub struct ErrorResponse {
    pub detail: BTreeMap<String, String>,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(response: impl Into<String>, cause: impl Into<String>) -> Self {
        let mut detail = BTreeMap::new();
        detail.insert("response".to_string(), response.into());
        detail.insert("cause".to_string(), cause.into());
        Self { detail }
    }

    /// 添加详细信息
    pub fn with_detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.detail.insert(key.to_string(), value.into());
        self
    }
}

/// 提示词过长响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "detail": {
        "response": "Prompt is too long",
        "cause": "Prompt length exceeds LLM context window limit (8000 tokens)"
    }
}))]
pub struct PromptTooLongResponse {
    pub detail: BTreeMap<String, String>,
}

impl PromptTooLongResponse {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            detail: ErrorResponse::new("Prompt is too long", cause).detail,
        }
    }
}

/// 凭据缺失或无效
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"detail": "Unauthorized: No auth header found"}))]
pub struct UnauthorizedResponse {
    pub detail: String,
}

impl UnauthorizedResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// 无权访问资源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"detail": "Unable to review token"}))]
pub struct ForbiddenResponse {
    pub detail: String,
}

impl ForbiddenResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
