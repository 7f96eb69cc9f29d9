//! 反馈 DTO
//!
//! 定义用户反馈相关的请求和响应数据结构。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use crate::security::session_id::ConversationId;
use crate::security::validation::{ValidationError, ValidationResult};

/// 原始反馈请求
///
/// `sentiment` 以任意 JSON 数字接收，超出 i64 范围或带小数的值
/// 同样在校验阶段报告为 `InvalidSentiment`。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedbackRequestPayload {
    pub conversation_id: Option<String>,
    pub user_question: Option<String>,
    pub llm_response: Option<String>,
    pub sentiment: Option<serde_json::Number>,
    pub user_feedback: Option<String>,
}

/// 用户满意度：点赞 (1) 或点踩 (-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// 线上传输使用的整数值
    pub fn value(self) -> i64 {
        match self {
            Sentiment::Positive => 1,
            Sentiment::Negative => -1,
        }
    }
}

impl TryFrom<i64> for Sentiment {
    type Error = ValidationError;

    fn try_from(value: i64) -> ValidationResult<Self> {
        match value {
            1 => Ok(Sentiment::Positive),
            -1 => Ok(Sentiment::Negative),
            other => Err(ValidationError::InvalidSentiment {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<&serde_json::Number> for Sentiment {
    type Error = ValidationError;

    fn try_from(value: &serde_json::Number) -> ValidationResult<Self> {
        value
            .as_i64()
            .ok_or_else(|| ValidationError::InvalidSentiment {
                value: value.to_string(),
            })
            .and_then(Sentiment::try_from)
    }
}

impl Serialize for Sentiment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value())
    }
}

/// 反馈请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(example = json!({
    "conversation_id": "12345678-abcd-0000-0123-456789abcdef",
    "user_question": "foo",
    "llm_response": "bar",
    "user_feedback": "Great service!",
    "sentiment": 1
}))]
pub struct FeedbackRequest {
    /// 会话 ID
    #[schema(value_type = String)]
    pub conversation_id: ConversationId,
    /// 用户问题
    pub user_question: String,
    /// 模型回答
    pub llm_response: String,
    /// 满意度，1 或 -1
    #[schema(value_type = Option<i64>)]
    pub sentiment: Option<Sentiment>,
    /// 文字反馈
    pub user_feedback: Option<String>,
}

/// 反馈响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"response": "feedback received"}))]
pub struct FeedbackResponse {
    pub response: String,
}

impl FeedbackResponse {
    pub fn received() -> Self {
        Self {
            response: "feedback received".to_string(),
        }
    }
}

/// 功能状态响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"functionality": "feedback", "status": {"enabled": true}}))]
pub struct StatusResponse {
    /// 功能名称
    pub functionality: String,
    /// 状态键值，值为字符串或布尔
    #[schema(value_type = Object)]
    pub status: BTreeMap<String, serde_json::Value>,
}

impl StatusResponse {
    /// 反馈功能的启用状态
    pub fn feedback(enabled: bool) -> Self {
        let mut status = BTreeMap::new();
        status.insert("enabled".to_string(), serde_json::Value::Bool(enabled));
        Self {
            functionality: "feedback".to_string(),
            status,
        }
    }
}
