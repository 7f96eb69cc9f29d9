//! 摘要服务
//!
//! 语言模型编排组件的接口。本服务只负责把请求交给实现方，
//! 并把 [`SummarizerResult`] 转换为对外响应。

use async_trait::async_trait;

use crate::api::dto::{Attachment, QueryRequest};
use crate::error::Result;
use crate::models::summarizer::SummarizerResult;
use crate::security::session_id::ConversationId;

/// 摘要请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizeRequest {
    /// 会话 ID
    pub conversation_id: ConversationId,
    /// 用户问题
    pub query: String,
    /// LLM 提供方
    pub provider: Option<String>,
    /// LLM 模型
    pub model: Option<String>,
    /// 附件
    pub attachments: Vec<Attachment>,
    /// 此前的会话历史
    pub history: Option<String>,
}

impl SummarizeRequest {
    /// 由已校验的查询请求构造
    pub fn new(
        conversation_id: ConversationId,
        request: QueryRequest,
        history: Option<String>,
    ) -> Self {
        Self {
            conversation_id,
            query: request.query,
            provider: request.provider,
            model: request.model,
            attachments: request.attachments.unwrap_or_default(),
            history,
        }
    }
}

/// 摘要服务 trait
///
/// 上下文超出窗口时实现方应返回 [`AppError::PromptTooLong`](crate::error::AppError::PromptTooLong)，
/// 其他后端故障返回 [`AppError::Backend`](crate::error::AppError::Backend)。
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// 为问题生成回答
    async fn summarize(&self, request: &SummarizeRequest) -> Result<SummarizerResult>;
}
