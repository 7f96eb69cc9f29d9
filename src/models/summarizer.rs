//! 摘要器结果模型
//!
//! 语言模型编排组件产出的结果，仅在本服务内部使用，
//! 对外响应前会被转换为 [`QueryResponse`](crate::api::dto::QueryResponse)。

use serde::{Deserialize, Serialize};

/// RAG 检索片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagChunk {
    /// 片段文本
    pub text: String,
    /// 来源文档 URL
    pub doc_url: String,
    /// 来源文档标题
    pub doc_title: String,
}

impl RagChunk {
    pub fn new(
        text: impl Into<String>,
        doc_url: impl Into<String>,
        doc_title: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            doc_url: doc_url.into(),
            doc_title: doc_title.into(),
        }
    }
}

/// 摘要器结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizerResult {
    /// 生成的回答
    pub response: String,
    /// 支撑回答的检索片段，保持检索顺序
    pub rag_chunks: Vec<RagChunk>,
    /// 会话历史是否被截断
    pub history_truncated: bool,
}
