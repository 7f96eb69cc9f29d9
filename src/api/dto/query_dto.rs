//! 查询 DTO
//!
//! 定义查询相关的请求和响应数据结构。
//!
//! `*Payload` 类型是未经校验的原始请求体，所有字段均可缺失；
//! 校验通过后转换为对应的强类型结构。

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::summarizer::RagChunk;
use crate::security::session_id::ConversationId;

/// 原始查询请求
///
/// 附件按原样保留为 JSON 值，逐项形状检查交给校验器，
/// 以便错误能定位到具体下标。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueryRequestPayload {
    pub query: Option<String>,
    pub conversation_id: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub attachments: Option<Vec<serde_json::Value>>,
}

/// 查询附件
///
/// 随查询一起从 UI 发送的附加内容，例如日志或配置片段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(examples(
    json!({
        "attachment_type": "log",
        "content_type": "text/plain",
        "content": "this is attachment"
    }),
    json!({
        "attachment_type": "configuration",
        "content_type": "application/yaml",
        "content": "foo: bar"
    })
))]
pub struct Attachment {
    /// 附件类型，如 "log"、"configuration"
    pub attachment_type: String,
    /// MIME 内容类型
    pub content_type: String,
    /// 附件内容
    pub content: String,
}

/// 查询请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(example = json!({
    "query": "write a deployment yaml for the mongodb image",
    "conversation_id": "123e4567-e89b-12d3-a456-426614174000",
    "provider": "openai",
    "model": "gpt-3.5-turbo",
    "attachments": [
        {
            "attachment_type": "log",
            "content_type": "text/plain",
            "content": "this is attachment"
        },
        {
            "attachment_type": "configuration",
            "content_type": "application/yaml",
            "content": "foo: bar"
        }
    ]
}))]
pub struct QueryRequest {
    /// 用户问题
    pub query: String,
    /// 会话 ID，缺省时由服务端生成
    pub conversation_id: Option<String>,
    /// LLM 提供方，必须与 model 同时出现
    pub provider: Option<String>,
    /// LLM 模型，必须与 provider 同时出现
    pub model: Option<String>,
    /// 附件列表
    pub attachments: Option<Vec<Attachment>>,
}

/// 引用文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReferencedDocument {
    /// 文档页面 URL
    pub docs_url: String,
    /// 文档页面标题
    pub title: String,
}

impl From<RagChunk> for ReferencedDocument {
    fn from(chunk: RagChunk) -> Self {
        Self {
            docs_url: chunk.doc_url,
            title: chunk.doc_title,
        }
    }
}

/// 查询响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(example = json!({
    "conversation_id": "123e4567-e89b-12d3-a456-426614174000",
    "response": "Operator Lifecycle Manager (OLM) helps users install...",
    "referenced_documents": [
        {
            "docs_url": "https://docs.openshift.com/container-platform/4.15/operators/understanding/olm/olm-understanding-olm.html",
            "title": "Operator Lifecycle Manager concepts and resources"
        }
    ],
    "truncated": false
}))]
pub struct QueryResponse {
    /// 会话 ID
    #[schema(value_type = String)]
    pub conversation_id: ConversationId,
    /// 模型回答
    pub response: String,
    /// 引用文档，按引用顺序排列，不去重
    pub referenced_documents: Vec<ReferencedDocument>,
    /// 会话历史是否因上下文窗口而被截断
    pub truncated: bool,
}
