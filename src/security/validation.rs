//! Request Validation Module
//!
//! Turns raw request payloads into validated request types and shapes
//! summarizer output into query responses.
//!
//! Each payload type has one entry point on [`PayloadValidator`], built from
//! small single-rule checks applied in a fixed order. When a payload breaks
//! several rules, the first rule in that order is the one reported.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::api::dto::{
    Attachment, FeedbackRequest, FeedbackRequestPayload, QueryRequest,
    QueryRequestPayload, QueryResponse, ReferencedDocument, Sentiment,
};
use crate::models::summarizer::SummarizerResult;
use crate::security::session_id::{ConversationId, SessionIdScheme, UuidSessionIds};

/// Attachment types accepted on queries
pub const ATTACHMENT_TYPES: &[&str] = &[
    "alert",
    "api object",
    "configuration",
    "error message",
    "event",
    "log",
    "stack trace",
];

/// Attachment content types accepted on queries
pub const ATTACHMENT_CONTENT_TYPES: &[&str] = &[
    "text/plain",
    "application/json",
    "application/yaml",
    "application/xml",
];

/// Validation error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field '{field}' is missing")]
    MissingField { field: String },

    #[error("LLM {missing} must be specified when the {present} is specified.")]
    ProviderModelMismatch { missing: String, present: String },

    #[error("Attachment at index {index} has a missing or malformed '{field}'")]
    MalformedAttachment { index: usize, field: String },

    #[error("Attachment at index {index} has unsupported {field} '{value}'")]
    UnsupportedAttachment {
        index: usize,
        field: String,
        value: String,
    },

    #[error("Improper conversation ID {value}")]
    MalformedConversationId { value: String },

    #[error("Improper value {value}, needs to be -1 or 1")]
    InvalidSentiment { value: String },

    #[error("Either 'sentiment' or 'user_feedback' must be set")]
    MissingFeedbackSignal,

    #[error("Invalid request body: {reason}")]
    InvalidBody { reason: String },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field } => field.as_str(),
            Self::ProviderModelMismatch { missing, .. } => missing.as_str(),
            Self::MalformedAttachment { .. } => "attachments",
            Self::UnsupportedAttachment { field, .. } => field.as_str(),
            Self::MalformedConversationId { .. } => "conversation_id",
            Self::InvalidSentiment { .. } => "sentiment",
            Self::MissingFeedbackSignal => "user_feedback",
            Self::InvalidBody { .. } => "body",
        }
    }

    /// Stable machine-readable identifier of the violated rule
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::ProviderModelMismatch { .. } => "provider_model_mismatch",
            Self::MalformedAttachment { .. } => "malformed_attachment",
            Self::UnsupportedAttachment { .. } => "unsupported_attachment",
            Self::MalformedConversationId { .. } => "malformed_conversation_id",
            Self::InvalidSentiment { .. } => "invalid_sentiment",
            Self::MissingFeedbackSignal => "missing_feedback_signal",
            Self::InvalidBody { .. } => "invalid_body",
        }
    }
}

/// Validation result type
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Payload validator
///
/// Holds no mutable state; the only collaborator is the session identifier
/// scheme used for conversation ID checks.
#[derive(Clone)]
pub struct PayloadValidator {
    session_ids: Arc<dyn SessionIdScheme>,
}

impl std::fmt::Debug for PayloadValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadValidator")
            .field("session_ids", &"Arc<dyn SessionIdScheme>")
            .finish()
    }
}

impl Default for PayloadValidator {
    fn default() -> Self {
        Self::new(Arc::new(UuidSessionIds))
    }
}

impl PayloadValidator {
    /// Create new validator
    pub fn new(session_ids: Arc<dyn SessionIdScheme>) -> Self {
        Self { session_ids }
    }

    pub fn session_ids(&self) -> &dyn SessionIdScheme {
        self.session_ids.as_ref()
    }

    /// Validate a query request.
    ///
    /// Order: `query` presence, attachment shape (by index), then the
    /// provider/model pairing. Empty provider or model strings count as
    /// absent for the pairing rule but are passed through unchanged.
    pub fn validate_query_request(&self, raw: &QueryRequestPayload) -> ValidationResult<QueryRequest> {
        debug!(
            has_conversation_id = raw.conversation_id.is_some(),
            attachments = raw.attachments.as_ref().map_or(0, Vec::len),
            "Validating query request"
        );

        let query = require("query", raw.query.as_ref())?;
        let attachments = raw
            .attachments
            .as_deref()
            .map(check_attachments)
            .transpose()?;
        check_provider_and_model(raw.provider.as_deref(), raw.model.as_deref())?;

        Ok(QueryRequest {
            query,
            conversation_id: raw.conversation_id.clone(),
            provider: raw.provider.clone(),
            model: raw.model.clone(),
            attachments,
        })
    }

    /// Validate a feedback request.
    ///
    /// Order: conversation ID format, required text fields, sentiment range,
    /// then presence of at least one feedback signal.
    pub fn validate_feedback_request(
        &self,
        raw: &FeedbackRequestPayload,
    ) -> ValidationResult<FeedbackRequest> {
        debug!(
            sentiment = ?raw.sentiment,
            has_user_feedback = raw.user_feedback.is_some(),
            "Validating feedback request"
        );

        let raw_id = require("conversation_id", raw.conversation_id.as_ref())?;
        let conversation_id = ConversationId::parse(&raw_id, self.session_ids())?;
        let user_question = require("user_question", raw.user_question.as_ref())?;
        let llm_response = require("llm_response", raw.llm_response.as_ref())?;
        let sentiment = raw.sentiment.as_ref().map(Sentiment::try_from).transpose()?;

        if sentiment.is_none() && raw.user_feedback.is_none() {
            return Err(ValidationError::MissingFeedbackSignal);
        }

        Ok(FeedbackRequest {
            conversation_id,
            user_question,
            llm_response,
            sentiment,
            user_feedback: raw.user_feedback.clone(),
        })
    }

    /// Resolve the conversation a query belongs to.
    ///
    /// A supplied identifier must be well-formed; an absent one starts a new
    /// conversation with a freshly generated identifier.
    pub fn resolve_conversation_id(&self, supplied: Option<&str>) -> ValidationResult<ConversationId> {
        match supplied {
            Some(value) => ConversationId::parse(value, self.session_ids()),
            None => Ok(ConversationId::generate(self.session_ids())),
        }
    }
}

/// Shape summarizer output into a query response.
///
/// Every rag chunk yields one referenced document, in chunk order. Repeated
/// sources are kept.
pub fn build_query_response(conversation_id: ConversationId, result: SummarizerResult) -> QueryResponse {
    let referenced_documents = result
        .rag_chunks
        .into_iter()
        .map(ReferencedDocument::from)
        .collect();

    QueryResponse {
        conversation_id,
        response: result.response,
        referenced_documents,
        truncated: result.history_truncated,
    }
}

/// Check attachment type and content type against the accepted lists
pub fn validate_attachment_metadata(attachments: &[Attachment]) -> ValidationResult<()> {
    for (index, attachment) in attachments.iter().enumerate() {
        if !ATTACHMENT_TYPES.contains(&attachment.attachment_type.as_str()) {
            return Err(ValidationError::UnsupportedAttachment {
                index,
                field: "attachment_type".to_string(),
                value: attachment.attachment_type.clone(),
            });
        }
        if !ATTACHMENT_CONTENT_TYPES.contains(&attachment.content_type.as_str()) {
            return Err(ValidationError::UnsupportedAttachment {
                index,
                field: "content_type".to_string(),
                value: attachment.content_type.clone(),
            });
        }
    }
    Ok(())
}

fn require(field: &str, value: Option<&String>) -> ValidationResult<String> {
    value.cloned().ok_or_else(|| ValidationError::MissingField {
        field: field.to_string(),
    })
}

fn check_provider_and_model(provider: Option<&str>, model: Option<&str>) -> ValidationResult<()> {
    let provider = provider.filter(|p| !p.is_empty());
    let model = model.filter(|m| !m.is_empty());

    match (provider, model) {
        (None, Some(_)) => Err(ValidationError::ProviderModelMismatch {
            missing: "provider".to_string(),
            present: "model".to_string(),
        }),
        (Some(_), None) => Err(ValidationError::ProviderModelMismatch {
            missing: "model".to_string(),
            present: "provider".to_string(),
        }),
        _ => Ok(()),
    }
}

/// Every entry must be an object whose three fields are strings; anything
/// else is reported against the entry's index.
fn check_attachments(raw: &[Value]) -> ValidationResult<Vec<Attachment>> {
    raw.iter()
        .enumerate()
        .map(|(index, entry)| -> ValidationResult<Attachment> {
            let malformed = |field: &str| ValidationError::MalformedAttachment {
                index,
                field: field.to_string(),
            };
            let object = entry.as_object().ok_or_else(|| malformed("attachment"))?;
            let field = |name: &str| {
                object
                    .get(name)
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .ok_or_else(|| malformed(name))
            };
            Ok(Attachment {
                attachment_type: field("attachment_type")?,
                content_type: field("content_type")?,
                content: field("content")?,
            })
        })
        .collect()
}
