//! OpenAPI 文档
//!
//! 汇总所有 DTO 的 schema 与示例。

use axum::Json;
use utoipa::OpenApi;

use crate::api::dto::*;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Parley service - OpenAPI",
        description = "Conversational query service: questions, feedback and probes"
    ),
    components(schemas(
        Attachment,
        QueryRequest,
        ReferencedDocument,
        QueryResponse,
        FeedbackRequest,
        FeedbackResponse,
        StatusResponse,
        HealthResponse,
        LivenessResponse,
        AuthorizationResponse,
        ErrorResponse,
        PromptTooLongResponse,
        UnauthorizedResponse,
        ForbiddenResponse
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
