use axum::{
    Json,
    extract::{Extension, State, rejection::JsonRejection},
};
use tracing::{debug, warn};

use crate::{
    api::{
        app_state::AppState,
        dto::{QueryRequestPayload, QueryResponse},
        handlers::invalid_body,
    },
    error::AppError,
    security::{
        auth::Identity,
        validation::{build_query_response, validate_attachment_metadata},
    },
    services::{SummarizeRequest, cache_key},
};

pub async fn query(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<QueryRequestPayload>, JsonRejection>,
) -> Result<Json<QueryResponse>, AppError> {
    let Json(raw) = payload.map_err(invalid_body)?;

    let request = state
        .validator
        .validate_query_request(&raw)
        .inspect_err(|e| warn!(user_id = %identity.user_id, "Rejected query request: {}", e))?;

    if let Some(attachments) = &request.attachments {
        validate_attachment_metadata(attachments)?;
    }

    let conversation_id = state
        .validator
        .resolve_conversation_id(request.conversation_id.as_deref())?;
    debug!(
        user_id = %identity.user_id,
        conversation_id = %conversation_id,
        "Processing query"
    );

    let key = cache_key(&identity.user_id, &conversation_id);
    let history = state.cache.get(&key);
    let question = request.query.clone();

    let summarize_request = SummarizeRequest::new(conversation_id.clone(), request, history);
    let result = state.summarizer.summarize(&summarize_request).await?;

    state.cache.insert_or_append(
        &key,
        &format!("human: {}\nai: {}", question, result.response),
    );

    Ok(Json(build_query_response(conversation_id, result)))
}
