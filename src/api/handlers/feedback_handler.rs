use axum::{
    Json,
    extract::{Extension, State, rejection::JsonRejection},
};
use tracing::{info, warn};

use crate::{
    api::{
        app_state::AppState,
        dto::{FeedbackRequestPayload, FeedbackResponse, Sentiment, StatusResponse},
        handlers::invalid_body,
    },
    error::AppError,
    security::auth::Identity,
};

pub async fn store_feedback(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<FeedbackRequestPayload>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, AppError> {
    if !state.feedback_enabled {
        return Err(AppError::Authorization("Feedback is disabled".to_string()));
    }

    let Json(raw) = payload.map_err(invalid_body)?;

    let request = state
        .validator
        .validate_feedback_request(&raw)
        .inspect_err(|e| warn!(user_id = %identity.user_id, "Rejected feedback request: {}", e))?;

    info!(
        user_id = %identity.user_id,
        conversation_id = %request.conversation_id,
        sentiment = ?request.sentiment.map(Sentiment::value),
        has_user_feedback = request.user_feedback.is_some(),
        "Feedback received"
    );

    Ok(Json(FeedbackResponse::received()))
}

pub async fn feedback_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::feedback(state.feedback_enabled))
}
