use axum::{Json, extract::Extension};
use tracing::debug;

use crate::{api::dto::AuthorizationResponse, security::auth::Identity};

/// 返回当前调用者
pub async fn authorized(Extension(identity): Extension<Identity>) -> Json<AuthorizationResponse> {
    debug!(user_id = %identity.user_id, "Authorization check");
    Json(identity.into())
}
