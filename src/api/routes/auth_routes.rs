//! Auth Routes

use crate::api::handlers::auth_handler::*;
use axum::{Router, routing::post};

use crate::api::app_state::AppState;

/// 创建授权查询路由器
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/authorized", post(authorized))
}
