//! Feedback Routes
//!
//! 定义用户反馈相关的 API 路由。

use crate::api::handlers::feedback_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建反馈路由器
pub fn create_feedback_router() -> Router<AppState> {
    Router::new()
        .route("/feedback", post(store_feedback))
        .route("/feedback/status", get(feedback_status))
}
