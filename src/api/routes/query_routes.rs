//! Query Routes
//!
//! 定义查询相关的 API 路由。

use crate::api::handlers::query_handler::*;
use axum::{Router, routing::post};

use crate::api::app_state::AppState;

/// 创建查询路由器
pub fn create_query_router() -> Router<AppState> {
    Router::new().route("/query", post(query))
}
