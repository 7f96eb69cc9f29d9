//! Health Routes
//!
//! 无需认证的探针与文档端点。

use axum::{Router, routing::get};

use crate::api::app_state::AppState;
use crate::api::openapi::openapi_json;
use crate::observability::{liveness, readiness};

/// 创建健康检查路由器
pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/readiness", get(readiness))
        .route("/liveness", get(liveness))
        .route("/openapi.json", get(openapi_json))
}
