//! API 模块
//!
//! 提供 REST API 支持。

#[cfg(test)]
mod api_tests;
pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod openapi;
pub mod routes;

use crate::api::app_state::AppState;
use crate::security::middleware::auth_middleware;
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    let v1 = Router::new()
        .merge(routes::query_routes::create_query_router())
        .merge(routes::feedback_routes::create_feedback_router());

    let protected = Router::new()
        .nest("/v1", v1)
        .merge(routes::auth_routes::create_auth_router())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(protected)
        .merge(routes::health_routes::create_health_router())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
