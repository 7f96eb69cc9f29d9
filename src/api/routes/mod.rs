//! Routes 模块
//!
//! 定义 API 路由。

pub mod auth_routes;
pub mod feedback_routes;
pub mod health_routes;
pub mod query_routes;
