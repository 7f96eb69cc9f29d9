//! 状态 DTO
//!
//! 健康检查、存活检查和授权查询的响应结构。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 健康检查响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"status": {"status": "healthy"}}))]
pub struct HealthResponse {
    pub status: BTreeMap<String, String>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        let mut status = BTreeMap::new();
        status.insert("status".to_string(), "healthy".to_string());
        Self { status }
    }
}

/// 存活检查响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"alive": true}))]
pub struct LivenessResponse {
    pub alive: bool,
}

/// 授权查询响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "user_id": "123e4567-e89b-12d3-a456-426614174000",
    "username": "user1"
}))]
pub struct AuthorizationResponse {
    /// 当前用户 ID
    pub user_id: String,
    /// 当前用户名
    pub username: String,
}
