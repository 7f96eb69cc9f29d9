//! Security Middleware Module
//!
//! Axum middleware that authenticates the caller and stores the resolved
//! [`Identity`](crate::security::auth::Identity) in the request extensions.

use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::api::app_state::AppState;
use crate::error::AppError;
use crate::security::auth::Credentials;

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let credentials = extract_credentials(&req);

    let identity = state
        .authenticator
        .authenticate(&credentials)
        .await
        .inspect_err(|e| warn!(path = %req.uri().path(), "Authentication failed: {}", e))?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Extract credentials from request headers
fn extract_credentials(req: &Request<Body>) -> Credentials {
    if let Some(auth) = req.headers().get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth.to_str() {
            return Credentials::from_authorization_header(Some(auth_str));
        }
    }

    if let Some(api_key) = req.headers().get("X-API-Key") {
        if let Ok(key) = api_key.to_str() {
            return Credentials::new(Some(key.to_string()), None);
        }
    }

    Credentials::default()
}
