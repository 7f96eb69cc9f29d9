//! Authentication Module
//!
//! Resolves the calling user from request credentials:
//! - API Key authentication
//! - JWT (JSON Web Token) authentication

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::api::dto::AuthorizationResponse;
use crate::config::config::AuthConfig;
use crate::error::{AppError, Result};

/// User ID reported when authentication is disabled
pub const ANONYMOUS_USER_ID: &str = "00000000-0000-0000-0000-000000000000";
/// Username reported when authentication is disabled
pub const ANONYMOUS_USERNAME: &str = "anonymous";

/// Credentials for authentication
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// API key (if provided)
    pub api_key: Option<String>,
    /// JWT token (if provided)
    pub jwt_token: Option<String>,
}

impl Credentials {
    /// Create new credentials
    pub fn new(api_key: Option<String>, jwt_token: Option<String>) -> Self {
        Self { api_key, jwt_token }
    }

    /// Try to extract credentials from Authorization header
    pub fn from_authorization_header(auth_header: Option<&str>) -> Self {
        match auth_header {
            Some(header) => {
                if let Some(key) = header.strip_prefix("ApiKey ") {
                    Self::new(Some(key.to_string()), None)
                } else if let Some(token) = header.strip_prefix("Bearer ") {
                    Self::new(None, Some(token.to_string()))
                } else {
                    Self::default()
                }
            }
            None => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.jwt_token.is_none()
    }
}

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(ANONYMOUS_USER_ID, ANONYMOUS_USERNAME)
    }
}

impl From<Identity> for AuthorizationResponse {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            username: identity.username,
        }
    }
}

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Display name of the user
    pub preferred_username: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Issued at timestamp
    pub iat: usize,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// Authentication trait for different authentication methods
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate credentials and return the caller
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity>;
    /// Get the authenticator type
    fn authenticator_type(&self) -> &'static str;
}

/// Accepts every request as the anonymous user
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuth;

#[async_trait]
impl Authenticator for NoopAuth {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<Identity> {
        Ok(Identity::anonymous())
    }

    fn authenticator_type(&self) -> &'static str {
        "Noop"
    }
}

/// API Key based authentication
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    /// Valid API keys map (key -> identity)
    valid_keys: HashMap<String, Identity>,
}

impl ApiKeyAuth {
    /// Create new API key authenticator
    pub fn new(valid_keys: HashMap<String, Identity>) -> Self {
        Self { valid_keys }
    }

    /// Create a development API key authenticator with default key
    pub fn development() -> Self {
        let mut valid_keys = HashMap::new();
        valid_keys.insert(
            "dev-api-key".to_string(),
            Identity::new("123e4567-e89b-12d3-a456-426614174000", "user1"),
        );
        Self::new(valid_keys)
    }

    pub fn is_empty(&self) -> bool {
        self.valid_keys.is_empty()
    }
}

#[async_trait]
impl Authenticator for ApiKeyAuth {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity> {
        let api_key = credentials
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::Authentication("No API key provided".to_string()))?;

        self.valid_keys
            .get(api_key)
            .cloned()
            .ok_or_else(|| AppError::Authentication("Invalid API key".to_string()))
    }

    fn authenticator_type(&self) -> &'static str {
        "ApiKey"
    }
}

/// JWT based authentication
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtAuth {
    /// Create new JWT authenticator
    pub fn new(secret: &str, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// Create a development JWT authenticator
    pub fn development() -> Self {
        Self::new(
            "dev-secret-change-in-production-min-32-chars",
            "parley",
            "parley-api",
        )
    }

    /// Sign a token for `identity` valid for `expiry_seconds`
    pub fn issue_token(&self, identity: &Identity, expiry_seconds: u64) -> Result<String> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: identity.user_id.clone(),
            preferred_username: identity.username.clone(),
            exp: now.saturating_add(usize::try_from(expiry_seconds).unwrap_or(usize::MAX)),
            iat: now,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.clone()]);
        validation.set_audience(&[self.audience.clone()]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| AppError::Authentication(format!("Invalid JWT token: {}", e)))
    }
}

#[async_trait]
impl Authenticator for JwtAuth {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity> {
        let jwt_token = credentials
            .jwt_token
            .as_ref()
            .ok_or_else(|| AppError::Authentication("No JWT token provided".to_string()))?;

        let claims = self.validate_token(jwt_token)?;
        Ok(Identity::new(claims.sub, claims.preferred_username))
    }

    fn authenticator_type(&self) -> &'static str {
        "JWT"
    }
}

/// Combined authenticator that tries multiple methods
#[derive(Debug, Clone)]
pub struct CombinedAuthenticator {
    api_key_auth: Option<ApiKeyAuth>,
    jwt_auth: Option<JwtAuth>,
}

impl CombinedAuthenticator {
    /// Create new combined authenticator
    pub fn new(api_key_auth: Option<ApiKeyAuth>, jwt_auth: Option<JwtAuth>) -> Self {
        Self {
            api_key_auth,
            jwt_auth,
        }
    }

    /// Create a development combined authenticator
    pub fn development() -> Self {
        Self::new(Some(ApiKeyAuth::development()), Some(JwtAuth::development()))
    }

    /// Create from auth settings
    pub fn from_config(config: &AuthConfig) -> Self {
        let keys: HashMap<String, Identity> = config
            .api_keys
            .iter()
            .map(|entry| {
                (
                    entry.key.clone(),
                    Identity::new(entry.user_id.clone(), entry.username.clone()),
                )
            })
            .collect();
        let api_key_auth = Some(ApiKeyAuth::new(keys)).filter(|auth| !auth.is_empty());

        let jwt_auth = Some(&config.jwt_secret)
            .filter(|secret| !secret.is_empty())
            .map(|secret| JwtAuth::new(secret, config.jwt_issuer.clone(), config.jwt_audience.clone()));

        Self::new(api_key_auth, jwt_auth)
    }
}

#[async_trait]
impl Authenticator for CombinedAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity> {
        if credentials.is_empty() {
            return Err(AppError::Authentication("No auth header found".to_string()));
        }

        if let (Some(api_key_auth), Some(_)) = (&self.api_key_auth, &credentials.api_key) {
            return api_key_auth.authenticate(credentials).await;
        }

        if let (Some(jwt_auth), Some(_)) = (&self.jwt_auth, &credentials.jwt_token) {
            return jwt_auth.authenticate(credentials).await;
        }

        Err(AppError::Authentication(
            "No supported authentication method for the provided credentials".to_string(),
        ))
    }

    fn authenticator_type(&self) -> &'static str {
        "Combined"
    }
}

/// Build the authenticator described by `config`
pub fn create_authenticator(config: &AuthConfig) -> Box<dyn Authenticator> {
    if config.enabled {
        Box::new(CombinedAuthenticator::from_config(config))
    } else {
        Box::new(NoopAuth)
    }
}
