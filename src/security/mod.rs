//! Security Module
//!
//! Request-facing guards for the Parley API:
//! - Authentication (API Key + JWT)
//! - Session identifier schemes
//! - Payload validation

pub mod auth;
pub mod middleware;
pub mod session_id;
pub mod validation;

pub use auth::{Authenticator, Credentials, Identity};
pub use session_id::{ConversationId, SessionIdScheme, UuidSessionIds};
pub use validation::{PayloadValidator, ValidationError, ValidationResult};
