//! Session Identifier Module
//!
//! Conversation identifiers are opaque to this service: their format is owned
//! by a pluggable [`SessionIdScheme`], and a [`ConversationId`] can only be
//! obtained through one.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::security::validation::{ValidationError, ValidationResult};

/// Format and generation rules for conversation identifiers
pub trait SessionIdScheme: Send + Sync {
    /// Whether `value` is a well-formed identifier under this scheme
    fn is_well_formed(&self, value: &str) -> bool;

    /// Produce a fresh identifier
    fn generate(&self) -> String;
}

/// UUID based identifiers.
///
/// Accepts every textual form the `uuid` crate parses (hyphenated, simple,
/// braced, urn) and generates random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSessionIds;

impl SessionIdScheme for UuidSessionIds {
    fn is_well_formed(&self, value: &str) -> bool {
        Uuid::parse_str(value).is_ok()
    }

    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// A conversation identifier that passed its scheme's format check
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Check `value` against `scheme`
    pub fn parse(value: &str, scheme: &dyn SessionIdScheme) -> ValidationResult<Self> {
        if scheme.is_well_formed(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(ValidationError::MalformedConversationId {
                value: value.to_string(),
            })
        }
    }

    /// Generate a new identifier from `scheme`
    pub fn generate(scheme: &dyn SessionIdScheme) -> Self {
        Self(scheme.generate())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConversationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
