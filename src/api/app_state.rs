use crate::config::AppConfig;
use crate::security::auth::{Authenticator, create_authenticator};
use crate::security::validation::PayloadValidator;
use crate::services::cache::{ConversationCache, InMemoryCache};
use crate::services::summarizer::Summarizer;
use std::sync::Arc;

/// Application state containing all shared services and security components
#[derive(Clone)]
pub struct AppState {
    /// Payload validator for inbound requests
    pub validator: Arc<PayloadValidator>,
    /// Language model backend producing answers
    pub summarizer: Arc<dyn Summarizer>,
    /// Conversation history cache
    pub cache: Arc<dyn ConversationCache>,
    /// Authenticator for API key and JWT validation
    pub authenticator: Arc<dyn Authenticator>,
    /// Whether user feedback is accepted
    pub feedback_enabled: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("validator", &self.validator)
            .field("summarizer", &"Arc<dyn Summarizer>")
            .field("cache", &"Arc<dyn ConversationCache>")
            .field("authenticator", &self.authenticator.authenticator_type())
            .field("feedback_enabled", &self.feedback_enabled)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        validator: PayloadValidator,
        summarizer: Box<dyn Summarizer>,
        cache: Box<dyn ConversationCache>,
        authenticator: Box<dyn Authenticator>,
        feedback_enabled: bool,
    ) -> Self {
        Self {
            validator: Arc::new(validator),
            summarizer: Arc::from(summarizer),
            cache: Arc::from(cache),
            authenticator: Arc::from(authenticator),
            feedback_enabled,
        }
    }

    /// Create state from configuration with the default validator and a bounded in-memory cache
    pub fn from_config(config: &AppConfig, summarizer: Box<dyn Summarizer>) -> Self {
        Self::new(
            PayloadValidator::default(),
            summarizer,
            Box::new(InMemoryCache::from_config(&config.cache)),
            create_authenticator(&config.auth),
            config.feedback.enabled,
        )
    }
}
