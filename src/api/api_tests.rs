#[cfg(test)]
mod router_tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    use crate::api::app_state::AppState;
    use crate::api::create_router;
    use crate::config::AppConfig;
    use crate::config::config::ApiKeyEntry;
    use crate::error::{AppError, Result};
    use crate::models::summarizer::{RagChunk, SummarizerResult};
    use crate::security::auth::{CombinedAuthenticator, NoopAuth};
    use crate::security::validation::PayloadValidator;
    use crate::services::cache::InMemoryCache;
    use crate::services::summarizer::{SummarizeRequest, Summarizer};

    const VALID_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    /// Answers with fixed chunks and records every request it sees
    #[derive(Default)]
    struct RecordingSummarizer {
        seen: Arc<Mutex<Vec<SummarizeRequest>>>,
    }

    #[async_trait]
    impl Summarizer for RecordingSummarizer {
        async fn summarize(&self, request: &SummarizeRequest) -> Result<SummarizerResult> {
            self.seen.lock().await.push(request.clone());
            Ok(SummarizerResult {
                response: format!("answer to {}", request.query),
                rag_chunks: vec![
                    RagChunk::new("a", "u1", "t1"),
                    RagChunk::new("b", "u2", "t2"),
                ],
                history_truncated: false,
            })
        }
    }

    struct OverflowingSummarizer;

    #[async_trait]
    impl Summarizer for OverflowingSummarizer {
        async fn summarize(&self, _request: &SummarizeRequest) -> Result<SummarizerResult> {
            Err(AppError::PromptTooLong(
                "Prompt length exceeds LLM context window limit (8000 tokens)".into(),
            ))
        }
    }

    fn state_with(summarizer: Box<dyn Summarizer>, feedback_enabled: bool) -> AppState {
        AppState::new(
            PayloadValidator::default(),
            summarizer,
            Box::new(InMemoryCache::new()),
            Box::new(NoopAuth),
            feedback_enabled,
        )
    }

    fn app() -> Router {
        create_router(state_with(Box::new(RecordingSummarizer::default()), true))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_query_returns_referenced_documents_in_order() {
        let response = app()
            .oneshot(post_json(
                "/v1/query",
                json!({"query": "hello", "conversation_id": VALID_ID}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["conversation_id"], VALID_ID);
        assert_eq!(body["response"], "answer to hello");
        assert_eq!(body["truncated"], false);
        assert_eq!(
            body["referenced_documents"],
            json!([
                {"docs_url": "u1", "title": "t1"},
                {"docs_url": "u2", "title": "t2"}
            ])
        );
    }

    #[tokio::test]
    async fn test_query_without_conversation_id_gets_new_one() {
        let response = app()
            .oneshot(post_json("/v1/query", json!({"query": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let id = body["conversation_id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_query_history_is_passed_on_follow_up() {
        let summarizer = RecordingSummarizer::default();
        let seen = summarizer.seen.clone();
        let app = create_router(state_with(Box::new(summarizer), true));

        for question in ["first", "second"] {
            let response = app
                .clone()
                .oneshot(post_json(
                    "/v1/query",
                    json!({"query": question, "conversation_id": VALID_ID}),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let seen = seen.lock().await;
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].history, None);
        assert_eq!(
            seen[1].history.as_deref(),
            Some("human: first\nai: answer to first")
        );
    }

    #[tokio::test]
    async fn test_query_provider_without_model() {
        let response = app()
            .oneshot(post_json(
                "/v1/query",
                json!({"query": "hello", "provider": "openai"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"]["code"], "provider_model_mismatch");
        assert_eq!(
            body["detail"]["cause"],
            "LLM model must be specified when the provider is specified."
        );
    }

    #[tokio::test]
    async fn test_query_malformed_conversation_id() {
        let response = app()
            .oneshot(post_json(
                "/v1/query",
                json!({"query": "hello", "conversation_id": "not-a-uuid"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"]["code"], "malformed_conversation_id");
    }

    #[tokio::test]
    async fn test_query_unsupported_attachment_type() {
        let response = app()
            .oneshot(post_json(
                "/v1/query",
                json!({
                    "query": "hello",
                    "attachments": [
                        {"attachment_type": "screenshot", "content_type": "text/plain", "content": "x"}
                    ]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"]["code"], "unsupported_attachment");
        assert_eq!(body["detail"]["field"], "attachment_type");
    }

    #[tokio::test]
    async fn test_query_invalid_json_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"query\": 42}"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"]["code"], "invalid_body");
    }

    #[tokio::test]
    async fn test_query_wrongly_shaped_attachments_report_index() {
        let valid = json!({"attachment_type": "log", "content_type": "text/plain", "content": "x"});
        let cases = [
            (json!([valid.clone(), "oops"]), 1, "attachment"),
            (
                json!([{"attachment_type": "log", "content_type": "text/plain", "content": 5}]),
                0,
                "content",
            ),
        ];

        for (attachments, index, field) in cases {
            let response = app()
                .oneshot(post_json(
                    "/v1/query",
                    json!({"query": "hello", "attachments": attachments}),
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            let body = body_json(response).await;
            assert_eq!(body["detail"]["code"], "malformed_attachment");
            assert_eq!(
                body["detail"]["cause"],
                format!("Attachment at index {index} has a missing or malformed '{field}'")
            );
        }
    }

    #[tokio::test]
    async fn test_query_prompt_too_long() {
        let app = create_router(state_with(Box::new(OverflowingSummarizer), true));
        let response = app
            .oneshot(post_json("/v1/query", json!({"query": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["detail"]["response"], "Prompt is too long");
    }

    #[tokio::test]
    async fn test_feedback_accepted() {
        let response = app()
            .oneshot(post_json(
                "/v1/feedback",
                json!({
                    "conversation_id": VALID_ID,
                    "user_question": "foo",
                    "llm_response": "bar",
                    "sentiment": 1
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"response": "feedback received"})
        );
    }

    #[tokio::test]
    async fn test_feedback_huge_sentiment_with_bad_id() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/feedback")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"conversation_id": "not-a-uuid", "user_question": "foo", "llm_response": "bar", "sentiment": 99999999999999999999}"#,
            ))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"]["code"], "malformed_conversation_id");
    }

    #[tokio::test]
    async fn test_feedback_huge_sentiment_with_valid_id() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/feedback")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(
                r#"{{"conversation_id": "{VALID_ID}", "user_question": "foo", "llm_response": "bar", "sentiment": 99999999999999999999}}"#
            )))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"]["code"], "invalid_sentiment");
    }

    #[tokio::test]
    async fn test_feedback_without_signal() {
        let response = app()
            .oneshot(post_json(
                "/v1/feedback",
                json!({
                    "conversation_id": VALID_ID,
                    "user_question": "foo",
                    "llm_response": "bar"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"]["code"], "missing_feedback_signal");
    }

    #[tokio::test]
    async fn test_feedback_disabled() {
        let app = create_router(state_with(Box::new(RecordingSummarizer::default()), false));

        let response = app
            .clone()
            .oneshot(post_json(
                "/v1/feedback",
                json!({
                    "conversation_id": VALID_ID,
                    "user_question": "foo",
                    "llm_response": "bar",
                    "sentiment": -1
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await,
            json!({"detail": "Feedback is disabled"})
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/feedback/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"functionality": "feedback", "status": {"enabled": false}})
        );
    }

    #[tokio::test]
    async fn test_authorized_requires_credentials_when_enabled() {
        let state = AppState::new(
            PayloadValidator::default(),
            Box::new(RecordingSummarizer::default()),
            Box::new(InMemoryCache::new()),
            Box::new(CombinedAuthenticator::development()),
            true,
        );
        let app = create_router(state);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/authorized")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({"detail": "Unauthorized: No auth header found"})
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/authorized")
                    .header(header::AUTHORIZATION, "ApiKey dev-api-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"user_id": "123e4567-e89b-12d3-a456-426614174000", "username": "user1"})
        );
    }

    #[tokio::test]
    async fn test_state_from_config_uses_configured_api_keys() {
        let mut config = AppConfig::development();
        config.auth.enabled = true;
        config.auth.api_keys = vec![ApiKeyEntry {
            key: "team-key".into(),
            user_id: "u-7".into(),
            username: "alice".into(),
        }];
        config.auth.jwt_secret = String::new();
        let app = create_router(AppState::from_config(
            &config,
            Box::new(RecordingSummarizer::default()),
        ));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/authorized")
                    .header(header::AUTHORIZATION, "ApiKey team-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"user_id": "u-7", "username": "alice"})
        );

        for auth in ["ApiKey dev-api-key", "Bearer some.jwt.token"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/authorized")
                        .header(header::AUTHORIZATION, auth)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{auth}");
        }
    }

    #[tokio::test]
    async fn test_probes_skip_authentication() {
        let state = AppState::new(
            PayloadValidator::default(),
            Box::new(RecordingSummarizer::default()),
            Box::new(InMemoryCache::new()),
            Box::new(CombinedAuthenticator::development()),
            true,
        );
        let app = create_router(state);

        for uri in ["/liveness", "/readiness", "/openapi.json"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }
}
