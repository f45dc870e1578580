//! Shared test harness: an in-process router backed by a scripted provider.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use persona_service::config::{CommonConfig, ModelConfig, PersonaConfig, UpstreamConfig};
use persona_service::services::providers::mock::MockChatProvider;
use persona_service::services::providers::ChatProvider;
use persona_service::services::{Assistant, MemoryStore};
use persona_service::startup::{router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const PRIMARY_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";
pub const FALLBACK_1: &str = "mistralai/mistral-7b-instruct-v0.3";
pub const FALLBACK_2: &str = "google/gemma-2-9b-it";

pub fn test_config() -> PersonaConfig {
    PersonaConfig {
        common: CommonConfig { port: 0 },
        upstream: UpstreamConfig {
            api_key: "test-key".to_string(),
            referer: "http://localhost:5001".to_string(),
        },
        models: ModelConfig {
            default_model: PRIMARY_MODEL.to_string(),
            fallback_models: vec![
                PRIMARY_MODEL.to_string(),
                FALLBACK_1.to_string(),
                FALLBACK_2.to_string(),
            ],
        },
    }
}

pub struct TestApp {
    router: Router,
    pub provider: Arc<MockChatProvider>,
}

impl TestApp {
    /// Build the app around a scripted provider.
    pub fn with_provider(provider: MockChatProvider) -> Self {
        let provider = Arc::new(provider);
        let config = test_config();
        let assistant = Arc::new(Assistant::new(
            provider.clone() as Arc<dyn ChatProvider>,
            config.models.clone(),
        ));
        let state = AppState {
            config,
            memory: MemoryStore::new(),
            assistant,
        };

        Self {
            router: router(state),
            provider,
        }
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes).expect("Response body was not JSON");

        (status, body)
    }
}
