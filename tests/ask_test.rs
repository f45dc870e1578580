//! Tests for the chat endpoint and its model fallback sequence.

mod common;

use common::{TestApp, FALLBACK_1, PRIMARY_MODEL};
use persona_service::services::providers::mock::MockChatProvider;
use serde_json::json;

#[tokio::test]
async fn blank_message_returns_400_without_touching_upstream_or_history() {
    let app = TestApp::with_provider(MockChatProvider::new().with_reply(PRIMARY_MODEL, "hi"));

    let (status, body) = app.post_json("/api/ask", json!({"message": "   "})).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Empty message");
    assert_eq!(app.provider.call_count(), 0);

    let (_, history) = app.get("/api/history").await;
    assert_eq!(history["chats"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn missing_message_field_behaves_like_blank() {
    let app = TestApp::with_provider(MockChatProvider::new());

    let (status, body) = app.post_json("/api/ask", json!({})).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Empty message");
}

#[tokio::test]
async fn successful_chat_returns_reply_and_model_and_appends_history() {
    let app =
        TestApp::with_provider(MockChatProvider::new().with_reply(PRIMARY_MODEL, "You got this!"));

    let (status, body) = app
        .post_json("/api/ask", json!({"message": "How do I start?"}))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["reply"], "You got this!");
    assert_eq!(body["model"], PRIMARY_MODEL);
    assert_eq!(app.provider.call_count(), 1);

    let (_, history) = app.get("/api/history").await;
    let chats = history["chats"].as_array().unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0]["user"], "How do I start?");
    assert_eq!(chats[0]["ai"], "You got this!");
    assert!(chats[0]["ts"].is_number());

    let (_, health) = app.get("/api/health").await;
    assert_eq!(health["last_chat"], "How do I start?");
}

#[tokio::test]
async fn fallback_serves_second_model_after_primary_fails() {
    // Primary has no scripted outcome and fails at transport level; the
    // first fallback answers.
    let app = TestApp::with_provider(MockChatProvider::new().with_reply(FALLBACK_1, "from backup"));

    let (status, body) = app.post_json("/api/ask", json!({"message": "hello"})).await;

    assert_eq!(status, 200);
    assert_eq!(body["reply"], "from backup");
    assert_eq!(body["model"], FALLBACK_1);
    assert_eq!(app.provider.call_count(), 2);
}

#[tokio::test]
async fn exhausted_fallback_returns_500_after_exactly_three_calls() {
    let app = TestApp::with_provider(MockChatProvider::new());

    let (status, body) = app.post_json("/api/ask", json!({"message": "hello"})).await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "All models failed");
    assert_eq!(app.provider.call_count(), 3);

    // Failed attempts leave no chat record behind.
    let (_, history) = app.get("/api/history").await;
    assert_eq!(history["chats"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn body_without_choices_counts_as_a_failed_attempt() {
    // Primary answers with an upstream error body; first fallback answers
    // properly.
    let provider = MockChatProvider::new()
        .with_rejection(PRIMARY_MODEL, json!({"error": {"message": "over quota"}}))
        .with_reply(FALLBACK_1, "recovered");
    let app = TestApp::with_provider(provider);

    let (status, body) = app.post_json("/api/ask", json!({"message": "hello"})).await;

    assert_eq!(status, 200);
    assert_eq!(body["model"], FALLBACK_1);
    assert_eq!(app.provider.call_count(), 2);
}
