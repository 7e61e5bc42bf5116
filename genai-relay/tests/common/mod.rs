//! Test helpers for genai-relay integration tests.
//!
//! Builds the real router against a wiremock upstream and drives it in-process.

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{Method, Request, StatusCode},
    Router,
};
use genai_relay::credentials::{CredentialSource, StaticCredential};
use genai_relay::providers::{ProviderKind, ProviderTable};
use genai_relay::services::Relay;
use genai_relay::startup::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::{matchers::any, Mock, MockServer, ResponseTemplate};

pub const RELAY_PATH: &str = "/api/gemini";
pub const GEMINI_KEY: &str = "test-gemini-key-5f2c";
pub const HF_TOKEN: &str = "hf_test_token_91ab";

pub fn app(
    kind: ProviderKind,
    base_url: &str,
    credentials: impl CredentialSource + 'static,
) -> Router {
    let table = ProviderTable::new(kind, Some(base_url));
    let state = AppState {
        relay: Arc::new(Relay::new(table, Arc::new(credentials))),
    };
    build_router(state, RELAY_PATH)
}

pub fn gemini_app(server: &MockServer) -> Router {
    app(ProviderKind::Gemini, &server.uri(), StaticCredential::new(GEMINI_KEY))
}

pub fn hugging_face_app(server: &MockServer) -> Router {
    app(ProviderKind::HuggingFace, &server.uri(), StaticCredential::new(HF_TOKEN))
}

/// Fails the test on drop if the upstream receives any request.
pub async fn forbid_upstream_calls(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .named("no upstream call")
        .mount(server)
        .await;
}

pub async fn send(app: Router, method: Method, body: Body) -> (StatusCode, Bytes) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(RELAY_PATH)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes)
}

pub async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    let (status, bytes) = send(app, Method::POST, Body::from(body.to_string())).await;
    let json = serde_json::from_slice(&bytes).expect("relay always answers with JSON");
    (status, json)
}
