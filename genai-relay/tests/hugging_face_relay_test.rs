mod common;

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn text_prompt_is_extracted_and_reply_wrapped_in_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mistralai/Mistral-7B-Instruct-v0.2"))
        .and(header("authorization", format!("Bearer {}", HF_TOKEN).as_str()))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "inputs": "Say hello" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "generated_text": "hello" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        hugging_face_app(&server),
        json!({
            "endpoint": "text",
            "payload": { "contents": [{ "parts": [{ "text": "Say hello" }] }] }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "candidates": [{ "content": { "parts": [{ "text": "hello" }] } }] })
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].url.query().is_none(),
        "token must travel in the Authorization header only"
    );
}

#[tokio::test]
async fn image_bytes_come_back_base64_encoded_losslessly() {
    let server = MockServer::start().await;
    let image: Vec<u8> = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]
        .into_iter()
        .chain((0..=255u8).rev())
        .chain([0, 0, 0xff])
        .collect();

    Mock::given(method("POST"))
        .and(path("/stabilityai/stable-diffusion-xl-base-1.0"))
        .and(header("authorization", format!("Bearer {}", HF_TOKEN).as_str()))
        .and(body_json(json!({ "inputs": "a red fox in snow" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(image.clone()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        hugging_face_app(&server),
        json!({
            "endpoint": "image",
            "payload": { "instances": [{ "prompt": "a red fox in snow" }], "parameters": { "sampleCount": 1 } }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let encoded = body["predictions"][0]["bytesBase64Encoded"]
        .as_str()
        .expect("base64 string");
    assert_eq!(STANDARD.decode(encoded).unwrap(), image);
}

#[tokio::test]
async fn tts_is_not_offered() {
    let server = MockServer::start().await;
    forbid_upstream_calls(&server).await;

    let (status, body) = post_json(
        hugging_face_app(&server),
        json!({ "endpoint": "tts", "payload": {} }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid endpoint specified." }));
}

#[tokio::test]
async fn payload_without_prompt_fails_before_upstream_call() {
    let server = MockServer::start().await;
    forbid_upstream_calls(&server).await;

    let (status, body) = post_json(
        hugging_face_app(&server),
        json!({ "endpoint": "text", "payload": { "inputs": "wrong shape" } }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
}

#[tokio::test]
async fn model_loading_error_is_mirrored() {
    let server = MockServer::start().await;
    let upstream_error = json!({
        "error": "Model stabilityai/stable-diffusion-xl-base-1.0 is currently loading",
        "estimated_time": 20.0
    });

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(upstream_error.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        hugging_face_app(&server),
        json!({ "endpoint": "image", "payload": { "instances": [{ "prompt": "x" }] } }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Error from Hugging Face API");
    assert_eq!(body["details"], upstream_error);
}

#[tokio::test]
async fn unauthorized_text_error_never_leaks_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(format!(
                "Invalid credentials in Authorization header: Bearer {}",
                HF_TOKEN
            )),
        )
        .mount(&server)
        .await;

    let (status, body) = post_json(
        hugging_face_app(&server),
        json!({
            "endpoint": "text",
            "payload": { "contents": [{ "parts": [{ "text": "hi" }] }] }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(!body.to_string().contains(HF_TOKEN));
    assert_eq!(
        body["details"],
        "Invalid credentials in Authorization header: Bearer [REDACTED]"
    );
}

#[tokio::test]
async fn unexpected_text_reply_shape_is_a_generic_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generated_text": "flat" })))
        .mount(&server)
        .await;

    let (status, body) = post_json(
        hugging_face_app(&server),
        json!({
            "endpoint": "text",
            "payload": { "contents": [{ "parts": [{ "text": "hi" }] }] }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
}
