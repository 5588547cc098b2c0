//! Gemini client wire tests against a mock API server.

#![allow(clippy::unwrap_used)]

use kicklabs_core::{DesignPrompt, Resolution};
use kicklabs_integration_tests::{TEST_API_KEY, test_config};
use kicklabs_storefront::genai::{
    AuthFailure, Credential, DesignRequest, GeminiClient, GenAiError, GenerativeBackend,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STANDARD_PATH: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";
const PRO_PATH: &str = "/v1beta/models/gemini-3-pro-image-preview:generateContent";
const CHAT_PATH: &str = "/v1beta/models/gemini-3-pro-preview:generateContent";

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(&test_config(&server.uri()).genai).unwrap()
}

fn request(resolution: Resolution) -> DesignRequest {
    DesignRequest {
        prompt: DesignPrompt {
            prompt: "Yeti footprints".to_string(),
            ..DesignPrompt::default()
        },
        resolution,
    }
}

fn image_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    {"text": "Here is your design."},
                    {"inlineData": {"mimeType": "image/png", "data": "iVBORw0KGgo="}}
                ]
            },
            "finishReason": "STOP"
        }]
    }))
}

fn error_response(code: u16, status: &str) -> ResponseTemplate {
    ResponseTemplate::new(code).set_body_json(json!({
        "error": {"code": code, "message": "refused", "status": status}
    }))
}

#[tokio::test]
async fn test_standard_render_uses_server_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STANDARD_PATH))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .and(body_partial_json(json!({
            "generationConfig": {"imageConfig": {"aspectRatio": "1:1"}}
        })))
        .respond_with(image_response())
        .expect(1)
        .mount(&server)
        .await;

    let image = client(&server)
        .generate_design(&request(Resolution::Standard), None)
        .await
        .unwrap();

    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data_url(), "data:image/png;base64,iVBORw0KGgo=");
}

#[tokio::test]
async fn test_pro_render_uses_visitor_key_and_size() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PRO_PATH))
        .and(header("x-goog-api-key", "AIzaSyVisitorProjectKey"))
        .and(body_partial_json(json!({
            "generationConfig": {"imageConfig": {"imageSize": "4K"}}
        })))
        .respond_with(image_response())
        .expect(1)
        .mount(&server)
        .await;

    let credential = Credential::new("AIzaSyVisitorProjectKey").unwrap();
    let image = client(&server)
        .generate_design(&request(Resolution::High4K), Some(&credential))
        .await
        .unwrap();
    assert_eq!(image.data, "iVBORw0KGgo=");
}

#[tokio::test]
async fn test_pro_render_without_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(image_response())
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_design(&request(Resolution::High2K), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GenAiError::AuthorizationRequired(AuthFailure::Missing)
    ));
}

#[tokio::test]
async fn test_refused_keys_need_authorization() {
    for (code, status) in [(401, "UNAUTHENTICATED"), (403, "PERMISSION_DENIED")] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(error_response(code, status))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate_design(&request(Resolution::Standard), None)
            .await
            .unwrap_err();
        assert!(err.is_authorization_required(), "{code} should need a key");
    }
}

#[tokio::test]
async fn test_missing_pro_model_needs_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PRO_PATH))
        .respond_with(error_response(404, "NOT_FOUND"))
        .mount(&server)
        .await;

    let credential = Credential::new("AIzaSyVisitorProjectKey").unwrap();
    let err = client(&server)
        .generate_design(&request(Resolution::High2K), Some(&credential))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GenAiError::AuthorizationRequired(AuthFailure::Rejected(_))
    ));
}

#[tokio::test]
async fn test_missing_standard_model_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(error_response(404, "NOT_FOUND"))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_design(&request(Resolution::Standard), None)
        .await
        .unwrap_err();
    assert!(matches!(err, GenAiError::Api { code: 404, .. }));
}

#[tokio::test]
async fn test_server_error_is_not_an_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_design(&request(Resolution::Standard), None)
        .await
        .unwrap_err();
    assert!(!err.is_authorization_required());
    match err {
        GenAiError::Api {
            code,
            status,
            message,
        } => {
            assert_eq!(code, 500);
            assert_eq!(status, "UNKNOWN");
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_design(&request(Resolution::Standard), None)
        .await
        .unwrap_err();
    assert!(matches!(err, GenAiError::RateLimited(17)));
}

#[tokio::test]
async fn test_text_only_response_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "I can't draw that."}]}}]
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_design(&request(Resolution::Standard), None)
        .await
        .unwrap_err();
    assert!(matches!(err, GenAiError::EmptyResponse(_)));
}

#[tokio::test]
async fn test_blocked_prompt_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [],
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_design(&request(Resolution::Standard), None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("SAFETY"));
}

#[tokio::test]
async fn test_advise_sends_persona_and_thinking_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Best shoes for monsoon?"}]}],
            "generationConfig": {"thinkingConfig": {"thinkingBudget": 32768}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "Weighing materials...", "thought": true},
                    {"text": "Go for mesh with a rubber sole."}
                ]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server).advise("Best shoes for monsoon?").await.unwrap();
    assert_eq!(reply, "Go for mesh with a rubber sole.");

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    let persona = body["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
    assert!(!persona.is_empty());
}
