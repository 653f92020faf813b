use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use backend::{AppState, CredentialPrecedence, GatewayConfig};
use serde_json::{Value, json};
use shared::models::{BotSlot, CompletionRequest, GenerationSettings};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn completion_body(content: &str, model: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": model,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn app(config: GatewayConfig) -> Router {
    backend::with_state(Router::new(), AppState::new(config))
}

fn request(api_key: Option<&str>, payload: &CompletionRequest) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn payload(slot: BotSlot, custom_url: Option<String>) -> CompletionRequest {
    CompletionRequest {
        message: "Say hi".to_string(),
        bot_type: slot,
        settings: GenerationSettings::for_slot(slot),
        custom_url,
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn forwards_prompt_and_returns_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hi!", "gpt-4")))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/v1", server.uri());
    let response = app(GatewayConfig::default())
        .oneshot(request(Some("sk-request"), &payload(BotSlot::B, Some(url))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["botType"], "Bot B");
    assert_eq!(body["response"], "hi!");
    assert_eq!(body["modelId"], "gpt-4");

    let received = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["model"], "gpt-4");
    assert_eq!(sent["messages"][0]["role"], "user");
    assert_eq!(sent["messages"][0]["content"], "Say hi");
    assert!(sent.get("top_p").is_some());
    assert!(sent.get("temperature").is_some());
    assert!(sent.get("top_k").is_none());
}

#[tokio::test]
async fn missing_key_is_rejected_before_any_remote_call() {
    let server = MockServer::start().await;
    let url = format!("{}/v1", server.uri());

    let response = app(GatewayConfig::default())
        .oneshot(request(None, &payload(BotSlot::A, Some(url))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "API key is required");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn remote_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
                "param": null,
                "code": "invalid_api_key"
            }
        })))
        .mount(&server)
        .await;

    let url = format!("{}/v1", server.uri());
    let response = app(GatewayConfig::default())
        .oneshot(request(Some("sk-bad"), &payload(BotSlot::A, Some(url))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = json_body(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("Incorrect API key provided"), "{error}");
}

#[tokio::test]
async fn server_credentials_override_request_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("env", "gpt-3.5-turbo")))
        .expect(1)
        .mount(&server)
        .await;

    let config = GatewayConfig {
        api_key: Some("sk-env".to_string()),
        base_url: Some(format!("{}/v1", server.uri())),
        precedence: CredentialPrecedence::Environment,
    };
    // The request's own URL points nowhere; the server URL must win.
    let response = app(config)
        .oneshot(request(
            Some("sk-request"),
            &payload(BotSlot::A, Some("http://127.0.0.1:9/v1".to_string())),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["response"], "env");
}

#[tokio::test]
async fn request_credentials_win_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("req", "gpt-4")))
        .expect(1)
        .mount(&server)
        .await;

    let config = GatewayConfig {
        api_key: Some("sk-env".to_string()),
        base_url: Some("http://127.0.0.1:9/v1".to_string()),
        precedence: CredentialPrecedence::Request,
    };
    let url = format!("{}/v1", server.uri());
    let response = app(config)
        .oneshot(request(Some("sk-request"), &payload(BotSlot::B, Some(url))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["response"], "req");
}

#[tokio::test]
async fn empty_model_id_uses_default_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok", "gpt-3.5-turbo")))
        .mount(&server)
        .await;

    let mut body = payload(BotSlot::A, Some(format!("{}/v1", server.uri())));
    body.settings.model_id = String::new();
    let response = app(GatewayConfig::default())
        .oneshot(request(Some("sk"), &body))
        .await
        .unwrap();

    assert_eq!(json_body(response).await["modelId"], "gpt-3.5-turbo");
    let received = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["model"], "gpt-3.5-turbo");
}

fn raw_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .header("x-api-key", "sk")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let response = app(GatewayConfig::default())
        .oneshot(raw_request("{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let error = json_body(response).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Invalid request body"), "{error}");
}

#[tokio::test]
async fn partial_settings_are_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok", "gpt-4")))
        .expect(1)
        .mount(&server)
        .await;

    let body = json!({
        "message": "Say hi",
        "botType": "Bot B",
        "settings": { "temperature": 0.3, "modelId": "gpt-4" },
        "customUrl": format!("{}/v1", server.uri()),
    });
    let response = app(GatewayConfig::default())
        .oneshot(raw_request(&body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let received = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["top_p"].as_f64().unwrap() as f32, 0.9);
}

#[tokio::test]
async fn health_reports_ok() {
    let response = app(GatewayConfig::default())
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
