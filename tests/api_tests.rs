use poke_chat::config::Credential;
use poke_chat::message::{ChatResponse, HealthResponse};
use poke_chat::routes::create_router;
use poke_chat::services::completion::{CompletionClient, CompletionOutcome, FailureKind};
use poke_chat::services::dispatcher::Dispatcher;
use poke_chat::services::persona::POKE_PERSONA;
use poke_chat::state::AppState;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::util::ServiceExt;

struct FixedClient(CompletionOutcome);

impl CompletionClient for FixedClient {
    async fn complete(&self, _message: &str, _persona: &str) -> CompletionOutcome {
        self.0.clone()
    }
}

struct PanickingClient;

impl CompletionClient for PanickingClient {
    async fn complete(&self, _message: &str, _persona: &str) -> CompletionOutcome {
        panic!("completion client blew up");
    }
}

fn app(credential: Credential, outcome: CompletionOutcome) -> Router {
    let dispatcher = Dispatcher::new(FixedClient(outcome), credential, POKE_PERSONA);
    create_router().with_state(Arc::new(AppState::new(dispatcher)))
}

fn demo_app() -> Router {
    app(
        Credential::absent(),
        CompletionOutcome::Success {
            text: "unused".into(),
        },
    )
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn test_chat_endpoint_demo_mode() {
    let response = demo_app()
        .oneshot(chat_request(r#"{"message": "check my email", "session_id": null}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let chat_resp: ChatResponse = body_json(response).await;
    assert!(chat_resp.response.contains("Email"));
    assert!(!chat_resp.session_id.is_empty());
    assert!(!chat_resp.timestamp.is_empty());
}

#[tokio::test]
async fn test_empty_message_is_bad_request() {
    for body in [r#"{"message": "   "}"#, r#"{}"#] {
        let response = demo_app().oneshot(chat_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: serde_json::Value = body_json(response).await;
        assert_eq!(error["error"], "No message provided");
    }
}

#[tokio::test]
async fn test_remote_failure_still_answers() {
    let app = app(
        Credential::new("sk-live-key"),
        CompletionOutcome::failure(FailureKind::RateLimited, "slow down"),
    );
    let response = app
        .oneshot(chat_request(r#"{"message": "hello", "session_id": "s-1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let chat_resp: ChatResponse = body_json(response).await;
    assert_eq!(chat_resp.session_id, "s-1");
    assert!(chat_resp.response.contains("slow down"));
}

#[tokio::test]
async fn test_health_reports_credential() {
    let response = demo_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let raw: serde_json::Value = body_json(response).await;
    assert_eq!(raw["status"], "healthy");
    assert_eq!(raw["credentialPresent"], false);

    let live = app(
        Credential::new("sk-live-key"),
        CompletionOutcome::Success { text: "ok".into() },
    );
    let response = live
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let health: HealthResponse = body_json(response).await;
    assert!(health.credential_present);
    assert_eq!(health.service, "Poke");
}

#[tokio::test]
async fn test_internal_fault_is_server_error() {
    let credential = Credential::new("sk-live-key");
    let dispatcher = Dispatcher::new(PanickingClient, credential, POKE_PERSONA);
    let app = create_router().with_state(Arc::new(AppState::new(dispatcher)));

    let response = app
        .oneshot(chat_request(r#"{"message": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: serde_json::Value = body_json(response).await;
    assert_eq!(error["error"], "Something went wrong");
}

#[tokio::test]
async fn test_malformed_body_gets_json_error() {
    for body in ["not json at all", r#"{"message": 42}"#] {
        let response = demo_app().oneshot(chat_request(body)).await.unwrap();
        assert!(response.status().is_client_error());
        let error: serde_json::Value = body_json(response).await;
        assert!(error["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    let response = demo_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .body(Body::from(r#"{"message": "hi"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let error: serde_json::Value = body_json(response).await;
    assert!(error["error"].is_string());
}
