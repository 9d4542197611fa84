//! Integration tests for API endpoints.
//!
//! These tests drive the full router with a stub backend, so no CouchDB
//! instance is required.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use couch_gateway::api::{create_router, AppState};
use couch_gateway::domain::{Credentials, UserSession};
use couch_gateway::errors::{AppError, AppResult};
use couch_gateway::infra::BackendClient;

const BASE: &str = "http://couch.test:5984";

// =============================================================================
// Stub Backend for Testing
// =============================================================================

/// Backend stub that answers every call with a fixed outcome and counts calls.
struct StubBackend {
    outcome: Option<AppError>,
    calls: Arc<AtomicUsize>,
}

impl StubBackend {
    fn accepting() -> Self {
        Self {
            outcome: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing(err: AppError) -> Self {
        Self {
            outcome: Some(err),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn answer(&self, credentials: Credentials) -> AppResult<UserSession> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            None => Ok(UserSession::new(BASE, credentials)),
            Some(err) => Err(err.clone()),
        }
    }
}

#[async_trait]
impl BackendClient for StubBackend {
    async fn verify_credentials(&self, credentials: Credentials) -> AppResult<UserSession> {
        self.answer(credentials)
    }

    async fn create_user(&self, credentials: Credentials) -> AppResult<UserSession> {
        self.answer(credentials)
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn app(backend: StubBackend) -> (Router, Arc<AtomicUsize>) {
    let calls = backend.calls.clone();
    let router = create_router(AppState::new(Arc::new(backend)), "does-not-exist");
    (router, calls)
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// =============================================================================
// Register
// =============================================================================

#[tokio::test]
async fn test_register_returns_user_session() {
    let (app, calls) = app(StubBackend::accepting());

    let response = app
        .oneshot(json_post("/register", r#"{"username":"alice","password":"secret"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({
            "username": "alice",
            "dbUrl": "http://couch.test:5984/userdb-616c696365",
            "dbCredentials": ["alice", "secret"],
        })
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_register_accepts_urlencoded_body() {
    let (app, calls) = app(StubBackend::accepting());

    let response = app
        .oneshot(form_post("/register", "username=alice&password=secret"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], "alice");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_register_existing_user_is_conflict() {
    let (app, _) = app(StubBackend::failing(AppError::user_exists()));

    let response = app
        .oneshot(json_post("/register", r#"{"username":"alice","password":"secret"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "authentication", "message": "User already exists."})
    );
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_returns_user_session() {
    let (app, calls) = app(StubBackend::accepting());

    let response = app
        .oneshot(json_post("/login", r#"{"username":"alice","password":"secret"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["dbUrl"], "http://couch.test:5984/userdb-616c696365");
    assert_eq!(body["dbCredentials"], serde_json::json!(["alice", "secret"]));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let (app, _) = app(StubBackend::failing(AppError::invalid_credentials()));

    let response = app
        .oneshot(form_post("/login", "username=alice&password=wrong"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "authentication", "message": "Invalid username/password."})
    );
}

#[tokio::test]
async fn test_login_backend_down_is_bad_gateway() {
    let (app, _) = app(StubBackend::failing(AppError::db("connection refused")));

    let response = app
        .oneshot(json_post("/login", r#"{"username":"alice","password":"secret"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "db", "message": "connection refused"})
    );
}

// =============================================================================
// Malformed requests
// =============================================================================

#[tokio::test]
async fn test_incomplete_credentials_are_rejected_before_backend() {
    let bodies = [
        r#"{"username":"alice"}"#,
        r#"{"password":"secret"}"#,
        r#"{"username":"alice","password":""}"#,
        r#"{"username":"","password":"secret"}"#,
        r#"{}"#,
        "",
        "not json",
    ];

    for uri in ["/register", "/login"] {
        for body in bodies {
            let (app, calls) = app(StubBackend::accepting());
            let response = app.oneshot(json_post(uri, body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", uri, body);
            assert!(body_bytes(response).await.is_empty());
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }
}

#[tokio::test]
async fn test_empty_body_without_content_type_is_rejected() {
    let (app, calls) = app(StubBackend::accepting());

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_urlencoded_missing_password_is_rejected() {
    let (app, calls) = app(StubBackend::accepting());

    let response = app
        .oneshot(form_post("/login", "username=alice"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Host concerns
// =============================================================================

#[tokio::test]
async fn test_responses_allow_any_origin() {
    let (app, _) = app(StubBackend::accepting());

    let mut request = json_post("/login", r#"{"username":"alice","password":"secret"}"#);
    request
        .headers_mut()
        .insert(header::ORIGIN, "http://app.example".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_preflight_lists_allowed_headers() {
    let (app, calls) = app(StubBackend::accepting());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/register")
        .header(header::ORIGIN, "http://app.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let allowed = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    for name in ["origin", "x-requested-with", "content-type", "accept"] {
        assert!(allowed.contains(name), "{} missing from {}", name, allowed);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = app(StubBackend::accepting());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_unknown_path_falls_back_to_static_files() {
    let (app, _) = app(StubBackend::accepting());

    let request = Request::builder()
        .uri("/index.html")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
