use std::sync::Arc;

use auth_gateway::app::build_router;
use auth_gateway::middleware::auth::AuthGate;
use auth_gateway::middleware::http::{HttpLimits, REQUEST_ID_HEADER};
use auth_gateway::services::auth::{EnvironmentPolicy, TokenVerifier, VerifierOptions};
use auth_gateway::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

const SIGNING_KEY: &[u8] = b"integration-signing-key";

fn app(policy: EnvironmentPolicy) -> Router {
    let verifier = TokenVerifier::new(SIGNING_KEY, VerifierOptions::default());
    let state = AppState::new(Arc::new(AuthGate::new(verifier, policy)));
    build_router(state, HttpLimits::default())
}

fn enforced() -> Router {
    app(EnvironmentPolicy::new(
        Some("local".into()),
        Some("staging".into()),
    ))
}

fn bypassed() -> Router {
    app(EnvironmentPolicy::new(
        Some("local".into()),
        Some("local".into()),
    ))
}

fn token(claims: Value, key: &[u8]) -> String {
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(key)).unwrap()
}

fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn valid_token_attaches_principal() {
    let bearer = format!("Bearer {}", token(json!({ "sub": "bob" }), SIGNING_KEY));

    let resp = enforced()
        .oneshot(get("/api/v1/me", Some(&bearer)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["subject"], "bob");
    assert_eq!(body["authorities"], json!([]));
}

#[tokio::test]
async fn missing_header_passes_through_gate() {
    // Public route: admitted without a principal.
    let resp = enforced()
        .oneshot(get("/api/v1/health", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Route that needs a principal: the handler, not the gate, refuses.
    let resp = enforced().oneshot(get("/api/v1/me", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn other_scheme_passes_through_gate() {
    let resp = enforced()
        .oneshot(get("/api/v1/health", Some("Basic dXNlcjpwYXNz")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn token_signed_with_other_key_is_rejected() {
    let bearer = format!("Bearer {}", token(json!({ "sub": "bob" }), b"not-the-key"));

    let resp = enforced()
        .oneshot(get("/api/v1/health", Some(&bearer)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn token_without_subject_is_rejected() {
    let bearer = format!("Bearer {}", token(json!({ "role": "admin" }), SIGNING_KEY));

    let resp = enforced()
        .oneshot(get("/api/v1/me", Some(&bearer)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let exp = Utc::now().timestamp() - 3600;
    let bearer = format!(
        "Bearer {}",
        token(json!({ "sub": "bob", "exp": exp }), SIGNING_KEY)
    );

    let resp = enforced()
        .oneshot(get("/api/v1/me", Some(&bearer)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_token_is_rejected() {
    let resp = enforced()
        .oneshot(get("/api/v1/health", Some("Bearer abc.def")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bypass_admits_without_and_with_invalid_token() {
    let resp = bypassed()
        .oneshot(get("/api/v1/health", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["auth"], "disabled");

    let resp = bypassed()
        .oneshot(get("/api/v1/health", Some("Bearer definitely-not-a-token")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn bypass_never_attaches_principal() {
    let bearer = format!("Bearer {}", token(json!({ "sub": "bob" }), SIGNING_KEY));

    let resp = bypassed()
        .oneshot(get("/api/v1/me", Some(&bearer)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn root_health_is_outside_the_gate() {
    let resp = enforced()
        .oneshot(get("/health", Some("Bearer garbage")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["auth"], "enforced");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let resp = enforced()
        .oneshot(get("/health", None))
        .await
        .unwrap();
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));

    let req = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "req-123")
        .body(Body::empty())
        .unwrap();
    let resp = enforced().oneshot(req).await.unwrap();
    assert_eq!(resp.headers()[REQUEST_ID_HEADER], "req-123");
}

#[tokio::test]
async fn principals_do_not_leak_between_requests() {
    let app = enforced();

    for subject in ["alice", "bob"] {
        let bearer = format!("Bearer {}", token(json!({ "sub": subject }), SIGNING_KEY));
        let resp = app
            .clone()
            .oneshot(get("/api/v1/me", Some(&bearer)))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await["subject"], subject);
    }

    let resp = app.oneshot(get("/api/v1/me", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
