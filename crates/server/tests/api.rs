//! Router-level tests.
//!
//! These exercise the request paths that resolve before any database
//! access: authentication extraction, input validation, and the
//! registration role policy. A lazily-connected pool stands in for the
//! database, so no `PostgreSQL` instance is required.

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use secrecy::SecretString;
use serde_json::json;
use tower::ServiceExt;

use shoplite_core::UserId;
use shoplite_server::config::ServerConfig;
use shoplite_server::routes;
use shoplite_server::state::AppState;

fn test_state() -> AppState {
    let config = ServerConfig {
        database_url: SecretString::from("postgres://localhost/shoplite_test"),
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        token_secret: SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6dE1"),
        token_ttl: Duration::from_secs(3600),
        allow_registration_role: false,
        sentry_dsn: None,
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/shoplite_test")
        .expect("lazy pool");

    AppState::new(config, pool)
}

fn app() -> (Router, AppState) {
    let state = test_state();
    let router = routes::routes().with_state(state.clone());
    (router, state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn profile_requires_auth_header() {
    let (app, _) = app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/profile")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() {
    let (app, _) = app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/history")
                .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_authorization_is_rejected() {
    let (app, _) = app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/recommendations")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_rejects_invalid_email() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/register",
            json!({
                "name": "alice",
                "email": "not-an-email",
                "password": "long enough password"
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_short_password() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/register",
            json!({
                "name": "alice",
                "email": "alice@example.com",
                "password": "short"
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_denies_admin_role_by_default() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/register",
            json!({
                "name": "mallory",
                "email": "mallory@example.com",
                "password": "long enough password",
                "role": "admin"
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn cart_delete_requires_a_selector() {
    let (app, state) = app();
    let token = state.tokens().issue(UserId::new(1)).expect("token");

    let mut request = json_request("DELETE", "/cart", json!({}));
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().expect("header value"),
    );

    let response = app.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cart_add_rejects_zero_quantity() {
    let (app, state) = app();
    let token = state.tokens().issue(UserId::new(1)).expect("token");

    let mut request = json_request(
        "POST",
        "/cart",
        json!({ "product_id": 1, "quantity": 0 }),
    );
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().expect("header value"),
    );

    let response = app.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn interaction_rejects_unknown_kind() {
    let (app, state) = app();
    let token = state.tokens().issue(UserId::new(1)).expect("token");

    let mut request = json_request(
        "POST",
        "/interactions",
        json!({ "product_id": 1, "kind": "teleport" }),
    );
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().expect("header value"),
    );

    let response = app.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
