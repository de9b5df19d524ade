//! Shared helpers for API integration tests.
//!
//! Requests go straight into the router via `tower::ServiceExt::oneshot`;
//! no socket is bound.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use viewus_api::auth::jwt::{generate_access_token, JwtConfig};
use viewus_api::config::ServerConfig;
use viewus_api::router::build_app_router;
use viewus_api::state::AppState;

pub const PUBLIC_BASE_URL: &str = "https://viewus.test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        public_base_url: PUBLIC_BASE_URL.parse().expect("valid base url"),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router (same middleware stack as production)
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Bearer token for `user_id`, signed with the test secret.
pub fn token_for(user_id: i64) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// A complete, valid draft as the browser would submit it.
pub fn draft_json(slug: &str) -> Value {
    serde_json::json!({
        "project_details": { "project_name": "Acme", "project_slug": slug },
        "cover_page": {
            "title": "Share your experience",
            "description": "",
            "logo": null,
            "btn_text": "Start"
        },
        "user_information": {
            "user_photo": false,
            "first_name": true,
            "last_name": false,
            "email": true,
            "job_title": false,
            "company": false
        },
        "testimonial_type": { "text": true, "video": false },
        "testimonial_page": {
            "title": "Write a testimonial",
            "description": "",
            "tags": ["fast"],
            "question_header": "",
            "questions": ["What did you like?"]
        },
        "thank_you": { "title": "Thank you!", "description": "" },
        "design": { "gradient_type": 2, "btn_color": "#71D4FF" }
    })
}

/// Create a space through the API and return its id.
pub async fn create_space(pool: &PgPool, slug: &str, token: &str) -> i64 {
    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/spaces", draft_json(slug), token)
            .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("id should be a number")
}
