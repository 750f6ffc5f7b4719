#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use kaizen_api::auth::jwt::{generate_access_token, JwtConfig};
use kaizen_api::config::ServerConfig;
use kaizen_api::router::build_app_router;
use kaizen_api::state::AppState;
use kaizen_db::models::idea::{CreateIdea, Idea};
use kaizen_db::models::user::{CreateUser, User};
use kaizen_db::repositories::{IdeaRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_OTP: &str = "1234";

/// Build a test `ServerConfig` with safe defaults and a known OTP.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8081".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        static_otp: Some(TEST_OTP.to_string()),
        seed_demo_data: false,
    }
}

/// Build the full application router, same middleware stack as production.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, employee_number: &str, role: &str) -> User {
    create_user_in(pool, employee_number, role, "Engineering").await
}

pub async fn create_user_in(
    pool: &PgPool,
    employee_number: &str,
    role: &str,
    department: &str,
) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            employee_number: employee_number.to_string(),
            name: format!("User {employee_number}"),
            email: format!("user{employee_number}@company.com"),
            department: department.to_string(),
            designation: "Engineer".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn create_idea(pool: &PgPool, submitted_by: i64, title: &str) -> Idea {
    IdeaRepo::create(
        pool,
        &CreateIdea {
            title: title.to_string(),
            problem: "Problem statement".to_string(),
            improvement: "Proposed improvement".to_string(),
            benefit: "productivity".to_string(),
            estimated_savings: Some(1000.0),
            department: "Engineering".to_string(),
            submitted_by,
            tags: vec![],
            priority: "medium".to_string(),
        },
    )
    .await
    .unwrap()
}

/// Sign a token for `user` without going through login.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt).unwrap()
}

pub fn idea_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "problem": "Assembly line stalls at station 4",
        "improvement": "Rebalance the station workload",
        "benefit": "productivity",
        "department": "Manufacturing",
        "estimated_savings": 5000,
    })
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect and parse a JSON response body.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
