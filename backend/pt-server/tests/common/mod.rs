#![allow(dead_code)]

//! Test infrastructure for pt-server API tests

use pt_auth::{
    AuthError, AuthorizationRequest, IdentityProvider, PasswordHasher, Result as AuthResult,
    TokenIssuer,
};
use pt_core::ProviderProfile;
use pt_server::{AppState, build_router};

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;
use uuid::Uuid;

pub const ACCESS_SECRET: &[u8] = b"server-test-access-secret-32-bytes!!";
pub const REFRESH_SECRET: &[u8] = b"server-test-refresh-secret-32-bytes!";
pub const CALLBACK_PATH: &str = "/api/auth/oauth/callback";
pub const SUCCESS_REDIRECT: &str = "/";
pub const PASSWORD: &str = "correct-horse";

pub const STUB_PKCE_VERIFIER: &str = "stub-pkce-verifier";
pub const STUB_AUTHORIZE_URL: &str = "https://provider.test/authorize";
/// Code the stub provider refuses to exchange
pub const FAILING_CODE: &str = "provider-says-no";

/// Provider double: issues a fresh state per request and returns a fixed profile
pub struct StubProvider {
    pub profile: ProviderProfile,
}

#[async_trait]
impl IdentityProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn authorization_request(&self) -> AuthorizationRequest {
        let state = Uuid::new_v4().to_string();
        AuthorizationRequest {
            url: format!("{}?state={}", STUB_AUTHORIZE_URL, state),
            state,
            pkce_verifier: STUB_PKCE_VERIFIER.to_string(),
        }
    }

    async fn exchange(&self, code: &str, pkce_verifier: &str) -> AuthResult<ProviderProfile> {
        if code == FAILING_CODE {
            return Err(AuthError::provider("token endpoint returned 500"));
        }
        if pkce_verifier != STUB_PKCE_VERIFIER {
            return Err(AuthError::provider("PKCE verification failed"));
        }
        Ok(self.profile.clone())
    }
}

pub fn stub_profile() -> ProviderProfile {
    ProviderProfile {
        provider_id: "stub-user-42".to_string(),
        email: "federated@example.com".to_string(),
        display_name: "Federated User".to_string(),
    }
}

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    pt_db::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_issuer() -> Arc<TokenIssuer> {
    Arc::new(TokenIssuer::new(ACCESS_SECRET, REFRESH_SECRET))
}

async fn build_app(provider: Option<ProviderProfile>) -> (Router, SqlitePool) {
    let pool = create_test_pool().await;
    let hasher = PasswordHasher::new(8, 1, 1).expect("Failed to build hasher");
    let provider = provider
        .map(|profile| Arc::new(StubProvider { profile }) as Arc<dyn IdentityProvider>);

    let state = AppState::new(
        pool.clone(),
        test_issuer(),
        hasher,
        provider,
        SUCCESS_REDIRECT.to_string(),
    );

    (build_router(state, CALLBACK_PATH), pool)
}

/// Router with OAuth disabled
pub async fn create_test_app() -> (Router, SqlitePool) {
    build_app(None).await
}

/// Router whose OAuth provider always answers with `profile`
pub async fn create_test_app_with_provider(profile: ProviderProfile) -> (Router, SqlitePool) {
    build_app(Some(profile)).await
}

// =============================================================================
// Requests
// =============================================================================

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_json_request(method: &str, uri: &str, access_token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, format!("accessToken={}", access_token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn authed_request(method: &str, uri: &str, access_token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, format!("accessToken={}", access_token))
        .body(Body::empty())
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// =============================================================================
// Responses
// =============================================================================

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn set_cookies<B>(response: &Response<B>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// Value of `name` among the response's Set-Cookie headers
pub fn cookie_value<B>(response: &Response<B>, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    set_cookies(response).into_iter().find_map(|cookie| {
        cookie
            .strip_prefix(&prefix)
            .and_then(|rest| rest.split(';').next())
            .map(str::to_string)
    })
}

pub fn location<B>(response: &Response<B>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}

// =============================================================================
// Flows
// =============================================================================

pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

/// Register through the API and return the issued cookies
pub async fn register(app: &Router, email: &str) -> Session {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": email, "name": "Test User", "password": PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), 200, "registration of {} failed", email);

    Session {
        access_token: cookie_value(&response, "accessToken").unwrap(),
        refresh_token: cookie_value(&response, "refreshToken").unwrap(),
    }
}

/// Create a problem through the API and return its id
pub async fn create_problem(app: &Router, access_token: &str, next_review_date: &str) -> String {
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/problems",
            access_token,
            json!({
                "title": "Two Sum",
                "description": "Hash map lookup",
                "difficulty": "easy",
                "next_review_date": next_review_date,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), 201);

    body_json(response).await["problem"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}
