//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use afrifilm_api::{AppState, Stores, build_app};
use afrifilm_cache::CacheManager;
use afrifilm_core::config::AppConfig;
use afrifilm_database::MemoryStore;
use afrifilm_entity::user::UserRole;

/// Password every seeded account uses.
pub const PASSWORD: &str = "savanna-reel-2024";

/// Test application context
pub struct TestApp {
    /// The full application, middleware included
    pub router: Router,
    /// Wired services, for seeding
    pub state: AppState,
}

/// A seeded account and its session token.
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

impl TestApp {
    /// Create a test application with deterministic payments.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
        config.payment.failure_probability = 0.0;
        adjust(&mut config);

        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let state = AppState::new(config, Stores::memory(MemoryStore::new()), cache, None);
        let router = build_app(state.clone());

        Self { router, state }
    }

    /// Create an account directly and log it in over HTTP.
    pub async fn user(&self, username: &str, role: UserRole, verified: bool) -> TestUser {
        let user = self
            .state
            .accounts
            .create_user(
                username,
                &format!("{username}@example.com"),
                PASSWORD,
                role,
                verified,
            )
            .await
            .expect("Failed to create test user");
        let token = self.login(username, PASSWORD).await;
        TestUser { id: user.id, token }
    }

    pub async fn viewer(&self, username: &str) -> TestUser {
        self.user(username, UserRole::Viewer, false).await
    }

    pub async fn creator(&self, username: &str) -> TestUser {
        self.user(username, UserRole::Creator, true).await
    }

    pub async fn admin(&self, username: &str) -> TestUser {
        self.user(username, UserRole::Admin, true).await
    }

    /// Login and return the session token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "username": username, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Publish a film as `creator` and approve it as `admin`.
    pub async fn approved_film(
        &self,
        creator: &TestUser,
        admin: &TestUser,
        title: &str,
        price: Option<f64>,
    ) -> Uuid {
        let id = self.film(creator, title, price).await;
        let response = self
            .request(
                "POST",
                &format!("/api/admin/contents/{id}/approve"),
                None,
                Some(&admin.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        id
    }

    /// Publish a film as `creator`, left pending.
    pub async fn film(&self, creator: &TestUser, title: &str, price: Option<f64>) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/contents",
                Some(json!({
                    "title": title,
                    "description": "A story from Dakar",
                    "price": price,
                    "media": {
                        "kind": "FILM",
                        "videoUrl": "https://cdn.example.com/films/master.m3u8",
                        "duration": 95
                    }
                })),
                Some(&creator.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    /// Make an HTTP request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(req, body).await
    }

    /// Make an HTTP request carrying a session cookie
    pub async fn request_with_cookie(&self, method: &str, path: &str, token: &str) -> TestResponse {
        let cookie = format!("{}={token}", self.state.config.auth.session_cookie_name);
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::COOKIE, cookie);
        self.send(req, None).await
    }

    async fn send(&self, req: http::request::Builder, body: Option<Value>) -> TestResponse {
        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&body).expect("Failed to serialize body"),
                )),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `id` field of the body.
    pub fn id(&self) -> Uuid {
        self.body["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No id in response body")
    }

    /// The error code of an error body.
    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}
