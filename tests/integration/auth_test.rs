//! Registration, login and identity resolution over HTTP.

use http::{StatusCode, header};
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_viewer() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "awa_diop",
                "email": "awa@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], "VIEWER");
    assert_eq!(response.body["isVerified"], false);
    assert!(response.body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_admin_is_forbidden() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "sneaky",
                "email": "sneaky@example.com",
                "password": PASSWORD,
                "role": "ADMIN",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let app = TestApp::new().await;
    app.viewer("kofi").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "kofi",
                "email": "other@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "kwame",
                "email": "not-an-email",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.viewer("fatou").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "fatou", "password": "wrong-password" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new().await;
    app.viewer("ousmane").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ousmane@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response
        .headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("session cookie");
    assert!(cookie.starts_with("afrifilm_session="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_me_with_bearer_and_cookie() {
    let app = TestApp::new().await;
    let user = app.viewer("mariama").await;

    let bearer = app
        .request("GET", "/api/auth/me", None, Some(&user.token))
        .await;
    assert_eq!(bearer.status, StatusCode::OK);
    assert_eq!(bearer.body["username"], "mariama");

    let cookie = app
        .request_with_cookie("GET", "/api/auth/me", &user.token)
        .await;
    assert_eq!(cookie.status, StatusCode::OK);
    assert_eq!(cookie.body["id"], user.id.to_string());
}

#[tokio::test]
async fn test_me_requires_valid_credentials() {
    let app = TestApp::new().await;

    let anonymous = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not.a.jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_other_secret_is_anonymous() {
    let issuer = TestApp::with_config(|c| c.auth.jwt_secret = "another-secret-fedcba9876543210".into())
        .await;
    let foreign = issuer.viewer("tariq").await;

    let app = TestApp::new().await;
    let response = app
        .request("GET", "/api/auth/me", None, Some(&foreign.token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
