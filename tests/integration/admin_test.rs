//! Moderation, user administration and health endpoints.

use http::StatusCode;
use serde_json::json;

use afrifilm_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_moderation_requires_admin() {
    let app = TestApp::new().await;
    let creator = app.creator("hondo").await;
    let id = app.film(&creator, "Sarraounia", Some(2.0)).await;

    let pending = app
        .request("GET", "/api/admin/contents/pending", None, Some(&creator.token))
        .await;
    assert_eq!(pending.status, StatusCode::FORBIDDEN);

    let approve = app
        .request(
            "POST",
            &format!("/api/admin/contents/{id}/approve"),
            None,
            Some(&creator.token),
        )
        .await;
    assert_eq!(approve.status, StatusCode::FORBIDDEN);

    let anonymous = app
        .request("GET", "/api/admin/users", None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reject_hides_approved_content() {
    let app = TestApp::new().await;
    let creator = app.creator("ouedraogo").await;
    let admin = app.admin("moderator").await;
    let id = app.approved_film(&creator, &admin, "Yaaba", Some(2.5)).await;

    let rejected = app
        .request(
            "POST",
            &format!("/api/admin/contents/{id}/reject"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.body["isApproved"], false);

    let public = app
        .request("GET", &format!("/api/contents/{id}"), None, None)
        .await;
    assert_eq!(public.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_verify_creator_unlocks_publishing() {
    let app = TestApp::new().await;
    let admin = app.admin("moderator").await;
    let creator = app.user("hopeful", UserRole::Creator, false).await;

    let verified = app
        .request(
            "POST",
            &format!("/api/admin/users/{}/verify", creator.id),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(verified.status, StatusCode::OK);
    assert_eq!(verified.body["isVerified"], true);

    // Verification is read from the store, so the old token now publishes.
    app.film(&creator, "First Light", Some(1.0)).await;
}

#[tokio::test]
async fn test_only_creators_can_be_verified() {
    let app = TestApp::new().await;
    let admin = app.admin("moderator").await;
    let viewer = app.viewer("just_watching").await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/users/{}/verify", viewer.id),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users() {
    let app = TestApp::new().await;
    let admin = app.admin("moderator").await;
    app.viewer("one").await;
    app.creator("two").await;

    let response = app
        .request("GET", "/api/admin/users?per_page=2", None, Some(&admin.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalItems"], 3);
    assert_eq!(response.body["items"].as_array().map(Vec::len), Some(2));
    assert!(response.body["items"][0].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = TestApp::new().await;

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let ready = app.request("GET", "/api/health/ready", None, None).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(
        ready.body,
        json!({ "status": "ready", "database": "memory", "cache": "connected" })
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/nowhere", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
