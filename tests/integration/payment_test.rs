//! Purchase flow over HTTP.

use http::StatusCode;
use serde_json::json;

use afrifilm_core::config::SettlementMode;

use crate::helpers::{TestApp, TestUser};

async fn paid_film(app: &TestApp) -> (TestUser, uuid::Uuid) {
    let creator = app.creator("kouyate").await;
    let admin = app.admin("moderator").await;
    let id = app
        .approved_film(&creator, &admin, "Sia, le rêve du python", Some(3.5))
        .await;
    (admin, id)
}

fn confirm_body(transaction_id: &serde_json::Value, code: &str) -> serde_json::Value {
    json!({
        "transactionId": transaction_id,
        "phoneNumber": "77 123 45 67",
        "code": code,
    })
}

#[tokio::test]
async fn test_anonymous_purchase_requires_login() {
    let app = TestApp::new().await;
    let (_, id) = paid_film(&app).await;

    let response = app
        .request("POST", "/api/payment/create", Some(json!({ "contentId": id })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_free_content_cannot_be_bought() {
    let app = TestApp::new().await;
    let creator = app.creator("ndiaye").await;
    let admin = app.admin("moderator").await;
    let id = app.approved_film(&creator, &admin, "Karmen Geï", None).await;
    let viewer = app.viewer("aissatou").await;

    let response = app
        .request(
            "POST",
            "/api/payment/create",
            Some(json!({ "contentId": id })),
            Some(&viewer.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "CONTENT_IS_FREE");
}

#[tokio::test]
async fn test_unknown_content_is_not_found() {
    let app = TestApp::new().await;
    let viewer = app.viewer("ibrahima").await;

    let response = app
        .request(
            "POST",
            "/api/payment/create",
            Some(json!({ "contentId": uuid::Uuid::new_v4() })),
            Some(&viewer.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_purchase_then_confirm_grants_access() {
    let app = TestApp::new().await;
    let (_, id) = paid_film(&app).await;
    let viewer = app.viewer("seynabou").await;

    let created = app
        .request(
            "POST",
            "/api/payment/create",
            Some(json!({ "contentId": id })),
            Some(&viewer.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    let tx = &created.body["transaction"];
    assert_eq!(tx["isPaid"], false);
    assert_eq!(tx["amount"], 3.5);
    assert!(created.body["referenceNumber"].is_null());

    let again = app
        .request(
            "POST",
            "/api/payment/create",
            Some(json!({ "contentId": id })),
            Some(&viewer.token),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.code(), "PURCHASE_IN_PROGRESS");
    assert_eq!(again.body["transaction"]["id"], tx["id"]);

    let wrong_code = app
        .request(
            "POST",
            "/api/payment/confirm",
            Some(confirm_body(&tx["id"], "0000")),
            Some(&viewer.token),
        )
        .await;
    assert_eq!(wrong_code.status, StatusCode::BAD_REQUEST);

    let access = app
        .request("GET", &format!("/api/contents/{id}/access"), None, Some(&viewer.token))
        .await;
    assert_eq!(access.body["granted"], false);

    let confirmed = app
        .request(
            "POST",
            "/api/payment/confirm",
            Some(confirm_body(&tx["id"], "1234")),
            Some(&viewer.token),
        )
        .await;
    assert_eq!(confirmed.status, StatusCode::OK, "{:?}", confirmed.body);
    assert_eq!(confirmed.body["transaction"]["isPaid"], true);
    assert_eq!(confirmed.body["transaction"]["paymentMethod"], "orange_money");
    let reference = confirmed.body["referenceNumber"]
        .as_str()
        .expect("reference number");
    assert!(reference.starts_with("AFM-"));

    let access = app
        .request("GET", &format!("/api/contents/{id}/access"), None, Some(&viewer.token))
        .await;
    assert_eq!(
        access.body,
        json!({ "granted": true, "isFree": false, "isAdmin": false, "requiresPurchase": false })
    );

    let details = app
        .request("GET", &format!("/api/contents/{id}"), None, Some(&viewer.token))
        .await;
    assert_eq!(details.body["media"]["kind"], "FILM");

    let duplicate = app
        .request(
            "POST",
            "/api/payment/create",
            Some(json!({ "contentId": id })),
            Some(&viewer.token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.code(), "ALREADY_PURCHASED");
    assert_eq!(duplicate.body["transaction"]["id"], tx["id"]);

    let replay = app
        .request(
            "POST",
            "/api/payment/confirm",
            Some(confirm_body(&tx["id"], "1234")),
            Some(&viewer.token),
        )
        .await;
    assert_eq!(replay.status, StatusCode::OK);
    assert_eq!(replay.body["referenceNumber"], reference);
}

#[tokio::test]
async fn test_settle_on_create_grants_immediately() {
    let app = TestApp::with_config(|c| c.payment.settlement = SettlementMode::OnCreate).await;
    let (_, id) = paid_film(&app).await;
    let viewer = app.viewer("lamine").await;

    let created = app
        .request(
            "POST",
            "/api/payment/create",
            Some(json!({ "contentId": id })),
            Some(&viewer.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["transaction"]["isPaid"], true);
    assert!(created.body["referenceNumber"].is_string());

    let access = app
        .request("GET", &format!("/api/contents/{id}/access"), None, Some(&viewer.token))
        .await;
    assert_eq!(access.body["granted"], true);
}

#[tokio::test]
async fn test_confirm_rejects_bad_phone_number() {
    let app = TestApp::new().await;
    let (_, id) = paid_film(&app).await;
    let viewer = app.viewer("awa").await;

    let created = app
        .request(
            "POST",
            "/api/payment/create",
            Some(json!({ "contentId": id })),
            Some(&viewer.token),
        )
        .await;

    let response = app
        .request(
            "POST",
            "/api/payment/confirm",
            Some(json!({
                "transactionId": created.body["transaction"]["id"],
                "phoneNumber": "12ab",
                "code": "1234",
            })),
            Some(&viewer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_cannot_confirm_someone_elses_transaction() {
    let app = TestApp::new().await;
    let (_, id) = paid_film(&app).await;
    let buyer = app.viewer("buyer").await;
    let thief = app.viewer("thief").await;

    let created = app
        .request(
            "POST",
            "/api/payment/create",
            Some(json!({ "contentId": id })),
            Some(&buyer.token),
        )
        .await;

    let response = app
        .request(
            "POST",
            "/api/payment/confirm",
            Some(confirm_body(&created.body["transaction"]["id"], "1234")),
            Some(&thief.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_declined_payment_can_be_retried() {
    let app = TestApp::with_config(|c| c.payment.failure_probability = 1.0).await;
    let (_, id) = paid_film(&app).await;
    let viewer = app.viewer("moussa").await;

    let created = app
        .request(
            "POST",
            "/api/payment/create",
            Some(json!({ "contentId": id })),
            Some(&viewer.token),
        )
        .await;

    let declined = app
        .request(
            "POST",
            "/api/payment/confirm",
            Some(confirm_body(&created.body["transaction"]["id"], "1234")),
            Some(&viewer.token),
        )
        .await;
    assert_eq!(declined.status, StatusCode::BAD_REQUEST);
    assert_eq!(declined.code(), "PAYMENT_DECLINED");

    let access = app
        .request("GET", &format!("/api/contents/{id}/access"), None, Some(&viewer.token))
        .await;
    assert_eq!(access.body["granted"], false);
}

#[tokio::test]
async fn test_history_and_delete_cascade() {
    let app = TestApp::with_config(|c| c.payment.settlement = SettlementMode::OnCreate).await;
    let (admin, id) = paid_film(&app).await;
    let viewer = app.viewer("khady").await;

    app.request(
        "POST",
        "/api/payment/create",
        Some(json!({ "contentId": id })),
        Some(&viewer.token),
    )
    .await;

    let history = app
        .request("GET", "/api/payment/history", None, Some(&viewer.token))
        .await;
    assert_eq!(history.status, StatusCode::OK);
    assert_eq!(history.body["totalItems"], 1);
    assert_eq!(history.body["items"][0]["contentId"], id.to_string());

    let deleted = app
        .request("DELETE", &format!("/api/contents/{id}"), None, Some(&admin.token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(
        deleted.body,
        json!({ "deleted": true, "transactionsRemoved": 1 })
    );

    let history = app
        .request("GET", "/api/payment/history", None, Some(&viewer.token))
        .await;
    assert_eq!(history.body["totalItems"], 0);

    let access = app
        .request("GET", &format!("/api/contents/{id}/access"), None, Some(&viewer.token))
        .await;
    assert_eq!(access.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_requires_login() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/payment/history", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
