//! Catalog browsing, publishing and deletion over HTTP.

use http::StatusCode;
use serde_json::json;

use afrifilm_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_unverified_creator_cannot_publish() {
    let app = TestApp::new().await;
    let creator = app.user("newcomer", UserRole::Creator, false).await;

    let response = app
        .request(
            "POST",
            "/api/contents",
            Some(json!({
                "title": "Tilaï",
                "price": 3.0,
                "media": { "kind": "FILM", "videoUrl": "https://cdn.example.com/tilai.m3u8" }
            })),
            Some(&creator.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_viewer_cannot_publish() {
    let app = TestApp::new().await;
    let viewer = app.viewer("binta").await;

    let response = app
        .request(
            "POST",
            "/api/contents",
            Some(json!({
                "title": "Yeelen",
                "media": { "kind": "FILM", "videoUrl": "https://cdn.example.com/yeelen.m3u8" }
            })),
            Some(&viewer.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_pending_content_hidden_until_approved() {
    let app = TestApp::new().await;
    let creator = app.creator("sembene").await;
    let admin = app.admin("moderator").await;
    let id = app.film(&creator, "Moolaadé", Some(4.5)).await;

    let listing = app.request("GET", "/api/contents", None, None).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["totalItems"], 0);

    let anonymous = app
        .request("GET", &format!("/api/contents/{id}"), None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::NOT_FOUND);

    let owner = app
        .request("GET", &format!("/api/contents/{id}"), None, Some(&creator.token))
        .await;
    assert_eq!(owner.status, StatusCode::OK);
    assert_eq!(owner.body["isApproved"], false);

    let approved = app
        .request(
            "POST",
            &format!("/api/admin/contents/{id}/approve"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);

    let listing = app
        .request("GET", "/api/contents?kind=FILM", None, None)
        .await;
    assert_eq!(listing.body["totalItems"], 1);
    assert_eq!(listing.body["items"][0]["id"], id.to_string());
}

#[tokio::test]
async fn test_paid_content_hides_media_from_anonymous() {
    let app = TestApp::new().await;
    let creator = app.creator("mambety").await;
    let admin = app.admin("moderator").await;
    let id = app
        .approved_film(&creator, &admin, "Touki Bouki", Some(2.99))
        .await;

    let anonymous = app
        .request("GET", &format!("/api/contents/{id}"), None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.body["title"], "Touki Bouki");
    assert_eq!(anonymous.body["access"]["granted"], false);
    assert_eq!(anonymous.body["access"]["requiresPurchase"], true);
    assert!(anonymous.body.get("media").is_none());

    let owner = app
        .request("GET", &format!("/api/contents/{id}"), None, Some(&creator.token))
        .await;
    assert_eq!(owner.body["access"]["granted"], true);
    assert_eq!(owner.body["access"]["isAdmin"], true);
    assert_eq!(owner.body["media"]["kind"], "FILM");
}

#[tokio::test]
async fn test_free_content_is_open_to_everyone() {
    let app = TestApp::new().await;
    let creator = app.creator("kouyate").await;
    let admin = app.admin("moderator").await;
    let id = app.approved_film(&creator, &admin, "Keïta", None).await;

    let access = app
        .request("GET", &format!("/api/contents/{id}/access"), None, None)
        .await;
    assert_eq!(access.status, StatusCode::OK);
    assert_eq!(
        access.body,
        json!({ "granted": true, "isFree": true, "isAdmin": false, "requiresPurchase": false })
    );

    let details = app
        .request("GET", &format!("/api/contents/{id}"), None, None)
        .await;
    assert_eq!(
        details.body["media"]["videoUrl"],
        "https://cdn.example.com/films/master.m3u8"
    );
}

#[tokio::test]
async fn test_admin_published_series_is_approved() {
    let app = TestApp::new().await;
    let admin = app.admin("curator").await;

    let response = app
        .request(
            "POST",
            "/api/contents",
            Some(json!({
                "title": "Aya of Yop City",
                "price": 6.0,
                "media": {
                    "kind": "SERIE",
                    "seasons": [{
                        "number": 1,
                        "title": "Yopougon",
                        "episodes": [
                            { "number": 2, "videoUrl": "https://cdn.example.com/aya/s1e2.m3u8" },
                            { "number": 1, "videoUrl": "https://cdn.example.com/aya/s1e1.m3u8" }
                        ]
                    }]
                }
            })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["kind"], "SERIE");
    assert_eq!(response.body["isApproved"], true);

    let id = response.id();
    let details = app
        .request("GET", &format!("/api/contents/{id}"), None, Some(&admin.token))
        .await;
    let episodes = &details.body["media"]["seasons"][0]["episodes"];
    assert_eq!(episodes[0]["number"], 1);
    assert_eq!(episodes[1]["number"], 2);
}

#[tokio::test]
async fn test_duplicate_episode_numbers_rejected() {
    let app = TestApp::new().await;
    let creator = app.creator("abderrahmane").await;

    let response = app
        .request(
            "POST",
            "/api/contents",
            Some(json!({
                "title": "Timbuktu Tales",
                "price": 3.0,
                "media": {
                    "kind": "SERIE",
                    "seasons": [{
                        "number": 1,
                        "episodes": [
                            { "number": 1, "videoUrl": "https://cdn.example.com/t/1.m3u8" },
                            { "number": 1, "videoUrl": "https://cdn.example.com/t/1b.m3u8" }
                        ]
                    }]
                }
            })),
            Some(&creator.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_price_rejected() {
    let app = TestApp::new().await;
    let creator = app.creator("gomis").await;

    let response = app
        .request(
            "POST",
            "/api/contents",
            Some(json!({
                "title": "Félicité",
                "price": -2.0,
                "media": { "kind": "FILM", "videoUrl": "https://cdn.example.com/felicite.m3u8" }
            })),
            Some(&creator.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_edit_resets_approval() {
    let app = TestApp::new().await;
    let creator = app.creator("diop").await;
    let admin = app.admin("moderator").await;
    let id = app
        .approved_film(&creator, &admin, "Atlantique", Some(5.0))
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/contents/{id}"),
            Some(json!({ "price": null })),
            Some(&creator.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["isApproved"], false);
    assert!(response.body["price"].is_null());

    let pending = app
        .request("GET", "/api/admin/contents/pending", None, Some(&admin.token))
        .await;
    assert_eq!(pending.body["totalItems"], 1);
}

#[tokio::test]
async fn test_other_creator_cannot_edit_or_delete() {
    let app = TestApp::new().await;
    let owner = app.creator("owner").await;
    let rival = app.creator("rival").await;
    let admin = app.admin("moderator").await;
    let id = app.approved_film(&owner, &admin, "La Noire de...", Some(1.5)).await;

    let edit = app
        .request(
            "PUT",
            &format!("/api/contents/{id}"),
            Some(json!({ "title": "Hijacked" })),
            Some(&rival.token),
        )
        .await;
    assert_eq!(edit.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", &format!("/api/contents/{id}"), None, Some(&rival.token))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_creator_dashboard_lists_own_content() {
    let app = TestApp::new().await;
    let creator = app.creator("sissako").await;
    let other = app.creator("other").await;
    app.film(&creator, "Bamako", Some(3.0)).await;
    app.film(&creator, "Heremakono", None).await;
    app.film(&other, "Elsewhere", None).await;

    let response = app
        .request("GET", "/api/creator/contents", None, Some(&creator.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalItems"], 2);

    let viewer = app.viewer("fan").await;
    let forbidden = app
        .request("GET", "/api/creator/contents", None, Some(&viewer.token))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_content_id_is_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", "/api/contents/not-a-uuid", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let app = TestApp::new().await;
    let creator = app.creator("mambety").await;
    let admin = app.admin("moderator").await;
    app.approved_film(&creator, &admin, "Touki Bouki", Some(3.0)).await;

    let listing = app
        .request("GET", "/api/contents?page=18446744073709551615&per_page=100", None, None)
        .await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["totalItems"], 1);
    assert_eq!(listing.body["items"].as_array().map(Vec::len), Some(0));

    let viewer = app.viewer("cinephile").await;
    let history = app
        .request(
            "GET",
            "/api/payment/history?page=18446744073709551615",
            None,
            Some(&viewer.token),
        )
        .await;
    assert_eq!(history.status, StatusCode::OK);
    assert_eq!(history.body["items"].as_array().map(Vec::len), Some(0));
}
