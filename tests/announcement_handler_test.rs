mod common;

use axum::http::StatusCode;
use bson::oid::ObjectId;
use common::{as_json, as_text, send_json, setup_app};
use serde_json::json;

#[tokio::test]
async fn test_announcement_lifecycle() {
    let app = setup_app().await;

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/announcements",
        Some(json!({ "title": "Party", "content": "Friday at six" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created = as_json(&body);
    assert_eq!(created["title"], "Party");
    assert!(created["createdAt"].is_string());
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &app.router,
        "PUT",
        &format!("/announcements/{}", id),
        Some(json!({ "content": "Saturday at six" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = as_json(&body);
    assert_eq!(updated["title"], "Party");
    assert_eq!(updated["content"], "Saturday at six");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (_, body) = send_json(&app.router, "GET", "/announcements", None).await;
    let all = as_json(&body);
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["content"], "Saturday at six");

    let (status, body) = send_json(&app.router, "DELETE", &format!("/announcements/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["_id"], created["_id"]);

    let (_, body) = send_json(&app.router, "GET", "/announcements", None).await;
    assert!(as_json(&body).as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_announcement_is_not_found() {
    let app = setup_app().await;
    let missing = ObjectId::new().to_hex();

    let (status, body) = send_json(
        &app.router,
        "PUT",
        &format!("/announcements/{}", missing),
        Some(json!({ "title": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_text(&body), "Announcement not found");

    let (status, _) = send_json(&app.router, "DELETE", "/announcements/bogus", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unreadable_announcement_is_bad_request() {
    let app = setup_app().await;
    let (status, _) = send_json(&app.router, "POST", "/announcements", Some(json!({ "title": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
