mod helpers;

use helpers::{TestApp, TestOptions};
use serde_json::Value;
use uuid::Uuid;

#[tokio::test]
async fn test_healthz_is_public() {
    let app = TestApp::spawn(TestOptions::default()).await;
    let response = app.server.get("/healthz").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_owner_can_fetch_video_record() {
    let app = TestApp::spawn(TestOptions::default()).await;
    let user_id = Uuid::new_v4();
    let video = app.videos.insert(user_id, "holiday");
    let token = app.token_for(user_id);

    let response = app
        .server
        .get(&format!("/api/videos/{}", video.id))
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], video.id.to_string());
    assert_eq!(body["title"], "holiday");
    assert!(body["video_url"].is_null());
}

#[tokio::test]
async fn test_fetch_requires_ownership() {
    let app = TestApp::spawn(TestOptions::default()).await;
    let video = app.videos.insert(Uuid::new_v4(), "private");
    let intruder_token = app.token_for(Uuid::new_v4());

    let response = app
        .server
        .get(&format!("/api/videos/{}", video.id))
        .authorization_bearer(&intruder_token)
        .await;
    response.assert_status_forbidden();
}

#[tokio::test]
async fn test_fetch_without_token_is_unauthorized() {
    let app = TestApp::spawn(TestOptions::default()).await;
    let video = app.videos.insert(Uuid::new_v4(), "private");

    let response = app.server.get(&format!("/api/videos/{}", video.id)).await;
    response.assert_status_unauthorized();
}
