//! Gallery endpoint integration tests.
//!
//! Run with: `cargo test -p usermedia-api --test galleries_test`
//! Runs fully in-process against the in-memory repositories and a temp-dir
//! storage backend, so no external services are needed.

mod helpers;

use helpers::fixtures::encoded_png;
use helpers::{api_path, image_form, setup_test_app, RequestExt};
use uuid::Uuid;

#[tokio::test]
async fn test_create_gallery_and_fetch_it() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();
    let editor = Uuid::new_v4();

    let response = app
        .client()
        .post(&api_path("/galleries"))
        .authed(user)
        .json(&serde_json::json!({
            "title": "Summer 2026",
            "editor_ids": [editor],
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let data: serde_json::Value = response.json();
    assert_eq!(data["title"].as_str(), Some("Summer 2026"));
    assert_eq!(data["user_id"].as_str(), Some(user.to_string().as_str()));
    assert_eq!(
        data["editor_ids"][0].as_str(),
        Some(editor.to_string().as_str())
    );
    assert!(data["logo_image_id"].is_null());
    let gallery_id = data["id"].as_str().expect("gallery id").to_string();

    let response = app
        .client()
        .get(&api_path(&format!("/galleries/{}", gallery_id)))
        .authed(user)
        .await;
    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    assert_eq!(data["title"].as_str(), Some("Summer 2026"));
}

#[tokio::test]
async fn test_create_gallery_requires_title() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/galleries"))
        .authed(Uuid::new_v4())
        .json(&serde_json::json!({ "title": "   " }))
        .await;

    assert_eq!(response.status_code(), 400);
    let data: serde_json::Value = response.json();
    assert!(data["error"]
        .as_str()
        .unwrap_or("")
        .contains("Title must not be empty"));
}

#[tokio::test]
async fn test_create_gallery_defaults_to_no_editors() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/galleries"))
        .authed(Uuid::new_v4())
        .json(&serde_json::json!({ "title": "Just mine" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let data: serde_json::Value = response.json();
    assert_eq!(data["editor_ids"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_create_gallery_rejects_malformed_editor_ids() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/galleries"))
        .authed(Uuid::new_v4())
        .json(&serde_json::json!({
            "title": "Broken",
            "editor_ids": [1, 2],
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let data: serde_json::Value = response.json();
    assert!(data["error"].as_str().unwrap_or("").contains("editor_ids"));
}

#[tokio::test]
async fn test_get_missing_gallery_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path(&format!("/galleries/{}", Uuid::new_v4())))
        .authed(Uuid::new_v4())
        .await;

    assert_eq!(response.status_code(), 404);
    let data: serde_json::Value = response.json();
    assert_eq!(data["error"].as_str(), Some("Gallery not found"));
}

#[tokio::test]
async fn test_created_gallery_accepts_uploads() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();

    let response = app
        .client()
        .post(&api_path("/galleries"))
        .authed(user)
        .json(&serde_json::json!({ "title": "Upload target" }))
        .await;
    assert_eq!(response.status_code(), 201);
    let data: serde_json::Value = response.json();
    let gallery_id = data["id"].as_str().expect("gallery id").to_string();

    let response = app
        .client()
        .post(&api_path(&format!("/uploads/gallery/{}", gallery_id)))
        .authed(user)
        .ajax()
        .multipart(image_form("party.png", encoded_png(300, 300)))
        .await;

    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    assert_eq!(data["files"].as_array().map(Vec::len), Some(1));
}
