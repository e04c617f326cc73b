//! Admin listing integration tests.
//!
//! Run with: `cargo test -p usermedia-api --test admin_test`
//! Runs fully in-process against the in-memory repositories and a temp-dir
//! storage backend, so no external services are needed.

mod helpers;

use helpers::fixtures::minimal_png;
use helpers::{api_path, image_form, setup_test_app, RequestExt, TestApp, TEST_SERVICE_API_KEY};
use uuid::Uuid;

async fn upload_orphan_named(app: &TestApp, user: Uuid, name: &str) {
    let response = app
        .client()
        .post(&api_path("/images"))
        .authed(user)
        .multipart(image_form(name, minimal_png()).add_text("next", "/done"))
        .await;
    assert_eq!(response.status_code(), 303);
}

#[tokio::test]
async fn test_admin_list_requires_service_key() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/admin/images")).await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_admin_list_spans_all_users() {
    let app = setup_test_app().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    upload_orphan_named(&app, alice, "first.png").await;
    upload_orphan_named(&app, bob, "second.png").await;
    upload_orphan_named(&app, alice, "third.png").await;

    // The service key alone is enough; no acting user is involved.
    let response = app
        .client()
        .get(&api_path("/admin/images"))
        .add_header("Authorization", format!("Bearer {}", TEST_SERVICE_API_KEY))
        .await;

    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    let rows = data.as_array().expect("listing array");
    assert_eq!(rows.len(), 3);

    let names: Vec<&str> = rows
        .iter()
        .filter_map(|row| row["filename"].as_str())
        .collect();
    // Newest first.
    assert_eq!(names, vec!["third.png", "second.png", "first.png"]);
}

#[tokio::test]
async fn test_admin_list_filters_by_user_and_content_type() {
    let app = setup_test_app().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let gallery_id = app.seed_gallery(bob, Vec::new()).await;

    upload_orphan_named(&app, alice, "orphan.png").await;
    let response = app
        .client()
        .post(&api_path(&format!("/images/gallery/{}", gallery_id)))
        .authed(bob)
        .multipart(image_form("attached.png", minimal_png()))
        .await;
    assert_eq!(response.status_code(), 303);

    let response = app
        .client()
        .get(&api_path("/admin/images"))
        .add_header("Authorization", format!("Bearer {}", TEST_SERVICE_API_KEY))
        .add_query_param("user_id", alice.to_string())
        .await;
    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    let rows = data.as_array().expect("listing array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["filename"].as_str(), Some("orphan.png"));

    let response = app
        .client()
        .get(&api_path("/admin/images"))
        .add_header("Authorization", format!("Bearer {}", TEST_SERVICE_API_KEY))
        .add_query_param("content_type", "gallery")
        .await;
    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    let rows = data.as_array().expect("listing array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["filename"].as_str(), Some("attached.png"));
}

#[tokio::test]
async fn test_admin_list_paginates() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();

    for name in ["first.png", "second.png", "third.png"] {
        upload_orphan_named(&app, user, name).await;
    }

    let response = app
        .client()
        .get(&api_path("/admin/images"))
        .add_header("Authorization", format!("Bearer {}", TEST_SERVICE_API_KEY))
        .add_query_param("limit", "1")
        .add_query_param("offset", "1")
        .await;

    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    let rows = data.as_array().expect("listing array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["filename"].as_str(), Some("second.png"));
}
