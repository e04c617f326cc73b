//! Crop endpoint integration tests.
//!
//! Run with: `cargo test -p usermedia-api --test crop_test`
//! Runs fully in-process against the in-memory repositories and a temp-dir
//! storage backend, so no external services are needed.

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::fixtures::encoded_png;
use helpers::{api_path, image_form, setup_test_app, RequestExt, TestApp};
use usermedia_core::models::UserMediaImage;
use usermedia_db::{ImageListFilter, ImageRepository};
use usermedia_storage::thumbnail_key;
use uuid::Uuid;

const CROP_FORM: [(&str, &str); 6] = [
    ("x", "10"),
    ("y", "20"),
    ("x2", "210"),
    ("y2", "170"),
    ("w", "200"),
    ("h", "150"),
];

/// Upload one orphan image for `user` and return its row.
async fn upload_orphan(app: &TestApp, user: Uuid) -> UserMediaImage {
    let response = app
        .client()
        .post(&api_path("/images"))
        .authed(user)
        .multipart(image_form("party.png", encoded_png(300, 300)).add_text("next", "/done"))
        .await;
    assert_eq!(response.status_code(), 303);

    let rows = app
        .images
        .list(ImageListFilter::default(), 10, 0)
        .await
        .unwrap();
    rows.into_iter().next().expect("uploaded image row")
}

#[tokio::test]
async fn test_crop_requires_post() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();
    let row = upload_orphan(&app, user).await;

    let response = app
        .client()
        .get(&api_path(&format!("/images/{}/crop", row.id)))
        .authed(user)
        .ajax()
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_crop_requires_ajax() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();
    let row = upload_orphan(&app, user).await;

    let response = app
        .client()
        .post(&api_path(&format!("/images/{}/crop", row.id)))
        .authed(user)
        .form(&CROP_FORM)
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_crop_is_scoped_to_uploader() {
    let app = setup_test_app().await;
    let row = upload_orphan(&app, Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&api_path(&format!("/images/{}/crop", row.id)))
        .authed(Uuid::new_v4())
        .ajax()
        .form(&CROP_FORM)
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_crop_rejects_malformed_coordinates() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();
    let row = upload_orphan(&app, user).await;
    let path = api_path(&format!("/images/{}/crop", row.id));

    // Missing field.
    let response = app
        .client()
        .post(&path)
        .authed(user)
        .ajax()
        .form(&[("x", "10"), ("y", "20")])
        .await;
    assert_eq!(response.status_code(), 422);
    let data: serde_json::Value = response.json();
    assert_eq!(data["code"].as_str(), Some("INVALID_COORDINATES"));

    // Non-integer field.
    let response = app
        .client()
        .post(&path)
        .authed(user)
        .ajax()
        .form(&[
            ("x", "abc"),
            ("y", "20"),
            ("x2", "210"),
            ("y2", "170"),
            ("w", "200"),
            ("h", "150"),
        ])
        .await;
    assert_eq!(response.status_code(), 422);

    // The stored row is untouched.
    let unchanged = app.images.get(row.id).await.unwrap().unwrap();
    assert!(unchanged.box_coordinates().is_none());
}

#[tokio::test]
async fn test_crop_updates_box_and_returns_thumbnail_url() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();
    let row = upload_orphan(&app, user).await;

    let response = app
        .client()
        .post(&api_path(&format!("/images/{}/crop", row.id)))
        .authed(user)
        .ajax()
        .form(&CROP_FORM)
        .await;

    assert_eq!(response.status_code(), 200);
    let expected_key = thumbnail_key(user, row.id, 95, 95, Some((10, 20, 210, 170)), "png");
    assert_eq!(
        response.text(),
        format!("http://localhost:3000/media/{}", expected_key)
    );

    let cropped = app.images.get(row.id).await.unwrap().unwrap();
    assert_eq!(cropped.box_coordinates(), Some((10, 20, 210, 170)));
    assert_eq!(cropped.thumb_w, Some(200));
    assert_eq!(cropped.thumb_h, Some(150));
    assert!(cropped.thumbnail_paths.contains(&expected_key));
    assert!(app._temp_dir.path().join(&expected_key).exists());

    // The image view now reports the freshly rendered small thumbnail.
    let response = app
        .client()
        .get(&api_path(&format!("/images/{}", row.id)))
        .authed(user)
        .await;
    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    assert_eq!(
        data["small_thumbnail_url"].as_str(),
        Some(format!("http://localhost:3000/media/{}", expected_key).as_str())
    );
    assert_eq!(
        data["box_coordinates"],
        serde_json::json!([10, 20, 210, 170])
    );
}

#[tokio::test]
async fn test_crop_accepts_multipart_fields() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();
    let row = upload_orphan(&app, user).await;

    let mut form = MultipartForm::new();
    for (name, value) in CROP_FORM {
        form = form.add_text(name, value);
    }
    let response = app
        .client()
        .post(&api_path(&format!("/images/{}/crop", row.id)))
        .authed(user)
        .ajax()
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    let cropped = app.images.get(row.id).await.unwrap().unwrap();
    assert_eq!(cropped.box_coordinates(), Some((10, 20, 210, 170)));
}

#[tokio::test]
async fn test_recrop_renders_a_new_rendition() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();
    let row = upload_orphan(&app, user).await;
    let path = api_path(&format!("/images/{}/crop", row.id));

    let response = app
        .client()
        .post(&path)
        .authed(user)
        .ajax()
        .form(&CROP_FORM)
        .await;
    assert_eq!(response.status_code(), 200);
    let first_url = response.text();

    let response = app
        .client()
        .post(&path)
        .authed(user)
        .ajax()
        .form(&[
            ("x", "0"),
            ("y", "0"),
            ("x2", "100"),
            ("y2", "100"),
            ("w", "100"),
            ("h", "100"),
        ])
        .await;
    assert_eq!(response.status_code(), 200);
    let second_url = response.text();

    assert_ne!(first_url, second_url);
    let second_key = thumbnail_key(user, row.id, 95, 95, Some((0, 0, 100, 100)), "png");
    assert!(second_url.ends_with(&second_key));
    assert!(app._temp_dir.path().join(&second_key).exists());
}
