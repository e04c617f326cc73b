//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p usermedia-api --test images_test`
//! or `cargo test -p usermedia-api`. Tests run against the in-memory
//! repositories and temp-dir local storage; no database is required.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestRequest, TestServer};
use tempfile::TempDir;
use usermedia_api::constants;
use usermedia_api::owners::GalleryResolver;
use usermedia_api::setup::routes;
use usermedia_api::state::{AppState, MediaState, OwnerState};
use usermedia_core::{BaseConfig, Config, OwnerRegistry, OwnerResolver, UserMediaConfig};
use usermedia_db::{
    GalleryRepository, ImageRepository, InMemoryGalleryRepository, InMemoryImageRepository,
};
use usermedia_processing::{ImageValidator, ResizeDimensions};
use usermedia_storage::{LocalStorage, Storage};
use uuid::Uuid;

/// Service key every test request authenticates with (min 32 chars).
pub const TEST_SERVICE_API_KEY: &str = "test-service-api-key-at-least-32-chars-long";

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus direct handles on the repositories.
pub struct TestApp {
    pub server: TestServer,
    pub images: Arc<InMemoryImageRepository>,
    pub galleries: Arc<InMemoryGalleryRepository>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Seed a gallery owned by `owner` with the given extra editors.
    pub async fn seed_gallery(&self, owner: Uuid, editor_ids: Vec<Uuid>) -> Uuid {
        let gallery = self
            .galleries
            .create(Uuid::new_v4(), owner, "Holiday shots".to_string(), editor_ids)
            .await
            .expect("Failed to seed gallery");
        gallery.id
    }
}

/// Request decorations every endpoint needs: service key and acting user.
pub trait RequestExt {
    fn authed(self, user_id: Uuid) -> Self;
    fn ajax(self) -> Self;
}

impl RequestExt for TestRequest {
    fn authed(self, user_id: Uuid) -> Self {
        self.add_header("Authorization", format!("Bearer {}", TEST_SERVICE_API_KEY))
            .add_header("X-User-Id", user_id.to_string())
    }

    fn ajax(self) -> Self {
        self.add_header("X-Requested-With", "XMLHttpRequest")
    }
}

/// Multipart form with one PNG file under the `image` field.
pub fn image_form(filename: &str, bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(bytes).file_name(filename).mime_type("image/png"),
    )
}

/// Setup test app backed by in-memory repositories.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_resolvers(Vec::new()).await
}

/// Same as [setup_test_app], with extra owner resolvers registered.
pub async fn setup_test_app_with_resolvers(extra: Vec<Arc<dyn OwnerResolver>>) -> TestApp {
    let images = Arc::new(InMemoryImageRepository::new());
    let galleries = Arc::new(InMemoryGalleryRepository::new());

    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(
            temp_dir.path().to_path_buf(),
            "http://localhost:3000/media".to_string(),
        )
        .await
        .expect("Failed to create local storage"),
    );

    let config = create_test_config();

    let validator = Arc::new(ImageValidator::new(
        config.max_file_size_bytes(),
        config.allowed_extensions().to_vec(),
        config.allowed_content_types().to_vec(),
    ));

    let mut registry = OwnerRegistry::new();
    registry.register(Arc::new(GalleryResolver::new(
        galleries.clone() as Arc<dyn GalleryRepository>
    )));
    for resolver in extra {
        registry.register(resolver);
    }

    let state = Arc::new(AppState {
        media: MediaState {
            images: images.clone() as Arc<dyn ImageRepository>,
            storage,
            validator,
            large_thumbnail: ResizeDimensions {
                width: Some(150),
                height: Some(150),
            },
            small_thumbnail: ResizeDimensions {
                width: Some(95),
                height: Some(95),
            },
            upload_maximum: 3,
        },
        owners: OwnerState {
            registry,
            galleries: galleries.clone() as Arc<dyn GalleryRepository>,
        },
        config: config.clone(),
        is_production: false,
    });

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        images,
        galleries,
        _temp_dir: temp_dir,
    }
}

fn create_test_config() -> Config {
    Config(Box::new(UserMediaConfig {
        base: BaseConfig {
            server_port: 3000,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 5,
            db_timeout_seconds: 30,
            environment: "test".to_string(),
        },
        database_url: "postgres://unused-in-tests".to_string(),
        service_api_key: TEST_SERVICE_API_KEY.to_string(),
        local_storage_path: "/tmp/usermedia-test".to_string(),
        local_storage_base_url: "http://localhost:3000/media".to_string(),
        max_file_size_bytes: 10 * 1024 * 1024,
        allowed_extensions: vec![
            "jpg".into(),
            "jpeg".into(),
            "png".into(),
            "gif".into(),
            "webp".into(),
        ],
        allowed_content_types: vec![
            "image/jpeg".into(),
            "image/png".into(),
            "image/gif".into(),
            "image/webp".into(),
        ],
        thumbnail_large_size: "150x150".to_string(),
        thumbnail_small_size: "95x95".to_string(),
        upload_maximum: 3,
    }))
}
