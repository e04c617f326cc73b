//! Repository trait abstractions
//!
//! These traits define the persistence interface for images and galleries,
//! allowing handlers and tests to run against Postgres or the in-memory
//! implementations without code changes.

use async_trait::async_trait;
use usermedia_core::error::AppError;
use usermedia_core::models::{Gallery, UserMediaImage};
use uuid::Uuid;

/// Filters for the admin image listing.
#[derive(Debug, Clone, Default)]
pub struct ImageListFilter {
    pub user_id: Option<Uuid>,
    pub content_type: Option<String>,
}

/// Image persistence operations
#[allow(clippy::too_many_arguments)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Insert a new image row. The caller generates the id up front because
    /// the storage key embeds it.
    async fn create(
        &self,
        id: Uuid,
        user_id: Uuid,
        content_type: Option<String>,
        object_id: Option<Uuid>,
        image_path: String,
        original_filename: String,
        file_size: i64,
        thumbnail_paths: Vec<String>,
    ) -> Result<UserMediaImage, AppError>;

    /// Fetch by id regardless of owner.
    async fn get(&self, id: Uuid) -> Result<Option<UserMediaImage>, AppError>;

    /// Fetch by id, restricted to `user_id`. A foreign image reads as absent.
    async fn get_for_user(&self, id: Uuid, user_id: Uuid)
        -> Result<Option<UserMediaImage>, AppError>;

    /// Count images one uploader has attached to one content object. The
    /// upload cap is enforced per uploader, so images other editors attached
    /// to the same object do not count against it.
    async fn count_for_owner(
        &self,
        user_id: Uuid,
        content_type: &str,
        object_id: Uuid,
    ) -> Result<i64, AppError>;

    /// Admin listing, newest first.
    async fn list(
        &self,
        filter: ImageListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserMediaImage>, AppError>;

    /// Replace the stored file reference after a re-upload. Crop fields are
    /// intentionally left unchanged; the stored box is re-applied to the new
    /// file.
    async fn update_file(
        &self,
        id: Uuid,
        image_path: String,
        original_filename: String,
        file_size: i64,
        thumbnail_paths: Vec<String>,
    ) -> Result<Option<UserMediaImage>, AppError>;

    /// Store the six crop widget fields verbatim.
    async fn update_crop(
        &self,
        id: Uuid,
        x: i32,
        y: i32,
        x2: i32,
        y2: i32,
        w: i32,
        h: i32,
    ) -> Result<Option<UserMediaImage>, AppError>;

    /// Record rendered thumbnail keys, deduplicated.
    async fn add_thumbnail_paths(
        &self,
        id: Uuid,
        paths: &[String],
    ) -> Result<Option<UserMediaImage>, AppError>;

    /// Delete one image row, returning it so the caller can remove the
    /// stored files by exact key.
    async fn delete(&self, id: Uuid) -> Result<Option<UserMediaImage>, AppError>;

    /// Delete every image one uploader attached to one content object,
    /// returning the rows for file cleanup.
    async fn delete_for_owner(
        &self,
        user_id: Uuid,
        content_type: &str,
        object_id: Uuid,
    ) -> Result<Vec<UserMediaImage>, AppError>;
}

/// Gallery persistence operations
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn create(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: String,
        editor_ids: Vec<Uuid>,
    ) -> Result<Gallery, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Gallery>, AppError>;

    /// Point the gallery logo at an image, or clear it with `None`.
    async fn set_logo(
        &self,
        id: Uuid,
        image_id: Option<Uuid>,
    ) -> Result<Option<Gallery>, AppError>;
}
