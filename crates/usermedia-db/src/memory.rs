//! In-memory repositories backed by `HashMap`s.
//!
//! Used by integration tests and local experiments that should not
//! require a running Postgres instance. Behavior mirrors the Postgres
//! implementations, including the not-found semantics of the scoped
//! lookups.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use usermedia_core::models::{Gallery, UserMediaImage};
use usermedia_core::AppError;
use uuid::Uuid;

use crate::traits::{GalleryRepository, ImageListFilter, ImageRepository};
use async_trait::async_trait;

#[derive(Clone, Default)]
pub struct InMemoryImageRepository {
    images: Arc<Mutex<HashMap<Uuid, UserMediaImage>>>,
}

impl InMemoryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
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
    ) -> Result<UserMediaImage, AppError> {
        let now = Utc::now();
        let image = UserMediaImage {
            id,
            user_id,
            content_type,
            object_id,
            image_path,
            original_filename,
            file_size,
            thumb_x: None,
            thumb_y: None,
            thumb_x2: None,
            thumb_y2: None,
            thumb_w: None,
            thumb_h: None,
            thumbnail_paths,
            created_at: now,
            updated_at: now,
        };
        self.images.lock().unwrap().insert(id, image.clone());
        Ok(image)
    }

    async fn get(&self, id: Uuid) -> Result<Option<UserMediaImage>, AppError> {
        Ok(self.images.lock().unwrap().get(&id).cloned())
    }

    async fn get_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<UserMediaImage>, AppError> {
        Ok(self
            .images
            .lock()
            .unwrap()
            .get(&id)
            .filter(|image| image.user_id == user_id)
            .cloned())
    }

    async fn count_for_owner(
        &self,
        user_id: Uuid,
        content_type: &str,
        object_id: Uuid,
    ) -> Result<i64, AppError> {
        let count = self
            .images
            .lock()
            .unwrap()
            .values()
            .filter(|image| {
                image.user_id == user_id
                    && image.content_type.as_deref() == Some(content_type)
                    && image.object_id == Some(object_id)
            })
            .count();
        Ok(count as i64)
    }

    async fn list(
        &self,
        filter: ImageListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserMediaImage>, AppError> {
        let mut rows: Vec<UserMediaImage> = self
            .images
            .lock()
            .unwrap()
            .values()
            .filter(|image| {
                filter
                    .user_id
                    .map(|user_id| image.user_id == user_id)
                    .unwrap_or(true)
                    && filter
                        .content_type
                        .as_deref()
                        .map(|ct| image.content_type.as_deref() == Some(ct))
                        .unwrap_or(true)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update_file(
        &self,
        id: Uuid,
        image_path: String,
        original_filename: String,
        file_size: i64,
        thumbnail_paths: Vec<String>,
    ) -> Result<Option<UserMediaImage>, AppError> {
        let mut images = self.images.lock().unwrap();
        Ok(images.get_mut(&id).map(|image| {
            image.image_path = image_path;
            image.original_filename = original_filename;
            image.file_size = file_size;
            image.thumbnail_paths = thumbnail_paths;
            image.updated_at = Utc::now();
            image.clone()
        }))
    }

    async fn update_crop(
        &self,
        id: Uuid,
        x: i32,
        y: i32,
        x2: i32,
        y2: i32,
        w: i32,
        h: i32,
    ) -> Result<Option<UserMediaImage>, AppError> {
        let mut images = self.images.lock().unwrap();
        Ok(images.get_mut(&id).map(|image| {
            image.thumb_x = Some(x);
            image.thumb_y = Some(y);
            image.thumb_x2 = Some(x2);
            image.thumb_y2 = Some(y2);
            image.thumb_w = Some(w);
            image.thumb_h = Some(h);
            image.updated_at = Utc::now();
            image.clone()
        }))
    }

    async fn add_thumbnail_paths(
        &self,
        id: Uuid,
        paths: &[String],
    ) -> Result<Option<UserMediaImage>, AppError> {
        let mut images = self.images.lock().unwrap();
        Ok(images.get_mut(&id).map(|image| {
            for path in paths {
                if !image.thumbnail_paths.contains(path) {
                    image.thumbnail_paths.push(path.clone());
                }
            }
            image.updated_at = Utc::now();
            image.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<UserMediaImage>, AppError> {
        Ok(self.images.lock().unwrap().remove(&id))
    }

    async fn delete_for_owner(
        &self,
        user_id: Uuid,
        content_type: &str,
        object_id: Uuid,
    ) -> Result<Vec<UserMediaImage>, AppError> {
        let mut images = self.images.lock().unwrap();
        let ids: Vec<Uuid> = images
            .values()
            .filter(|image| {
                image.user_id == user_id
                    && image.content_type.as_deref() == Some(content_type)
                    && image.object_id == Some(object_id)
            })
            .map(|image| image.id)
            .collect();
        let mut removed: Vec<UserMediaImage> = ids
            .into_iter()
            .filter_map(|id| images.remove(&id))
            .collect();
        removed.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(removed)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryGalleryRepository {
    galleries: Arc<Mutex<HashMap<Uuid, Gallery>>>,
}

impl InMemoryGalleryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GalleryRepository for InMemoryGalleryRepository {
    async fn create(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: String,
        editor_ids: Vec<Uuid>,
    ) -> Result<Gallery, AppError> {
        let now = Utc::now();
        let gallery = Gallery {
            id,
            user_id,
            title,
            editor_ids,
            logo_image_id: None,
            created_at: now,
            updated_at: now,
        };
        self.galleries.lock().unwrap().insert(id, gallery.clone());
        Ok(gallery)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Gallery>, AppError> {
        Ok(self.galleries.lock().unwrap().get(&id).cloned())
    }

    async fn set_logo(
        &self,
        id: Uuid,
        image_id: Option<Uuid>,
    ) -> Result<Option<Gallery>, AppError> {
        let mut galleries = self.galleries.lock().unwrap();
        Ok(galleries.get_mut(&id).map(|gallery| {
            gallery.logo_image_id = image_id;
            gallery.updated_at = Utc::now();
            gallery.clone()
        }))
    }
}
