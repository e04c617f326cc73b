use std::sync::Arc;

use async_trait::async_trait;
use usermedia_core::models::Gallery;
use usermedia_core::{AppError, FieldBinding, Owner, OwnerResolver};
use usermedia_db::GalleryRepository;
use uuid::Uuid;

/// The one image field single-field uploads may bind to.
const LOGO_FIELD: &str = "logo";

struct GalleryOwner(Gallery);

impl Owner for GalleryOwner {
    fn owning_user(&self) -> Option<Uuid> {
        Some(self.0.user_id)
    }

    fn absolute_url(&self) -> Option<String> {
        Some(self.0.absolute_url())
    }

    // Listed editors manage attached images alongside the owner.
    fn user_can_edit(&self, user_id: Uuid) -> bool {
        self.0.can_edit(user_id)
    }
}

/// Resolves gallery owners and binds logo uploads.
pub struct GalleryResolver {
    galleries: Arc<dyn GalleryRepository>,
}

impl GalleryResolver {
    pub fn new(galleries: Arc<dyn GalleryRepository>) -> Self {
        Self { galleries }
    }
}

#[async_trait]
impl OwnerResolver for GalleryResolver {
    fn content_type(&self) -> &'static str {
        "gallery"
    }

    async fn resolve(&self, object_id: Uuid) -> Result<Option<Box<dyn Owner>>, AppError> {
        let gallery = self.galleries.get(object_id).await?;
        Ok(gallery.map(|gallery| Box::new(GalleryOwner(gallery)) as Box<dyn Owner>))
    }

    async fn set_image_field(
        &self,
        object_id: Uuid,
        field: &str,
        image_id: Uuid,
    ) -> Result<FieldBinding, AppError> {
        if field != LOGO_FIELD {
            return Ok(FieldBinding::UnknownField);
        }
        self.galleries
            .set_logo(object_id, Some(image_id))
            .await?
            .ok_or_else(|| AppError::NotFound("Gallery not found".to_string()))?;
        Ok(FieldBinding::Bound)
    }
}
