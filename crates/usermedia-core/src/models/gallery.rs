use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A gallery images can be attached to. Besides its owner, listed editors
/// may manage attached images; the `logo` image field accepts single-field
/// uploads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Gallery {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub editor_ids: Vec<Uuid>,
    pub logo_image_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Gallery {
    pub fn absolute_url(&self) -> String {
        format!("/galleries/{}", self.id)
    }

    pub fn can_edit(&self, user_id: Uuid) -> bool {
        self.user_id == user_id || self.editor_ids.contains(&user_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct NewGallery {
    pub title: String,
    #[serde(default)]
    pub editor_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub editor_ids: Vec<Uuid>,
    pub logo_image_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Gallery> for GalleryResponse {
    fn from(gallery: Gallery) -> Self {
        GalleryResponse {
            id: gallery.id,
            user_id: gallery.user_id,
            title: gallery.title,
            editor_ids: gallery.editor_ids,
            logo_image_id: gallery.logo_image_id,
            created_at: gallery.created_at,
            updated_at: gallery.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editors_can_edit() {
        let owner = Uuid::new_v4();
        let editor = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let gallery = Gallery {
            id: Uuid::new_v4(),
            user_id: owner,
            title: "Summer".to_string(),
            editor_ids: vec![editor],
            logo_image_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(gallery.can_edit(owner));
        assert!(gallery.can_edit(editor));
        assert!(!gallery.can_edit(stranger));
    }

    #[test]
    fn test_absolute_url_contains_id() {
        let gallery = Gallery {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Trips".to_string(),
            editor_ids: vec![],
            logo_image_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(
            gallery.absolute_url(),
            format!("/galleries/{}", gallery.id)
        );
    }
}
