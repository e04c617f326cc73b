use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user-uploaded image, optionally attached to a content object.
///
/// `content_type` and `object_id` are either both set (attached) or both
/// NULL (orphan, e.g. uploaded before its target object exists). The four
/// `thumb_*` corners plus `thumb_w`/`thumb_h` mirror the crop widget fields
/// verbatim; `box_coordinates` derives the crop box from the corners alone.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserMediaImage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_type: Option<String>,
    pub object_id: Option<Uuid>,
    /// Storage key of the original file.
    pub image_path: String,
    pub original_filename: String,
    pub file_size: i64,
    pub thumb_x: Option<i32>,
    pub thumb_y: Option<i32>,
    pub thumb_x2: Option<i32>,
    pub thumb_y2: Option<i32>,
    pub thumb_w: Option<i32>,
    pub thumb_h: Option<i32>,
    /// Storage keys of every thumbnail rendered for this image.
    pub thumbnail_paths: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserMediaImage {
    /// Crop box as (x, y, x2, y2). Only set when all four corners are set;
    /// a partial box is treated as no box at all.
    pub fn box_coordinates(&self) -> Option<(i32, i32, i32, i32)> {
        match (self.thumb_x, self.thumb_y, self.thumb_x2, self.thumb_y2) {
            (Some(x), Some(y), Some(x2), Some(y2)) => Some((x, y, x2, y2)),
            _ => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.content_type.is_some() && self.object_id.is_some()
    }

    /// Lowercase file extension taken from the storage key.
    pub fn extension(&self) -> Option<&str> {
        self.image_path
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && !ext.contains('/'))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<Uuid>,
    pub filename: String,
    pub url: String,
    pub large_thumbnail_url: Option<String>,
    pub small_thumbnail_url: Option<String>,
    pub file_size: i64,
    pub box_coordinates: Option<[i32; 4]>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ImageResponse {
    pub fn new(
        image: UserMediaImage,
        url: String,
        large_thumbnail_url: Option<String>,
        small_thumbnail_url: Option<String>,
    ) -> Self {
        let box_coordinates = image.box_coordinates().map(|(x, y, x2, y2)| [x, y, x2, y2]);
        ImageResponse {
            id: image.id,
            user_id: image.user_id,
            content_type: image.content_type,
            object_id: image.object_id,
            filename: image.original_filename,
            url,
            large_thumbnail_url,
            small_thumbnail_url,
            file_size: image.file_size,
            box_coordinates,
            created_at: image.created_at,
            updated_at: image.updated_at,
        }
    }
}

/// One entry of the AJAX uploader response.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadedFileEntry {
    pub name: String,
    pub url: String,
    pub thumbnail_url: String,
    pub list_item_html: String,
}

/// Body of the AJAX uploader response. The bundled jQuery widget expects the
/// entries under a `files` key.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadedFilesResponse {
    pub files: Vec<UploadedFileEntry>,
}
