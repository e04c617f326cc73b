//! Shared upload plumbing for the image handlers.
//!
//! Multipart form reading, filename sanitizing, and the store-and-thumbnail
//! pipeline every upload endpoint goes through.

use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use usermedia_core::models::UserMediaImage;
use usermedia_core::AppError;
use usermedia_processing::{format_for_extension, ResizeDimensions, Thumbnailer};
use usermedia_storage::{image_key, thumbnail_key};
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::MediaState;

/// One uploaded file from a multipart form.
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Parsed upload form: at most one file plus the remaining text fields.
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Take the file, rejecting the request when none was sent.
    pub fn require_file(&mut self) -> Result<UploadedFile, AppError> {
        self.file
            .take()
            .ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))
    }
}

/// Read an upload form. The file is accepted under `file_field`; every other
/// field is collected as text. Multiple file fields are rejected.
pub async fn read_upload_form(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<UploadForm, AppError> {
    let mut file: Option<UploadedFile> = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == file_field {
            if file.is_some() {
                return Err(AppError::InvalidInput(format!(
                    "Multiple file fields are not allowed; send exactly one field named '{}'",
                    file_field
                )));
            }
            let filename = field
                .file_name()
                .map(|s: &str| s.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let content_type = field
                .content_type()
                .map(|s: &str| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            file = Some(UploadedFile {
                data: data.to_vec(),
                filename,
                content_type,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read field: {}", e)))?;
            fields.insert(field_name, value);
        }
    }

    Ok(UploadForm { file, fields })
}

/// Read text fields from a request that may carry either a urlencoded or a
/// multipart body. Requests without a form body yield an empty map.
pub async fn read_loose_form(request: Request) -> Result<HashMap<String, String>, AppError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?;
        let mut fields = HashMap::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
        {
            let name = field.name().map(|s| s.to_string()).unwrap_or_default();
            let value = field
                .text()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read field: {}", e)))?;
            fields.insert(name, value);
        }
        return Ok(fields);
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(request, &())
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read form: {}", e)))?;
        return Ok(fields);
    }

    Ok(HashMap::new())
}

/// Sanitize filename to prevent path traversal and invalid characters.
/// Returns an error if the filename contains path traversal attempts.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    const MAX_FILENAME_LENGTH: usize = 255;

    // Checked on the raw input so traversal in a directory part is caught
    // before the path components are stripped.
    if filename.contains("..") {
        return Err(AppError::InvalidInput(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() || sanitized.len() < 3 {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}

/// A validated upload written to storage.
pub struct StoredOriginal {
    /// Storage key of the original file.
    pub image_path: String,
    /// Sanitized filename recorded on the row.
    pub filename: String,
    pub file_size: i64,
}

/// Validate an upload and write the original under a fresh random key.
pub async fn store_original(
    media: &MediaState,
    user_id: Uuid,
    file: &UploadedFile,
) -> Result<StoredOriginal, HttpAppError> {
    let filename = sanitize_filename(&file.filename)?;
    media
        .validator
        .validate_all(&filename, &file.content_type, &file.data)?;

    let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    let key = image_key(user_id, Uuid::new_v4(), &extension);
    media.storage.upload(&key, file.data.clone()).await?;

    Ok(StoredOriginal {
        image_path: key,
        filename,
        file_size: file.data.len() as i64,
    })
}

/// Render one thumbnail for `image` with its current crop box, store it, and
/// record the key on the row. Returns the storage key.
pub async fn render_thumbnail(
    media: &MediaState,
    image: &UserMediaImage,
    dimensions: ResizeDimensions,
    data: &[u8],
) -> Result<String, HttpAppError> {
    let extension = image
        .extension()
        .ok_or_else(|| AppError::ImageProcessing("Stored file has no extension".to_string()))?;
    let format = format_for_extension(extension).ok_or_else(|| {
        AppError::ImageProcessing(format!("Unsupported image format: {}", extension))
    })?;

    let crop_box = image.box_coordinates();
    let (data, (width, height)) = Thumbnailer::render(data, crop_box, dimensions, format)
        .map_err(|e| AppError::ImageProcessing(e.to_string()))?;

    let key = thumbnail_key(image.user_id, image.id, width, height, crop_box, extension);
    media.storage.upload(&key, data).await?;
    media
        .images
        .add_thumbnail_paths(image.id, std::slice::from_ref(&key))
        .await?;

    Ok(key)
}

/// Public URL for the thumbnail of `image` at `dimensions`, when that exact
/// rendition (same geometry and crop box) has been stored.
pub fn thumbnail_url_if_rendered(
    media: &MediaState,
    image: &UserMediaImage,
    dimensions: ResizeDimensions,
) -> Option<String> {
    let width = dimensions.width?;
    let height = dimensions.height?;
    let extension = image.extension()?;
    let key = thumbnail_key(
        image.user_id,
        image.id,
        width,
        height,
        image.box_coordinates(),
        extension,
    );
    image
        .thumbnail_paths
        .contains(&key)
        .then(|| media.storage.url(&key))
}

/// Build the JSON view of a row, with thumbnail URLs for the renditions that
/// exist in storage.
pub fn image_response(
    media: &MediaState,
    image: UserMediaImage,
) -> usermedia_core::models::ImageResponse {
    let url = media.storage.url(&image.image_path);
    let large = thumbnail_url_if_rendered(media, &image, media.large_thumbnail);
    let small = thumbnail_url_if_rendered(media, &image, media.small_thumbnail);
    usermedia_core::models::ImageResponse::new(image, url, large, small)
}

/// Remove an image's stored files by their exact keys. Failures are logged
/// and skipped so a half-cleaned storage backend cannot block row deletion.
pub async fn delete_image_files(media: &MediaState, image: &UserMediaImage) {
    for key in std::iter::once(&image.image_path).chain(image.thumbnail_paths.iter()) {
        if let Err(err) = media.storage.delete(key).await {
            tracing::warn!(storage_key = %key, error = %err, "Failed to delete stored file");
        }
    }
}

/// Markup the upload widget inserts into its file list.
pub fn list_item_html(image_id: Uuid, thumbnail_url: &str, delete_url: &str) -> String {
    format!(
        "<li class=\"user-media-image\" data-image-id=\"{id}\">\
         <img src=\"{thumb}\" alt=\"\">\
         <a class=\"user-media-image-delete\" href=\"{delete}\">Delete</a>\
         </li>",
        id = image_id,
        thumb = thumbnail_url,
        delete = delete_url,
    )
}
