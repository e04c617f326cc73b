//! AJAX upload endpoints for the bundled jQuery uploader widget.
//!
//! Both answer the widget's wire format: a `files` array with one entry per
//! stored image, served with a `files.json` content disposition. The multi
//! endpoint enforces the per-uploader cap; the single endpoint additionally
//! binds the image to a named field on the owner.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use usermedia_core::models::{UploadedFileEntry, UploadedFilesResponse, UserMediaImage};
use usermedia_core::{AppError, FieldBinding};
use uuid::Uuid;

use crate::auth::UserContext;
use crate::constants::API_PREFIX;
use crate::error::HttpAppError;
use crate::handlers::{require_ajax, resolve_owner};
use crate::services::upload::{
    delete_image_files, list_item_html, read_upload_form, render_thumbnail, store_original,
    UploadedFile,
};
use crate::state::AppState;

const FILES_JSON_DISPOSITION: &str = "inline; filename=files.json";

fn widget_response(
    state: &AppState,
    image: &UserMediaImage,
    thumbnail_key: &str,
    client_filename: String,
) -> impl IntoResponse {
    let thumbnail_url = state.media.storage.url(thumbnail_key);
    let entry = UploadedFileEntry {
        name: client_filename,
        url: state.media.storage.url(&image.image_path),
        thumbnail_url: thumbnail_url.clone(),
        list_item_html: list_item_html(
            image.id,
            &thumbnail_url,
            &format!("{}/images/{}/delete", API_PREFIX, image.id),
        ),
    };

    (
        [(header::CONTENT_DISPOSITION, FILES_JSON_DISPOSITION)],
        Json(UploadedFilesResponse {
            files: vec![entry],
        }),
    )
}

async fn store_attached(
    state: &AppState,
    user: UserContext,
    content_type: String,
    object_id: Uuid,
    file: &UploadedFile,
) -> Result<UserMediaImage, HttpAppError> {
    let stored = store_original(&state.media, user.user_id, file).await?;
    let image = state
        .media
        .images
        .create(
            Uuid::new_v4(),
            user.user_id,
            Some(content_type),
            Some(object_id),
            stored.image_path,
            stored.filename,
            stored.file_size,
            Vec::new(),
        )
        .await?;
    Ok(image)
}

#[tracing::instrument(
    skip(state, multipart, headers),
    fields(user_id = %user.user_id, content_type = %content_type, object_id = %object_id, operation = "multi_upload")
)]
pub async fn multi_upload(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path((content_type, object_id)): Path<(String, Uuid)>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    require_ajax(&headers)?;
    let owner = resolve_owner(&state, &content_type, object_id).await?;
    if !owner.user_can_edit(user.user_id) {
        return Err(AppError::NotFound("Not found".to_string()).into());
    }

    let mut form = read_upload_form(multipart, "image").await?;

    // The widget may lower the cap per form; an absent or malformed value
    // falls back to the configured default.
    let maximum = form
        .field("maximum")
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(state.media.upload_maximum);
    let used = state
        .media
        .images
        .count_for_owner(user.user_id, &content_type, object_id)
        .await?;
    if used >= maximum {
        return Err(AppError::UploadLimitExceeded {
            used,
            limit: maximum,
        }
        .into());
    }

    let file = form.require_file()?;
    let image = store_attached(&state, user, content_type, object_id, &file).await?;
    let thumbnail_key =
        render_thumbnail(&state.media, &image, state.media.small_thumbnail, &file.data).await?;

    tracing::info!(image_id = %image.id, "Image uploaded");

    Ok(widget_response(&state, &image, &thumbnail_key, file.filename))
}

#[tracing::instrument(
    skip(state, multipart, headers),
    fields(user_id = %user.user_id, content_type = %content_type, object_id = %object_id, field = %field, operation = "single_field_upload")
)]
pub async fn single_field_upload(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path((content_type, object_id, field)): Path<(String, Uuid, String)>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    require_ajax(&headers)?;
    let resolver = state
        .owners
        .registry
        .get(&content_type)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;
    let owner = resolver
        .resolve(object_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;
    if !owner.user_can_edit(user.user_id) {
        return Err(AppError::NotFound("Not found".to_string()).into());
    }

    let mut form = read_upload_form(multipart, "image").await?;
    let file = form.require_file()?;
    let image = store_attached(&state, user, content_type, object_id, &file).await?;

    match resolver.set_image_field(object_id, &field, image.id).await {
        Ok(FieldBinding::Bound) => {}
        Ok(FieldBinding::UnknownField) => {
            discard_image(&state, &image).await;
            return Err(AppError::NotFound("Not found".to_string()).into());
        }
        Err(err) => {
            discard_image(&state, &image).await;
            return Err(err.into());
        }
    }

    let thumbnail_key =
        render_thumbnail(&state.media, &image, state.media.large_thumbnail, &file.data).await?;

    tracing::info!(image_id = %image.id, field = %field, "Image uploaded and bound");

    Ok(widget_response(&state, &image, &thumbnail_key, file.filename))
}

/// Roll back a stored image whose field binding did not happen.
async fn discard_image(state: &AppState, image: &UserMediaImage) {
    if let Err(err) = state.media.images.delete(image.id).await {
        tracing::warn!(image_id = %image.id, error = %err, "Failed to remove unbound image row");
    }
    delete_image_files(&state.media, image).await;
}
