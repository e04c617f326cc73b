//! Image CRUD backing the plain HTML forms: create, fetch, re-upload,
//! delete. Mutations answer with a 303 redirect resolved from the `next`
//! contract; the JSON fetch backs the detail view.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, Request, State};
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use serde::Deserialize;
use usermedia_core::models::UserMediaImage;
use usermedia_core::{AppError, Owner};
use uuid::Uuid;

use crate::auth::UserContext;
use crate::error::HttpAppError;
use crate::handlers::resolve_owner;
use crate::services::redirects::resolve_success_url;
use crate::services::upload::{
    delete_image_files, image_response, read_loose_form, read_upload_form, store_original,
};
use crate::state::AppState;

/// Query-string half of the `next` redirect contract. The form-body `next`
/// wins when both are present.
#[derive(Debug, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

/// Owner of an attached image, for the redirect fallback. Detached images
/// and unresolvable owners both read as `None`.
async fn owner_of(state: &AppState, image: &UserMediaImage) -> Option<Box<dyn Owner>> {
    let content_type = image.content_type.as_deref()?;
    let object_id = image.object_id?;
    let resolver = state.owners.registry.get(content_type)?;
    resolver.resolve(object_id).await.ok().flatten()
}

#[tracing::instrument(skip(state, multipart), fields(user_id = %user.user_id, operation = "create_image"))]
pub async fn create_image(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Query(query): Query<NextQuery>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut form = read_upload_form(multipart, "image").await?;
    let file = form.require_file()?;
    let stored = store_original(&state.media, user.user_id, &file).await?;

    let image = state
        .media
        .images
        .create(
            Uuid::new_v4(),
            user.user_id,
            None,
            None,
            stored.image_path,
            stored.filename,
            stored.file_size,
            Vec::new(),
        )
        .await?;

    tracing::info!(image_id = %image.id, "Image created");

    let url = resolve_success_url(form.field("next"), query.next.as_deref(), None)?;
    Ok(Redirect::to(&url))
}

#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = %user.user_id, content_type = %content_type, object_id = %object_id, operation = "create_attached_image")
)]
pub async fn create_attached_image(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path((content_type, object_id)): Path<(String, Uuid)>,
    Query(query): Query<NextQuery>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let owner = resolve_owner(&state, &content_type, object_id).await?;
    if owner.owning_user() != Some(user.user_id) {
        return Err(AppError::NotFound("Not found".to_string()).into());
    }

    let mut form = read_upload_form(multipart, "image").await?;

    if form.field("replace") == Some("true") {
        let removed = state
            .media
            .images
            .delete_for_owner(user.user_id, &content_type, object_id)
            .await?;
        for image in &removed {
            delete_image_files(&state.media, image).await;
        }
        if !removed.is_empty() {
            tracing::info!(replaced = removed.len(), "Replaced existing images");
        }
    }

    let file = form.require_file()?;
    let stored = store_original(&state.media, user.user_id, &file).await?;

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

    tracing::info!(image_id = %image.id, "Image created");

    let url = resolve_success_url(
        form.field("next"),
        query.next.as_deref(),
        Some(owner.as_ref()),
    )?;
    Ok(Redirect::to(&url))
}

#[tracing::instrument(skip(state), fields(user_id = %user.user_id, image_id = %id, operation = "get_image"))]
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let image = state
        .media
        .images
        .get_for_user(id, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    Ok(Json(image_response(&state.media, image)))
}

#[tracing::instrument(skip(state, multipart), fields(user_id = %user.user_id, image_id = %id, operation = "update_image"))]
pub async fn update_image(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(id): Path<Uuid>,
    Query(query): Query<NextQuery>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let existing = state
        .media
        .images
        .get_for_user(id, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    let mut form = read_upload_form(multipart, "image").await?;
    let file = form.require_file()?;
    let stored = store_original(&state.media, user.user_id, &file).await?;

    let updated = state
        .media
        .images
        .update_file(
            id,
            stored.image_path,
            stored.filename,
            stored.file_size,
            Vec::new(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    // The old original and its thumbnails are unreachable once the row
    // points at the new key.
    delete_image_files(&state.media, &existing).await;

    tracing::info!(image_id = %updated.id, "Image file replaced");

    let owner = owner_of(&state, &updated).await;
    let url = resolve_success_url(form.field("next"), query.next.as_deref(), owner.as_deref())?;
    Ok(Redirect::to(&url))
}

#[tracing::instrument(skip(state, request), fields(user_id = %user.user_id, image_id = %id, operation = "delete_image"))]
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(id): Path<Uuid>,
    Query(query): Query<NextQuery>,
    request: Request,
) -> Result<impl IntoResponse, HttpAppError> {
    let image = state
        .media
        .images
        .get_for_user(id, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    // Resolve the redirect target before the row disappears.
    let owner = owner_of(&state, &image).await;
    let fields = read_loose_form(request).await?;

    let deleted = state
        .media
        .images
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;
    delete_image_files(&state.media, &deleted).await;

    tracing::info!(image_id = %id, "Image deleted");

    let url = resolve_success_url(
        fields.get("next").map(String::as_str),
        query.next.as_deref(),
        owner.as_deref(),
    )?;
    Ok(Redirect::to(&url))
}
