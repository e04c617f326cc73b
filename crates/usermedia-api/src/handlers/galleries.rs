//! Gallery endpoints: the owner type this service ships with.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use usermedia_core::models::{GalleryResponse, NewGallery};
use usermedia_core::AppError;
use uuid::Uuid;

use crate::auth::UserContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

#[tracing::instrument(skip(state, payload), fields(user_id = %user.user_id, operation = "create_gallery"))]
pub async fn create_gallery(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    ValidatedJson(payload): ValidatedJson<NewGallery>,
) -> Result<impl IntoResponse, HttpAppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title must not be empty".to_string()).into());
    }

    let gallery = state
        .owners
        .galleries
        .create(
            Uuid::new_v4(),
            user.user_id,
            payload.title,
            payload.editor_ids,
        )
        .await?;

    tracing::info!(gallery_id = %gallery.id, "Gallery created");

    Ok((StatusCode::CREATED, Json(GalleryResponse::from(gallery))))
}

#[tracing::instrument(skip(state), fields(gallery_id = %id, operation = "get_gallery"))]
pub async fn get_gallery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let gallery = state
        .owners
        .galleries
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Gallery not found".to_string()))?;

    Ok(Json(GalleryResponse::from(gallery)))
}
