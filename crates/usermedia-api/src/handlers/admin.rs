//! Admin listing across all uploaders.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use usermedia_db::ImageListFilter;
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::services::upload::image_response;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    user_id: Option<Uuid>,
    content_type: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// List image rows newest first, optionally filtered by uploader and owner
/// type. Service-key auth only; this endpoint is not user-scoped.
#[tracing::instrument(skip(state), fields(operation = "admin_list_images"))]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AdminListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);
    let filter = ImageListFilter {
        user_id: query.user_id,
        content_type: query.content_type,
    };

    let images = state.media.images.list(filter, limit, offset).await?;
    let body: Vec<_> = images
        .into_iter()
        .map(|image| image_response(&state.media, image))
        .collect();

    Ok(Json(body))
}
