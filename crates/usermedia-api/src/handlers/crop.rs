//! Crop-box endpoint for the jQuery image-cropping widget.
//!
//! The widget POSTs the six Jcrop fields, and expects the refreshed small
//! thumbnail URL back as the bare response body.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, Method, StatusCode};
use usermedia_core::AppError;
use uuid::Uuid;

use crate::auth::UserContext;
use crate::error::HttpAppError;
use crate::handlers::require_ajax;
use crate::services::upload::{read_loose_form, render_thumbnail};
use crate::state::AppState;

const CROP_FIELDS: [&str; 6] = ["x", "y", "x2", "y2", "w", "h"];

fn crop_field(fields: &HashMap<String, String>, name: &str) -> Result<i32, AppError> {
    fields
        .get(name)
        .and_then(|value| value.trim().parse::<i32>().ok())
        .ok_or_else(|| AppError::InvalidCoordinates(format!("Field '{}' must be an integer", name)))
}

/// Store the posted crop box and answer with the URL of the re-rendered
/// small thumbnail. Anything but an AJAX POST reads as not-found, like the
/// other widget endpoints.
#[tracing::instrument(skip(state, request, headers, method), fields(user_id = %user.user_id, image_id = %id, operation = "crop_image"))]
pub async fn crop_image(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(id): Path<Uuid>,
    method: Method,
    headers: HeaderMap,
    request: Request,
) -> Result<(StatusCode, String), HttpAppError> {
    if method != Method::POST {
        return Err(AppError::NotFound("Not found".to_string()).into());
    }
    require_ajax(&headers)?;

    state
        .media
        .images
        .get_for_user(id, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    let fields = read_loose_form(request).await?;
    let [x, y, x2, y2, w, h] = {
        let mut parsed = [0i32; 6];
        for (slot, name) in parsed.iter_mut().zip(CROP_FIELDS) {
            *slot = crop_field(&fields, name)?;
        }
        parsed
    };

    let image = state
        .media
        .images
        .update_crop(id, x, y, x2, y2, w, h)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    tracing::info!(image_id = %id, "Crop box updated");

    let data = state.media.storage.download(&image.image_path).await?;
    let key = render_thumbnail(&state.media, &image, state.media.small_thumbnail, &data).await?;

    Ok((StatusCode::OK, state.media.storage.url(&key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_field_parses_trimmed_integers() {
        let mut fields = HashMap::new();
        fields.insert("x".to_string(), " 42 ".to_string());
        assert_eq!(crop_field(&fields, "x").unwrap(), 42);
    }

    #[test]
    fn test_crop_field_rejects_missing_and_malformed() {
        let mut fields = HashMap::new();
        fields.insert("y".to_string(), "12.5".to_string());
        assert!(matches!(
            crop_field(&fields, "y"),
            Err(AppError::InvalidCoordinates(_))
        ));
        assert!(matches!(
            crop_field(&fields, "x"),
            Err(AppError::InvalidCoordinates(_))
        ));
    }
}
