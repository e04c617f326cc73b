//! HTTP handlers, grouped per domain.

pub mod admin;
pub mod crop;
pub mod galleries;
pub mod images;
pub mod uploads;

use axum::http::HeaderMap;
use usermedia_core::constants::{REQUESTED_WITH_HEADER, XML_HTTP_REQUEST};
use usermedia_core::{AppError, Owner};
use uuid::Uuid;

use crate::state::AppState;

/// The upload widgets mark their calls with `X-Requested-With`; endpoints
/// reserved for them treat anything else as not-found.
pub(crate) fn require_ajax(headers: &HeaderMap) -> Result<(), AppError> {
    let flagged = headers
        .get(REQUESTED_WITH_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == XML_HTTP_REQUEST)
        .unwrap_or(false);
    if flagged {
        Ok(())
    } else {
        Err(AppError::NotFound("Not found".to_string()))
    }
}

/// Resolve an owner object. An unknown content type and a missing object
/// report the same not-found error, so probing URLs reveals nothing.
pub(crate) async fn resolve_owner(
    state: &AppState,
    content_type: &str,
    object_id: Uuid,
) -> Result<Box<dyn Owner>, AppError> {
    let resolver = state
        .owners
        .registry
        .get(content_type)
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;
    resolver
        .resolve(object_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))
}
