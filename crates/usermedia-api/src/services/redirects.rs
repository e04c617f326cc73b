//! Success-URL resolution for the redirect-style endpoints.

use usermedia_core::{AppError, Owner};

/// Resolve the post-operation redirect target. The form's `next` field wins,
/// then the query string's, then the owner's public URL. With none of the
/// three the caller is misconfigured and gets an explicit error.
pub fn resolve_success_url(
    next_from_body: Option<&str>,
    next_from_query: Option<&str>,
    owner: Option<&dyn Owner>,
) -> Result<String, AppError> {
    if let Some(next) = next_from_body.filter(|next| !next.is_empty()) {
        return Ok(next.to_string());
    }
    if let Some(next) = next_from_query.filter(|next| !next.is_empty()) {
        return Ok(next.to_string());
    }
    if let Some(url) = owner.and_then(|owner| owner.absolute_url()) {
        return Ok(url);
    }
    Err(AppError::MissingRedirectTarget(
        "No next parameter given and no owner with a URL attached".to_string(),
    ))
}
