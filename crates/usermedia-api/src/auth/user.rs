use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use uuid::Uuid;

use crate::error::ErrorResponse;

/// Acting end user, forwarded by the host application and stored in request
/// extensions by the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: Uuid,
}

// Implement FromRequestParts for UserContext to work with Multipart
// Extension cannot be used with Multipart, so we extract directly from request parts
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserContext>()
            .copied()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Missing user context".to_string(),
                        details: None,
                        error_type: None,
                        code: "MISSING_USER_CONTEXT".to_string(),
                        recoverable: false,
                        suggested_action: Some("Send the X-User-Id header".to_string()),
                    }),
                )
            })
    }
}
