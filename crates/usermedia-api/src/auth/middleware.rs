use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use usermedia_core::AppError;
use uuid::Uuid;

use crate::auth::user::UserContext;
use crate::error::HttpAppError;

/// Header naming the acting end user.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Clone)]
pub struct AuthState {
    pub service_api_key: String,
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    if !auth_header.starts_with("Bearer ") {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    }

    let token = &auth_header[7..]; // Remove "Bearer " prefix
    if !secure_compare(token, &auth_state.service_api_key) {
        return HttpAppError(AppError::Unauthorized("Invalid service key".to_string()))
            .into_response();
    }

    // The user header is optional here; endpoints acting on behalf of a user
    // reject requests without it through the UserContext extractor.
    if let Some(raw) = request.headers().get(USER_ID_HEADER) {
        match raw.to_str().ok().and_then(|s| Uuid::parse_str(s.trim()).ok()) {
            Some(user_id) => {
                request.extensions_mut().insert(UserContext { user_id });
            }
            None => {
                return HttpAppError(AppError::Unauthorized(
                    "Invalid X-User-Id header".to_string(),
                ))
                .into_response();
            }
        }
    }

    next.run(request).await
}
