//! Service authentication.
//!
//! The host application authenticates every request with a shared service
//! key and forwards the acting end user in the `X-User-Id` header.

pub mod middleware;
pub mod user;

pub use middleware::{auth_middleware, AuthState};
pub use user::UserContext;
