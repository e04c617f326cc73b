//! User Media Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! owner abstraction shared across all user-media components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod owner;

// Re-export commonly used types
pub use config::{BaseConfig, Config, UserMediaConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use owner::{FieldBinding, Owner, OwnerRegistry, OwnerResolver};
