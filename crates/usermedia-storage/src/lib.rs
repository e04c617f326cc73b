//! User Media Storage Library
//!
//! This crate provides the storage abstraction and the local filesystem
//! implementation used for user-uploaded files.
//!
//! # Storage key format
//!
//! Keys are user-scoped and caller-generated through the `keys` module:
//!
//! - **Originals**: `user_media/{user_id}/images/{image_id}.{ext}`
//! - **Thumbnails**: `user_media/{user_id}/images/thumbs/{image_id}_{W}x{H}[_{x}-{y}-{x2}-{y2}].{ext}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so every caller stays consistent.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::{image_key, thumbnail_key};
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
