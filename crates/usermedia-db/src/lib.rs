//! User Media Database Library
//!
//! Repository traits and their Postgres implementations. The in-memory
//! implementations in `memory` back integration tests and local development
//! without a database.

pub mod galleries;
pub mod images;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use galleries::PgGalleryRepository;
pub use images::PgImageRepository;
pub use memory::{InMemoryGalleryRepository, InMemoryImageRepository};
pub use traits::{GalleryRepository, ImageListFilter, ImageRepository};
