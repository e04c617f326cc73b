//! Built-in owner types.
//!
//! Galleries are the one owner type this service ships with; additional
//! resolvers are registered at setup time.

pub mod gallery;

pub use gallery::GalleryResolver;
