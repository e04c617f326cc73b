//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain.

mod gallery;
mod image;

// Re-export all models for convenient imports
pub use gallery::*;
pub use image::*;
