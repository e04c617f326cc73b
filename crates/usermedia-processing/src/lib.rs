//! User Media Processing Library
//!
//! Upload validation, crop-box handling, and thumbnail rendering for
//! user-uploaded images.

pub mod crop;
pub mod thumbnail;
pub mod validator;

// Re-export commonly used types
pub use crop::crop_to_box;
pub use thumbnail::{format_for_extension, ResizeDimensions, Thumbnailer};
pub use validator::{ImageValidator, ValidationError};
