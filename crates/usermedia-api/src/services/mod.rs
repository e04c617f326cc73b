//! Request-level services shared by the image handlers.

pub mod redirects;
pub mod upload;
