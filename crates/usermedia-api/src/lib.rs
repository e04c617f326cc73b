//! User Media API Library
//!
//! This crate provides the HTTP API handlers, middleware, and application setup.

// Module declarations
pub mod constants;
mod handlers;
mod services;
pub mod setup;

// Public modules
pub mod auth;
pub mod error;
pub mod owners;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
