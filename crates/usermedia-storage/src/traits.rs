//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends must implement this trait. Callers generate storage
/// keys through the `keys` module and pass them in; backends never invent
/// keys themselves, which keeps originals and their thumbnails addressable
/// by exact key for later deletion.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `storage_key` and return the public URL.
    async fn upload(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Read the file stored under `storage_key`.
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete the file stored under `storage_key`. Deleting a key that does
    /// not exist is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Public URL for a storage key.
    fn url(&self, storage_key: &str) -> String;
}
