//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use shutter_core::StorageBackend;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// The gateway never reads or writes object bytes itself: clients upload
/// and download directly against the signed URLs minted here, so the
/// surface is existence checks and URL signing only.
///
/// Signed URLs are scoped to exactly one object key and one permission
/// (read for GET, write/create for PUT) and stop working at issuance time
/// plus `expires_in`.
///
/// **Key format:** `{container}/{imageId}.jpg` — see the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Ensure a container (namespace) is usable before serving traffic.
    ///
    /// Called once at startup for the raw and processed containers; a
    /// failure here is fatal, no requests are served against a backend
    /// that cannot be reached.
    async fn ensure_container(&self, container: &str) -> StorageResult<()>;

    /// Check if an object exists at the given storage key
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Mint a signed URL granting read access to one object (HTTP GET)
    async fn signed_get_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Mint a signed URL granting write/create access to one object (HTTP PUT).
    ///
    /// The declared content type is advisory and not embedded in the
    /// signature; the client sends it on the actual upload request.
    async fn signed_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
