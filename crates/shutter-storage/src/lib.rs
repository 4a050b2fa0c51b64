//! Shutter Storage Library
//!
//! This crate wraps the blob storage backend behind the `Storage` trait:
//! container bootstrap, object existence checks, and minting of signed
//! URLs scoped to a single object key, permission, and expiry.
//!
//! # Object key format
//!
//! Keys are container-scoped: `{container}/{imageId}.jpg`. The raw upload
//! and the processed result live under different containers but share the
//! blob name, so the image ID is the only correlation key. Keys must not
//! contain `..` or a leading `/`. Key derivation is centralized in the
//! `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use shutter_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
