//! Shutter API Library
//!
//! This crate provides the HTTP handlers, optional bearer-JWT middleware,
//! and application setup for the signed-URL image gateway.

// Module declarations
mod api_doc;
pub mod handlers;
pub mod setup;
mod telemetry;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
