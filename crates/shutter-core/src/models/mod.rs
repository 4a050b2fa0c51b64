//! Wire models for the upload and status endpoints.

pub mod status;
pub mod upload;

pub use status::{ImageStatus, ImageStatusResponse};
pub use upload::{InitUploadRequest, InitUploadResponse};
