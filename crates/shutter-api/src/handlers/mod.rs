//! Request handlers for the upload and status endpoints.

pub mod image_status;
pub mod upload_init;
