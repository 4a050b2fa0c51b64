//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use shutter_core::models;

/// Returns the OpenAPI spec served at /api/openapi.json.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shutter API",
        version = "0.1.0",
        description = "Signed-URL gateway for direct image upload and processed-image retrieval. Clients upload raw images straight to blob storage with a time-limited write URL, then poll for the processed result."
    ),
    paths(
        handlers::upload_init::init_upload,
        handlers::image_status::get_image_status,
    ),
    components(schemas(
        models::upload::InitUploadRequest,
        models::upload::InitUploadResponse,
        models::status::ImageStatus,
        models::status::ImageStatusResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Upload initiation"),
        (name = "images", description = "Processing status and download")
    )
)]
struct ApiDoc;
