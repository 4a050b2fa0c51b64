use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use shutter_core::models::status::{ImageStatus, ImageStatusResponse};
use shutter_storage::keys;
use std::sync::Arc;

/// Poll the processing status of an image.
///
/// Status is a pure read-through view over the processed container: the
/// blob exists or it does not. Repeated calls are side-effect free and
/// flip from PROCESSING to READY once the external processor writes its
/// output. An ID that was never issued also reports PROCESSING; there is
/// no raw-existence check to tell the two apart.
#[utoipa::path(
    get,
    path = "/api/images/{image_id}",
    tag = "images",
    params(
        ("image_id" = String, Path, description = "Image ID returned by the upload init call")
    ),
    responses(
        (status = 200, description = "Current status, with a download URL when READY", body = ImageStatusResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(image_id = %image_id, operation = "get_image_status")
)]
pub async fn get_image_status(
    Path(image_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let processed_blob_name = keys::blob_name(&image_id);
    let processed_key = keys::object_key(state.config.processed_container(), &image_id);

    let ready = state.storage.exists(&processed_key).await?;

    if !ready {
        return Ok(Json(ImageStatusResponse {
            image_id,
            status: ImageStatus::Processing,
            processed_blob_name,
            download_url: None,
        }));
    }

    let ttl_minutes = state.config.signed_url_ttl_minutes();
    let download_url = state
        .storage
        .signed_get_url(
            &processed_key,
            std::time::Duration::from_secs(ttl_minutes as u64 * 60),
        )
        .await?;

    tracing::info!(
        image_id = %image_id,
        processed_blob_name = %processed_blob_name,
        "Processed blob found, minted signed download URL"
    );

    Ok(Json(ImageStatusResponse {
        image_id,
        status: ImageStatus::Ready,
        processed_blob_name,
        download_url: Some(download_url),
    }))
}
