use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::{Duration, Utc};
use shutter_core::models::upload::{InitUploadRequest, InitUploadResponse};
use shutter_core::AppError;
use shutter_storage::keys;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Initiate a direct upload: mint an image ID and a write-scoped signed URL
/// for the raw container. No object is created here; the client performs
/// the actual PUT against the returned URL.
#[utoipa::path(
    post,
    path = "/api/uploads/init",
    tag = "uploads",
    request_body = InitUploadRequest,
    responses(
        (status = 200, description = "Signed upload URL minted", body = InitUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(operation = "init_upload")
)]
pub async fn init_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<InitUploadRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    // Length bounds are checked by the validator; blank-after-trim is not.
    if request.file_name.trim().is_empty() {
        return Err(HttpAppError::from(AppError::InvalidInput(
            "fileName must not be blank".to_string(),
        )));
    }
    if request.content_type.trim().is_empty() {
        return Err(HttpAppError::from(AppError::InvalidInput(
            "contentType must not be blank".to_string(),
        )));
    }

    // Every later step of the pipeline is referenced by this ID.
    let image_id = Uuid::new_v4();
    let image_id_str = image_id.to_string();

    // Output naming is fixed to .jpg; the declared content type is advisory
    // and not checked against the extension.
    let raw_blob_name = keys::blob_name(&image_id_str);
    let raw_key = keys::object_key(state.config.raw_container(), &image_id_str);

    let ttl_minutes = state.config.signed_url_ttl_minutes();
    let expires_at = Utc::now() + Duration::minutes(ttl_minutes);

    let upload_url = state
        .storage
        .signed_put_url(
            &raw_key,
            &request.content_type,
            std::time::Duration::from_secs(ttl_minutes as u64 * 60),
        )
        .await?;

    tracing::info!(
        image_id = %image_id,
        raw_blob_name = %raw_blob_name,
        file_name = %request.file_name,
        content_type = %request.content_type,
        expires_at = %expires_at,
        "Minted signed upload URL"
    );

    Ok(Json(InitUploadResponse {
        image_id,
        raw_blob_name,
        upload_url,
        expires_at_iso: expires_at,
    }))
}
