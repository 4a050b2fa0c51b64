use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request to start an upload. The declared content type is advisory:
/// blob naming is fixed to `.jpg` regardless of what the client sends.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InitUploadRequest {
    /// Original filename
    #[validate(length(
        min = 1,
        max = 255,
        message = "File name must be between 1 and 255 characters"
    ))]
    pub file_name: String,
    /// Content type (MIME type), e.g. image/jpeg
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content type must be between 1 and 255 characters"
    ))]
    pub content_type: String,
}

/// Response containing the write-scoped signed URL and upload identity.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitUploadResponse {
    /// Image ID used to poll status later
    pub image_id: Uuid,
    /// Blob name in the raw container (`{imageId}.jpg`)
    pub raw_blob_name: String,
    /// Signed URL the client PUTs the raw image to
    pub upload_url: String,
    /// When the signed URL stops working (ISO-8601, UTC)
    pub expires_at_iso: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_empty_fields() {
        let request = InitUploadRequest {
            file_name: String::new(),
            content_type: "image/jpeg".to_string(),
        };
        assert!(request.validate().is_err());

        let request = InitUploadRequest {
            file_name: "cat.jpg".to_string(),
            content_type: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_accepts_normal_fields() {
        let request = InitUploadRequest {
            file_name: "cat.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = InitUploadResponse {
            image_id: Uuid::new_v4(),
            raw_blob_name: "x.jpg".to_string(),
            upload_url: "https://example.com/raw/x.jpg?sig=abc".to_string(),
            expires_at_iso: Utc::now(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("imageId").is_some());
        assert!(json.get("rawBlobName").is_some());
        assert!(json.get("uploadUrl").is_some());
        assert!(json.get("expiresAtIso").is_some());
    }
}
