use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Processing status derived from blob existence:
/// - PROCESSING: the processed blob has not been written yet
/// - READY: the processed blob exists and a download URL is returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageStatus {
    Processing,
    Ready,
}

/// Status response for a polled image.
///
/// The identifier is echoed back as an opaque string: an ID that was never
/// issued is indistinguishable from one that is still mid-processing, and
/// both report PROCESSING.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageStatusResponse {
    pub image_id: String,
    pub status: ImageStatus,
    /// Blob name in the processed container (`{imageId}.jpg`)
    pub processed_blob_name: String,
    /// Read-scoped signed URL, present only when status is READY
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_value(ImageStatus::Processing).unwrap(),
            serde_json::json!("PROCESSING")
        );
        assert_eq!(
            serde_json::to_value(ImageStatus::Ready).unwrap(),
            serde_json::json!("READY")
        );
    }

    #[test]
    fn test_download_url_omitted_when_processing() {
        let response = ImageStatusResponse {
            image_id: "a1b2".to_string(),
            status: ImageStatus::Processing,
            processed_blob_name: "a1b2.jpg".to_string(),
            download_url: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("downloadUrl").is_none());
        assert_eq!(json.get("status").unwrap(), "PROCESSING");
    }
}
