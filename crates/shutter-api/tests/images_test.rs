//! Status endpoint tests.
//!
//! Run with: `cargo test -p shutter-api --test images_test`

mod helpers;

use helpers::setup_test_app;
use shutter_core::models::status::{ImageStatus, ImageStatusResponse};
use shutter_core::models::upload::InitUploadResponse;

async fn init_upload(app: &helpers::TestApp) -> InitUploadResponse {
    let response = app
        .client()
        .post("/api/uploads/init")
        .json(&serde_json::json!({
            "fileName": "cat.jpg",
            "contentType": "image/jpeg"
        }))
        .await;
    assert_eq!(response.status_code(), 200);
    response.json()
}

#[tokio::test]
async fn test_status_is_processing_before_processor_runs() {
    let app = setup_test_app().await;
    let upload = init_upload(&app).await;

    let response = app
        .client()
        .get(&format!("/api/images/{}", upload.image_id))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: ImageStatusResponse = response.json();
    assert_eq!(body.status, ImageStatus::Processing);
    assert_eq!(body.image_id, upload.image_id.to_string());
    assert_eq!(body.processed_blob_name, upload.raw_blob_name);
    assert!(body.download_url.is_none());
}

#[tokio::test]
async fn test_status_flips_to_ready_after_processed_blob_written() {
    let app = setup_test_app().await;
    let upload = init_upload(&app).await;

    // External processor writes its output under the processed container.
    app.write_processed_blob(&upload.raw_blob_name, b"processed jpeg bytes");

    let response = app
        .client()
        .get(&format!("/api/images/{}", upload.image_id))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: ImageStatusResponse = response.json();
    assert_eq!(body.status, ImageStatus::Ready);
    let download_url = body.download_url.expect("READY response carries a URL");
    assert!(download_url.contains(&format!("processed/{}", body.processed_blob_name)));
}

#[tokio::test]
async fn test_status_download_url_absent_in_json_when_processing() {
    let app = setup_test_app().await;
    let upload = init_upload(&app).await;

    let response = app
        .client()
        .get(&format!("/api/images/{}", upload.image_id))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "PROCESSING");
    assert!(body.get("downloadUrl").is_none());
}

#[tokio::test]
async fn test_status_checks_are_idempotent() {
    let app = setup_test_app().await;
    let upload = init_upload(&app).await;
    let path = format!("/api/images/{}", upload.image_id);

    let first: serde_json::Value = app.client().get(&path).await.json();
    let second: serde_json::Value = app.client().get(&path).await.json();
    assert_eq!(first, second);

    app.write_processed_blob(&upload.raw_blob_name, b"bytes");

    let third: serde_json::Value = app.client().get(&path).await.json();
    let fourth: serde_json::Value = app.client().get(&path).await.json();
    assert_eq!(third["status"], "READY");
    assert_eq!(third, fourth);
}

#[tokio::test]
async fn test_status_unknown_id_reports_processing() {
    let app = setup_test_app().await;

    // Never initialized, never uploaded: indistinguishable from mid-processing.
    let response = app
        .client()
        .get(&format!("/api/images/{}", uuid::Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: ImageStatusResponse = response.json();
    assert_eq!(body.status, ImageStatus::Processing);
    assert!(body.download_url.is_none());
}

#[tokio::test]
async fn test_status_accepts_opaque_identifiers() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/images/not-a-real-id").await;
    assert_eq!(response.status_code(), 200);

    let body: ImageStatusResponse = response.json();
    assert_eq!(body.status, ImageStatus::Processing);
    assert_eq!(body.processed_blob_name, "not-a-real-id.jpg");
}
