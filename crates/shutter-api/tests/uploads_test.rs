//! Upload-init endpoint tests.
//!
//! Run with: `cargo test -p shutter-api --test uploads_test`

mod helpers;

use chrono::{Duration, Utc};
use helpers::setup_test_app;
use shutter_core::models::upload::InitUploadResponse;
use uuid::Uuid;

#[tokio::test]
async fn test_init_upload_mints_signed_url() {
    let app = setup_test_app().await;
    let client = app.client();

    let before = Utc::now();
    let response = client
        .post("/api/uploads/init")
        .json(&serde_json::json!({
            "fileName": "cat.jpg",
            "contentType": "image/jpeg"
        }))
        .await;

    assert_eq!(response.status_code(), 200);

    let body: InitUploadResponse = response.json();
    assert_eq!(body.raw_blob_name, format!("{}.jpg", body.image_id));
    assert!(body.upload_url.contains(&body.raw_blob_name));
    assert!(body.upload_url.contains("/raw/"));

    // Expiry is issuance time + the configured 10 minute TTL.
    let expected = before + Duration::minutes(10);
    let drift = (body.expires_at_iso - expected).num_seconds().abs();
    assert!(drift <= 5, "expiry drifted {}s from expected", drift);
}

#[tokio::test]
async fn test_init_upload_ids_are_unique() {
    let app = setup_test_app().await;
    let client = app.client();

    let mut seen = std::collections::HashSet::new();
    for _ in 0..5 {
        let response = client
            .post("/api/uploads/init")
            .json(&serde_json::json!({
                "fileName": "cat.jpg",
                "contentType": "image/jpeg"
            }))
            .await;
        assert_eq!(response.status_code(), 200);

        let body: InitUploadResponse = response.json();
        assert!(seen.insert(body.image_id), "image ID reused");
    }
}

#[tokio::test]
async fn test_init_upload_id_is_uuid_shaped() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/api/uploads/init")
        .json(&serde_json::json!({
            "fileName": "portrait.png",
            "contentType": "image/png"
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    let id = body["imageId"].as_str().expect("imageId is a string");
    assert!(Uuid::parse_str(id).is_ok());
    // Naming is fixed to .jpg regardless of the declared content type.
    assert_eq!(body["rawBlobName"], format!("{}.jpg", id));
}

#[tokio::test]
async fn test_init_upload_missing_fields_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/api/uploads/init")
        .json(&serde_json::json!({}))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_init_upload_blank_fields_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/api/uploads/init")
        .json(&serde_json::json!({
            "fileName": "   ",
            "contentType": "image/jpeg"
        }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = client
        .post("/api/uploads/init")
        .json(&serde_json::json!({
            "fileName": "cat.jpg",
            "contentType": ""
        }))
        .await;
    assert_eq!(response.status_code(), 400);
}
