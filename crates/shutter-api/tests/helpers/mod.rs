//! Test helpers: build AppState and router for endpoint tests.
//!
//! Run from workspace root: `cargo test -p shutter-api`. Tests use the
//! local storage backend in a temp directory; "signed" URLs are plain file
//! URLs there, which is all the endpoint contract needs.

use axum_test::TestServer;
use shutter_api::setup::routes;
use shutter_api::state::AppState;
use shutter_core::{BaseConfig, Config, GatewayConfig, StorageBackend};
use shutter_storage::{LocalStorage, Storage};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server plus the blob root it signs URLs against.
pub struct TestApp {
    pub server: TestServer,
    blob_root: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Simulate the external processor writing its output blob.
    pub fn write_processed_blob(&self, blob_name: &str, bytes: &[u8]) {
        let path = self.blob_root.join("processed").join(blob_name);
        std::fs::write(path, bytes).expect("Failed to write processed blob");
    }
}

/// Setup test app with isolated local storage.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let blob_root = temp_dir.path().to_path_buf();

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(blob_root.clone(), "http://localhost:4000/blobs".to_string())
            .await
            .expect("Failed to create local storage"),
    );

    let config = create_test_config(&blob_root);

    storage
        .ensure_container(config.raw_container())
        .await
        .expect("Failed to create raw container");
    storage
        .ensure_container(config.processed_container())
        .await
        .expect("Failed to create processed container");

    let state = Arc::new(AppState {
        storage,
        config: config.clone(),
        jwt: None,
        is_production: false,
    });

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        blob_root,
        _temp_dir: temp_dir,
    }
}

fn create_test_config(blob_root: &std::path::Path) -> Config {
    let base = BaseConfig {
        server_port: 4000,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
    };
    let gateway = GatewayConfig {
        base,
        storage_backend: Some(StorageBackend::Local),
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        local_storage_path: Some(blob_root.display().to_string()),
        local_storage_base_url: Some("http://localhost:4000/blobs".to_string()),
        raw_container: "raw".to_string(),
        processed_container: "processed".to_string(),
        signed_url_ttl_minutes: 10,
        auth_enabled: false,
        jwt_issuer_uri: None,
    };
    Config(Box::new(gateway))
}
