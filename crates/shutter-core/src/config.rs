//! Configuration module
//!
//! This module provides the gateway configuration: storage backend settings,
//! container names, signed-URL TTL, optional request authentication, and the
//! HTTP surface (port, CORS). Configuration is read once at startup and
//! passed by reference; nothing reads the environment at request time.

use std::env;

use crate::storage_types::StorageBackend;

// Common constants
const SIGNED_URL_TTL_MINUTES: i64 = 10;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:8081,http://127.0.0.1:8081";

/// Base configuration for the HTTP surface.
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Gateway configuration.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Namespaces holding the raw upload and the processed result
    pub raw_container: String,
    pub processed_container: String,
    // Credential lifetime
    pub signed_url_ttl_minutes: i64,
    // Request authentication (bearer JWT against an external issuer)
    pub auth_enabled: bool,
    pub jwt_issuer_uri: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<GatewayConfig>);

impl Config {
    fn as_gateway(&self) -> &GatewayConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.as_gateway().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = GatewayConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_gateway().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_gateway().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_gateway().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_gateway().base.environment
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.as_gateway().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_gateway().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_gateway().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_gateway().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_gateway().aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_gateway().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_gateway().local_storage_base_url.as_deref()
    }

    pub fn raw_container(&self) -> &str {
        &self.as_gateway().raw_container
    }

    pub fn processed_container(&self) -> &str {
        &self.as_gateway().processed_container
    }

    pub fn signed_url_ttl_minutes(&self) -> i64 {
        self.as_gateway().signed_url_ttl_minutes
    }

    pub fn auth_enabled(&self) -> bool {
        self.as_gateway().auth_enabled
    }

    pub fn jwt_issuer_uri(&self) -> Option<&str> {
        self.as_gateway().jwt_issuer_uri.as_deref()
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str =
            env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        };

        // Storage backend configuration
        let storage_backend =
            env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|s| match s.to_lowercase().as_str() {
                    "s3" => Some(StorageBackend::S3),
                    "local" => Some(StorageBackend::Local),
                    _ => None,
                });

        let config = GatewayConfig {
            base,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            raw_container: env::var("RAW_CONTAINER").unwrap_or_else(|_| "raw".to_string()),
            processed_container: env::var("PROCESSED_CONTAINER")
                .unwrap_or_else(|_| "processed".to_string()),
            signed_url_ttl_minutes: env::var("SIGNED_URL_TTL_MINUTES")
                .unwrap_or_else(|_| SIGNED_URL_TTL_MINUTES.to_string())
                .parse()
                .unwrap_or(SIGNED_URL_TTL_MINUTES),
            auth_enabled: env::var("AUTH_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            jwt_issuer_uri: env::var("JWT_ISSUER_URI").ok().filter(|s| !s.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.signed_url_ttl_minutes <= 0 {
            return Err(anyhow::anyhow!(
                "SIGNED_URL_TTL_MINUTES must be a positive number of minutes"
            ));
        }

        if self.raw_container.trim().is_empty() || self.processed_container.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "RAW_CONTAINER and PROCESSED_CONTAINER must be non-empty"
            ));
        }

        if self.auth_enabled && self.jwt_issuer_uri.is_none() {
            return Err(anyhow::anyhow!(
                "JWT_ISSUER_URI is required when AUTH_ENABLED=true"
            ));
        }

        // Validate storage backend configuration
        let backend = self.storage_backend.unwrap_or(StorageBackend::S3);
        match backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> GatewayConfig {
        GatewayConfig {
            base: BaseConfig {
                server_port: 4000,
                cors_origins: vec!["http://localhost:8081".to_string()],
                environment: "test".to_string(),
            },
            storage_backend: Some(StorageBackend::S3),
            s3_bucket: Some("images".to_string()),
            s3_region: Some("us-east-1".to_string()),
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: None,
            local_storage_base_url: None,
            raw_container: "raw".to_string(),
            processed_container: "processed".to_string(),
            signed_url_ttl_minutes: 10,
            auth_enabled: false,
            jwt_issuer_uri: None,
        }
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_s3_backend_requires_bucket() {
        let mut config = valid_config();
        config.s3_bucket = None;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("S3_BUCKET"));
    }

    #[test]
    fn test_s3_backend_requires_region() {
        let mut config = valid_config();
        config.s3_region = None;
        config.aws_region = None;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("S3_REGION"));
    }

    #[test]
    fn test_aws_region_satisfies_region_requirement() {
        let mut config = valid_config();
        config.s3_region = None;
        config.aws_region = Some("eu-west-1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_local_backend_requires_path_and_base_url() {
        let mut config = valid_config();
        config.storage_backend = Some(StorageBackend::Local);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LOCAL_STORAGE_PATH"));

        config.local_storage_path = Some("/tmp/shutter".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LOCAL_STORAGE_BASE_URL"));

        config.local_storage_base_url = Some("http://localhost:4000/blobs".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_auth_enabled_requires_issuer() {
        let mut config = valid_config();
        config.auth_enabled = true;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("JWT_ISSUER_URI"));

        config.jwt_issuer_uri = Some("https://auth.example.com".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ttl_must_be_positive() {
        let mut config = valid_config();
        config.signed_url_ttl_minutes = 0;
        assert!(config.validate().is_err());
    }
}
