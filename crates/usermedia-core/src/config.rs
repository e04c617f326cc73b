//! Configuration module
//!
//! This module provides configuration structures for the API service,
//! including database, storage, thumbnail, and upload-policy settings.

use std::env;

// Common constants
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Base configuration shared by the API server and tooling
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

/// User media service configuration
#[derive(Clone, Debug)]
pub struct UserMediaConfig {
    pub base: BaseConfig,
    pub database_url: String,
    /// Shared secret the host application authenticates with.
    pub service_api_key: String,
    // Storage configuration
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    // Upload validation
    pub max_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
    // Thumbnail geometry, "WIDTHxHEIGHT"
    pub thumbnail_large_size: String,
    pub thumbnail_small_size: String,
    /// Default per-owner image cap for the AJAX uploader.
    pub upload_maximum: i64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<UserMediaConfig>);

impl Config {
    fn inner(&self) -> &UserMediaConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.inner().base.environment.to_lowercase().eq("production")
            || self.inner().base.environment.to_lowercase().eq("prod")
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = UserMediaConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn service_api_key(&self) -> &str {
        &self.inner().service_api_key
    }

    pub fn local_storage_path(&self) -> &str {
        &self.inner().local_storage_path
    }

    pub fn local_storage_base_url(&self) -> &str {
        &self.inner().local_storage_base_url
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.inner().max_file_size_bytes
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.inner().allowed_extensions
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.inner().allowed_content_types
    }

    pub fn thumbnail_large_size(&self) -> &str {
        &self.inner().thumbnail_large_size
    }

    pub fn thumbnail_small_size(&self) -> &str {
        &self.inner().thumbnail_small_size
    }

    pub fn upload_maximum(&self) -> i64 {
        self.inner().upload_maximum
    }
}

impl UserMediaConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        const MAX_FILE_SIZE_MB: usize = 10;
        const UPLOAD_MAXIMUM: i64 = 3;

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
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
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "jpg,jpeg,png,gif,webp".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| "image/jpeg,image/png,image/gif,image/webp".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
        };

        let config = UserMediaConfig {
            base,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            service_api_key: env::var("SERVICE_API_KEY")
                .map_err(|_| anyhow::anyhow!("SERVICE_API_KEY must be set for authentication"))?,
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| "./media".to_string()),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/media".to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_extensions,
            allowed_content_types,
            thumbnail_large_size: env::var("THUMBNAIL_LARGE_SIZE")
                .unwrap_or_else(|_| "150x150".to_string()),
            thumbnail_small_size: env::var("THUMBNAIL_SMALL_SIZE")
                .unwrap_or_else(|_| "95x95".to_string()),
            upload_maximum: env::var("UPLOAD_MAXIMUM")
                .unwrap_or_else(|_| UPLOAD_MAXIMUM.to_string())
                .parse()
                .unwrap_or(UPLOAD_MAXIMUM),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.service_api_key.len() < 32 {
            return Err(anyhow::anyhow!(
                "SERVICE_API_KEY must be at least 32 characters long"
            ));
        }

        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.local_storage_path.trim().is_empty() {
            return Err(anyhow::anyhow!("LOCAL_STORAGE_PATH cannot be empty"));
        }

        if self.local_storage_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("LOCAL_STORAGE_BASE_URL cannot be empty"));
        }

        for (name, value) in [
            ("THUMBNAIL_LARGE_SIZE", &self.thumbnail_large_size),
            ("THUMBNAIL_SMALL_SIZE", &self.thumbnail_small_size),
        ] {
            if !value.contains('x') {
                return Err(anyhow::anyhow!(
                    "{} must use WIDTHxHEIGHT format, got '{}'",
                    name,
                    value
                ));
            }
        }

        if self.upload_maximum < 1 {
            return Err(anyhow::anyhow!("UPLOAD_MAXIMUM must be at least 1"));
        }

        Ok(())
    }
}
