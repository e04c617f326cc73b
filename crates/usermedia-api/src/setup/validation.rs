//! Configuration validation
//!
//! Validates critical configuration values at startup to catch
//! misconfigurations early.

use anyhow::Result;
use usermedia_core::Config;

/// Validate critical configuration values
///
/// Checks that critical configuration is set correctly and fails fast on
/// values that would cause security problems or runtime errors.
pub fn validate_config(config: &Config) -> Result<()> {
    let is_production = config.is_production();
    let env_var = std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .ok();

    if is_production && env_var.is_none() {
        tracing::warn!(
            "Production mode detected but ENVIRONMENT/APP_ENV not set - error details may leak"
        );
    }

    if is_production && config.cors_origins().contains(&"*".to_string()) {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production - this is a security risk. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0 seconds"));
    }

    if config.max_file_size_bytes() == 0 {
        return Err(anyhow::anyhow!("Max file size cannot be 0"));
    }

    if config.upload_maximum() <= 0 {
        return Err(anyhow::anyhow!("Upload maximum must be at least 1"));
    }

    Ok(())
}
