//! Service initialization and application state setup

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use sqlx::PgPool;
use usermedia_core::{Config, OwnerRegistry};
use usermedia_db::{
    GalleryRepository, ImageRepository, PgGalleryRepository, PgImageRepository,
};
use usermedia_processing::{ImageValidator, ResizeDimensions};
use usermedia_storage::LocalStorage;

use crate::owners::GalleryResolver;
use crate::state::{AppState, MediaState, OwnerState};

/// Parse a configured thumbnail size, requiring full WxH geometry. Response
/// bodies predict which rendition keys exist, which needs both dimensions.
fn thumbnail_dimensions(label: &str, value: &str) -> Result<ResizeDimensions> {
    let dimensions =
        ResizeDimensions::parse(value).map_err(|e| anyhow!("Invalid {} ({}): {}", label, value, e))?;
    match (dimensions.width, dimensions.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => Ok(dimensions),
        _ => Err(anyhow!(
            "Invalid {} ({}): both width and height are required and must be non-zero",
            label,
            value
        )),
    }
}

/// Initialize repositories, storage, and the owner registry, returning the
/// application state
pub async fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let images: Arc<dyn ImageRepository> = Arc::new(PgImageRepository::new(pool.clone()));
    let galleries: Arc<dyn GalleryRepository> = Arc::new(PgGalleryRepository::new(pool));

    let storage = Arc::new(
        LocalStorage::new(
            config.local_storage_path().to_string(),
            config.local_storage_base_url().to_string(),
        )
        .await
        .context("Failed to initialize local storage")?,
    );
    tracing::info!(path = %config.local_storage_path(), "Local storage ready");

    let validator = Arc::new(ImageValidator::new(
        config.max_file_size_bytes(),
        config.allowed_extensions().to_vec(),
        config.allowed_content_types().to_vec(),
    ));

    let large_thumbnail =
        thumbnail_dimensions("THUMBNAIL_LARGE_SIZE", config.thumbnail_large_size())?;
    let small_thumbnail =
        thumbnail_dimensions("THUMBNAIL_SMALL_SIZE", config.thumbnail_small_size())?;

    let mut registry = OwnerRegistry::new();
    registry.register(Arc::new(GalleryResolver::new(galleries.clone())));

    let state = Arc::new(AppState {
        media: MediaState {
            images,
            storage,
            validator,
            large_thumbnail,
            small_thumbnail,
            upload_maximum: config.upload_maximum(),
        },
        owners: OwnerState {
            registry,
            galleries,
        },
        config: config.clone(),
        is_production: config.is_production(),
    });

    Ok(state)
}
