//! Application state and domain sub-states.
//!
//! AppState is split into domain sub-states so construction in setup stays
//! readable; handlers receive the whole state behind an `Arc`.

use std::sync::Arc;

use usermedia_core::{Config, OwnerRegistry};
use usermedia_db::{GalleryRepository, ImageRepository};
use usermedia_processing::{ImageValidator, ResizeDimensions};
use usermedia_storage::Storage;

/// Image persistence, file storage, and thumbnail policy.
#[derive(Clone)]
pub struct MediaState {
    pub images: Arc<dyn ImageRepository>,
    pub storage: Arc<dyn Storage>,
    pub validator: Arc<ImageValidator>,
    /// Geometry for detail-view thumbnails.
    pub large_thumbnail: ResizeDimensions,
    /// Geometry for upload-widget list thumbnails.
    pub small_thumbnail: ResizeDimensions,
    /// Default per-uploader image cap for widget uploads.
    pub upload_maximum: i64,
}

/// Owner resolution for attachable content types.
#[derive(Clone)]
pub struct OwnerState {
    pub registry: OwnerRegistry,
    pub galleries: Arc<dyn GalleryRepository>,
}

pub struct AppState {
    pub media: MediaState,
    pub owners: OwnerState,
    pub config: Config,
    pub is_production: bool,
}
