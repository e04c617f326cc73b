//! Domain route groups (images, widget uploads, galleries, admin).

use std::sync::Arc;

use axum::routing::{any, get, post};
use axum::Router;

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;

pub fn image_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/images", API_PREFIX), post(handlers::images::create_image))
        // The router keys each param position by a single name, and tuple
        // extraction is positional: here the first segment carries the owner
        // content type, the second the object id.
        .route(
            &format!("{}/images/{{id}}/{{object_id}}", API_PREFIX),
            post(handlers::images::create_attached_image),
        )
        .route(&format!("{}/images/{{id}}", API_PREFIX), get(handlers::images::get_image))
        .route(&format!("{}/images/{{id}}", API_PREFIX), post(handlers::images::update_image))
        .route(
            &format!("{}/images/{{id}}/delete", API_PREFIX),
            post(handlers::images::delete_image),
        )
        .route(
            &format!("{}/images/{{id}}/crop", API_PREFIX),
            any(handlers::crop::crop_image),
        )
        .with_state(state)
}

pub fn upload_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/uploads/{{content_type}}/{{object_id}}", API_PREFIX),
            post(handlers::uploads::multi_upload),
        )
        .route(
            &format!("{}/uploads/{{content_type}}/{{object_id}}/{{field}}", API_PREFIX),
            post(handlers::uploads::single_field_upload),
        )
        .with_state(state)
}

pub fn admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/admin/images", API_PREFIX),
            get(handlers::admin::list_images),
        )
        .with_state(state)
}

pub fn gallery_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/galleries", API_PREFIX), post(handlers::galleries::create_gallery))
        .route(
            &format!("{}/galleries/{{id}}", API_PREFIX),
            get(handlers::galleries::get_gallery),
        )
        .with_state(state)
}
