use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

use crate::features::images::handlers::{self, UploadLimit};
use crate::features::images::services::ImageService;

/// Create routes for the images feature
pub fn routes(service: Arc<ImageService>, max_upload_size: usize) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/api/images",
            // Allow body size up to max_upload_size + buffer for multipart overhead
            post(handlers::upload_image)
                .layer::<_, std::convert::Infallible>(DefaultBodyLimit::max(max_upload_size + 1024 * 1024))
                .layer(Extension(UploadLimit(max_upload_size)))
                .get(handlers::list_images),
        )
        .route("/api/images/{id}", get(handlers::get_image))
        .route(
            "/api/images/{id}/thumbnails/{size}",
            get(handlers::get_thumbnail),
        )
        .route("/api/stats", get(handlers::get_stats))
        .with_state(service)
}
