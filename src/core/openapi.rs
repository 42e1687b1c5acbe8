use utoipa::{Modify, OpenApi};

use crate::features::images::{dtos as images_dtos, handlers as images_handlers, models};
use crate::modules::imaging::{ImageMetadata, ThumbnailSize};
use crate::shared::types::ApiErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        images_handlers::home,
        images_handlers::upload_image,
        images_handlers::list_images,
        images_handlers::get_image,
        images_handlers::get_thumbnail,
        images_handlers::get_stats,
    ),
    components(
        schemas(
            // Shared
            ApiErrorResponse,
            // Images
            models::ProcessingStatus,
            ImageMetadata,
            ThumbnailSize,
            images_dtos::UploadImageDto,
            images_dtos::ThumbnailUrlsDto,
            images_dtos::ImageDataDto,
            images_dtos::ImageRecordResponseDto,
            images_dtos::StatsResponseDto,
            images_dtos::MessageResponseDto,
        )
    ),
    tags(
        (name = "images", description = "Image upload, captioning, thumbnails and catalog"),
    ),
    info(
        title = "Digital Forensics Image API",
        version = "0.1.0",
        description = "Image intake, metadata extraction, thumbnails and captioning",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
