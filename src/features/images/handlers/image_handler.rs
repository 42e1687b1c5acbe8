use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{SubsecRound, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppPath;
use crate::features::images::dtos::{
    is_content_type_accepted, ImageRecordResponseDto, MessageResponseDto, StatsResponseDto,
    UploadImageDto, ACCEPTED_CONTENT_TYPES, SERVICE_BANNER,
};
use crate::features::images::services::ImageService;
use crate::modules::imaging::ThumbnailSize;

/// Largest accepted file, in bytes
#[derive(Debug, Clone, Copy)]
pub struct UploadLimit(pub usize);

/// Map a multipart read failure, keeping the body limit as 413
fn multipart_error(e: MultipartError, context: &str) -> AppError {
    debug!("{}: {}", context, e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File too large".to_string())
    } else {
        AppError::BadRequest(format!("{}: {}", context, e))
    }
}

/// Liveness message
#[utoipa::path(
    get,
    path = "/",
    tag = "images",
    responses(
        (status = 200, description = "Service is up", body = MessageResponseDto)
    )
)]
pub async fn home() -> Json<MessageResponseDto> {
    Json(MessageResponseDto {
        message: SERVICE_BANNER.to_string(),
    })
}

/// Upload an image
///
/// Accepts multipart/form-data with a `file` field declared as `image/jpg`
/// or `image/png`. The image is stored, measured, captioned and thumbnailed
/// before the response is sent.
#[utoipa::path(
    post,
    path = "/api/images",
    tag = "images",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image upload form",
    ),
    responses(
        (status = 200, description = "Image processed", body = ImageRecordResponseDto),
        (status = 400, description = "Missing file or unsupported content type"),
        (status = 413, description = "File too large")
    )
)]
pub async fn upload_image(
    State(service): State<Arc<ImageService>>,
    Extension(UploadLimit(max_size)): Extension<UploadLimit>,
    mut multipart: Multipart,
) -> Result<Json<ImageRecordResponseDto>> {
    let started = Instant::now();
    let processed_at = Utc::now().trunc_subsecs(0);
    let mut upload: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Failed to read multipart data"))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "file" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        // Reject before buffering the body
        if !is_content_type_accepted(&content_type) {
            warn!(
                "Invalid file type uploaded: {} ({})",
                file_name, content_type
            );
            return Err(AppError::BadRequest(format!(
                "Invalid file type '{}'. Allowed types: {}",
                content_type,
                ACCEPTED_CONTENT_TYPES.join(", ")
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Failed to read file data"))?;

        if data.len() > max_size {
            warn!(
                "File too large: {} ({} bytes, limit {})",
                file_name,
                data.len(),
                max_size
            );
            return Err(AppError::PayloadTooLarge(format!(
                "File too large. Maximum size is {} bytes",
                max_size
            )));
        }

        upload = Some((data.to_vec(), file_name));
    }

    let (data, file_name) =
        upload.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let response = service
        .upload_image(data, &file_name, started, processed_at)
        .await?;

    Ok(Json(response))
}

/// List every processed image in upload order
#[utoipa::path(
    get,
    path = "/api/images",
    tag = "images",
    responses(
        (status = 200, description = "All catalog entries", body = Vec<ImageRecordResponseDto>)
    )
)]
pub async fn list_images(
    State(service): State<Arc<ImageService>>,
) -> Result<Json<Vec<ImageRecordResponseDto>>> {
    let images = service.list_images().await?;
    Ok(Json(images))
}

/// Get a processed image by id
#[utoipa::path(
    get,
    path = "/api/images/{id}",
    tag = "images",
    params(
        ("id" = Uuid, Path, description = "Image id")
    ),
    responses(
        (status = 200, description = "Image found", body = ImageRecordResponseDto),
        (status = 404, description = "Image not found")
    )
)]
pub async fn get_image(
    State(service): State<Arc<ImageService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ImageRecordResponseDto>> {
    let image = service.get_image(id).await?;
    Ok(Json(image))
}

/// Download a thumbnail as JPEG
#[utoipa::path(
    get,
    path = "/api/images/{id}/thumbnails/{size}",
    tag = "images",
    params(
        ("id" = Uuid, Path, description = "Image id"),
        ("size" = ThumbnailSize, Path, description = "Thumbnail variant")
    ),
    responses(
        (status = 200, description = "Thumbnail bytes", content_type = "image/jpeg", body = Vec<u8>),
        (status = 404, description = "Thumbnail not found")
    )
)]
pub async fn get_thumbnail(
    State(service): State<Arc<ImageService>>,
    AppPath((id, size)): AppPath<(Uuid, ThumbnailSize)>,
) -> Result<impl IntoResponse> {
    let jpeg = service.get_thumbnail(id, size).await?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], jpeg))
}

/// Aggregate statistics over the catalog
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "images",
    responses(
        (status = 200, description = "Catalog statistics", body = StatsResponseDto),
        (status = 422, description = "No images processed yet")
    )
)]
pub async fn get_stats(
    State(service): State<Arc<ImageService>>,
) -> Result<Json<StatsResponseDto>> {
    let stats = service.get_stats().await?;
    Ok(Json(stats))
}
