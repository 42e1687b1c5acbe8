use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::images::models::{ImageRecord, ProcessingStatus};
use crate::modules::imaging::{ImageMetadata, ThumbnailSize};

/// Upload image request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image to upload (declared as image/jpg or image/png)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Links to the generated thumbnail variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ThumbnailUrlsDto {
    pub small: String,
    pub medium: String,
}

impl ThumbnailUrlsDto {
    pub fn for_image(base_url: &str, image_id: Uuid) -> Self {
        let url = |size: ThumbnailSize| {
            format!(
                "{}/api/images/{}/thumbnails/{}",
                base_url,
                image_id,
                size.label()
            )
        };

        Self {
            small: url(ThumbnailSize::Small),
            medium: url(ThumbnailSize::Medium),
        }
    }
}

/// Details of a processed image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageDataDto {
    pub image_id: Uuid,
    /// Filename as sent by the client
    pub original_name: String,
    /// When processing started
    #[schema(example = "2024-05-01T12:30:00Z")]
    pub processed_at: DateTime<Utc>,
    /// Generated caption, absent when the captioning model failed
    pub caption: Option<String>,
    pub metadata: ImageMetadata,
    pub thumbnails: ThumbnailUrlsDto,
}

/// Response DTO for a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageRecordResponseDto {
    pub status: ProcessingStatus,
    pub data: ImageDataDto,
    /// Failure reason when status is "failed"
    pub error: Option<String>,
    pub processing_time_seconds: f64,
}

impl ImageRecordResponseDto {
    pub fn from_record(record: &ImageRecord, base_url: &str) -> Self {
        Self {
            status: record.status,
            data: ImageDataDto {
                image_id: record.image_id,
                original_name: record.original_name.clone(),
                processed_at: record.processed_at,
                caption: record.caption.clone(),
                metadata: record.metadata.clone(),
                thumbnails: ThumbnailUrlsDto::for_image(base_url, record.image_id),
            },
            error: record.error.clone(),
            processing_time_seconds: record.processing_time_seconds,
        }
    }
}

/// Aggregate figures over the whole catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatsResponseDto {
    pub total: usize,
    pub failed: usize,
    /// Percentage of successful uploads with two decimals
    #[schema(example = "100.00%")]
    pub success_rate: String,
    pub average_processing_time_seconds: f64,
}

/// Plain message response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponseDto {
    pub message: String,
}

/// Liveness message for the root endpoint
pub const SERVICE_BANNER: &str = "Digital Forensics Image API";

/// Declared content types accepted for upload
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &["image/jpg", "image/png"];

/// Check if a declared content type is accepted
pub fn is_content_type_accepted(content_type: &str) -> bool {
    ACCEPTED_CONTENT_TYPES.contains(&content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_content_types() {
        assert!(is_content_type_accepted("image/jpg"));
        assert!(is_content_type_accepted("image/png"));
        assert!(!is_content_type_accepted("image/gif"));
        assert!(!is_content_type_accepted("image/jpeg"));
        assert!(!is_content_type_accepted("application/octet-stream"));
    }

    #[test]
    fn test_thumbnail_urls() {
        let id = Uuid::nil();
        let urls = ThumbnailUrlsDto::for_image("http://localhost:8000", id);

        assert_eq!(
            urls.small,
            "http://localhost:8000/api/images/00000000-0000-0000-0000-000000000000/thumbnails/small"
        );
        assert_eq!(
            urls.medium,
            "http://localhost:8000/api/images/00000000-0000-0000-0000-000000000000/thumbnails/medium"
        );
    }

    #[test]
    fn test_response_shape() {
        let record = ImageRecord {
            image_id: Uuid::nil(),
            original_name: "a.jpg".to_string(),
            processed_at: "2024-05-01T12:30:00Z".parse().unwrap(),
            caption: Some("a cat on a sofa".to_string()),
            metadata: ImageMetadata {
                width: 200,
                height: 150,
                format: "JPEG".to_string(),
                size_bytes: 1234,
            },
            status: ProcessingStatus::Success,
            error: None,
            processing_time_seconds: 0.5,
        };

        let json = serde_json::to_value(ImageRecordResponseDto::from_record(
            &record,
            "http://localhost:8000",
        ))
        .unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["error"], serde_json::Value::Null);
        assert_eq!(json["data"]["processed_at"], "2024-05-01T12:30:00Z");
        assert_eq!(json["data"]["metadata"]["format"], "JPEG");
        assert_eq!(json["data"]["metadata"]["size_bytes"], 1234);
        assert!(json["data"]["thumbnails"]["small"]
            .as_str()
            .unwrap()
            .ends_with("/thumbnails/small"));
    }
}
