use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::imaging::ImageMetadata;

/// Outcome of processing an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Success,
    /// The upload was stored and measured but no caption could be produced
    Failed,
}

/// Catalog entry for one processed upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub image_id: Uuid,
    pub original_name: String,
    pub processed_at: DateTime<Utc>,
    pub caption: Option<String>,
    pub metadata: ImageMetadata,
    pub status: ProcessingStatus,
    pub error: Option<String>,
    pub processing_time_seconds: f64,
}
