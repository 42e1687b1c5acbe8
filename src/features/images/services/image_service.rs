use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use image::ImageResult;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::images::dtos::{ImageRecordResponseDto, StatsResponseDto};
use crate::features::images::models::{ImageRecord, ProcessingStatus};
use crate::features::images::repositories::ImageRepository;
use crate::modules::captioning::{CaptionModel, CaptionOutcome};
use crate::modules::imaging::{self, render_thumbnail, ImageMetadata, ThumbnailSize};
use crate::modules::storage::LocalStorage;

/// Service for image intake and catalog queries
pub struct ImageService {
    repository: Arc<dyn ImageRepository>,
    storage: Arc<LocalStorage>,
    caption_model: Arc<dyn CaptionModel>,
    caption_timeout: Duration,
    public_base_url: String,
}

impl ImageService {
    pub fn new(
        repository: Arc<dyn ImageRepository>,
        storage: Arc<LocalStorage>,
        caption_model: Arc<dyn CaptionModel>,
        caption_timeout: Duration,
        public_base_url: String,
    ) -> Self {
        Self {
            repository,
            storage,
            caption_model,
            caption_timeout,
            public_base_url,
        }
    }

    /// Store, measure, caption and thumbnail an upload, then add it to the catalog
    ///
    /// The declared content type must already be validated. `started` and
    /// `processed_at` are taken when the request arrived, so the recorded
    /// processing time includes reading the body. Steps after the original
    /// is written are not rolled back: a decode or disk failure leaves files
    /// behind without a catalog entry.
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        original_name: &str,
        started: Instant,
        processed_at: DateTime<Utc>,
    ) -> Result<ImageRecordResponseDto> {
        let image_id = Uuid::new_v4();

        info!("Processing image: {} with ID: {}", original_name, image_id);

        let path = self
            .storage
            .save_original(image_id, original_name, &data)
            .await?;
        info!("Image saved to {}", path.display());
        let size_bytes = tokio::fs::metadata(&path).await?.len();

        let (decoded, data) =
            run_blocking(move || imaging::decode(&data).map(|decoded| (decoded, data))).await?;

        let caption = self
            .generate_caption(&data, decoded.format.to_mime_type())
            .await;

        let metadata = ImageMetadata::from_decoded(&decoded, size_bytes);

        let thumbnails = run_blocking(move || {
            ThumbnailSize::ALL
                .into_iter()
                .map(|size| render_thumbnail(&decoded.image, size).map(|jpeg| (size, jpeg)))
                .collect::<ImageResult<Vec<_>>>()
        })
        .await?;
        for (size, jpeg) in thumbnails {
            self.storage.save_thumbnail(image_id, size, &jpeg).await?;
        }

        let (status, caption, error) = match caption {
            CaptionOutcome::Generated(text) => (ProcessingStatus::Success, Some(text), None),
            CaptionOutcome::Failed(reason) => (ProcessingStatus::Failed, None, Some(reason)),
        };

        let record = ImageRecord {
            image_id,
            original_name: original_name.to_string(),
            processed_at,
            caption,
            metadata,
            status,
            error,
            processing_time_seconds: started.elapsed().as_secs_f64(),
        };

        self.repository.add(record.clone()).await?;

        info!(
            "Image {} processed with status {:?} in {:.2} seconds",
            image_id, record.status, record.processing_time_seconds
        );

        Ok(ImageRecordResponseDto::from_record(
            &record,
            &self.public_base_url,
        ))
    }

    /// Ask the model for a caption, bounded by the configured timeout
    async fn generate_caption(&self, data: &[u8], content_type: &str) -> CaptionOutcome {
        let attempt = tokio::time::timeout(
            self.caption_timeout,
            self.caption_model.caption(data, content_type),
        )
        .await;

        match attempt {
            Ok(Ok(caption)) => {
                info!("Caption generated: {}", caption);
                CaptionOutcome::Generated(caption)
            }
            Ok(Err(e)) => {
                warn!("Caption model {} failed: {}", self.caption_model.name(), e);
                CaptionOutcome::Failed(e.to_string())
            }
            Err(_) => {
                warn!(
                    "Caption model {} timed out after {:?}",
                    self.caption_model.name(),
                    self.caption_timeout
                );
                CaptionOutcome::Failed(format!(
                    "Caption model timed out after {} seconds",
                    self.caption_timeout.as_secs_f64()
                ))
            }
        }
    }

    /// All catalog entries in upload order
    pub async fn list_images(&self) -> Result<Vec<ImageRecordResponseDto>> {
        let records = self.repository.list().await?;

        Ok(records
            .iter()
            .map(|record| ImageRecordResponseDto::from_record(record, &self.public_base_url))
            .collect())
    }

    pub async fn get_image(&self, image_id: Uuid) -> Result<ImageRecordResponseDto> {
        let record = self
            .repository
            .get_by_id(image_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

        Ok(ImageRecordResponseDto::from_record(
            &record,
            &self.public_base_url,
        ))
    }

    /// JPEG bytes of a stored thumbnail
    pub async fn get_thumbnail(&self, image_id: Uuid, size: ThumbnailSize) -> Result<Vec<u8>> {
        self.storage
            .read_thumbnail(image_id, size)
            .await?
            .ok_or_else(|| AppError::NotFound("Thumbnail not found".to_string()))
    }

    pub async fn get_stats(&self) -> Result<StatsResponseDto> {
        let records = self.repository.list().await?;
        compute_stats(&records)
    }
}

/// Aggregate the catalog; undefined for an empty catalog
fn compute_stats(records: &[ImageRecord]) -> Result<StatsResponseDto> {
    let total = records.len();
    if total == 0 {
        return Err(AppError::EmptyCatalog(
            "Statistics are unavailable until at least one image has been processed".to_string(),
        ));
    }

    let failed = records
        .iter()
        .filter(|record| record.status == ProcessingStatus::Failed)
        .count();
    let total_time: f64 = records
        .iter()
        .map(|record| record.processing_time_seconds)
        .sum();

    Ok(StatsResponseDto {
        total,
        failed,
        success_rate: format!("{:.2}%", (total - failed) as f64 / total as f64 * 100.0),
        average_processing_time_seconds: total_time / total as f64,
    })
}

/// Run CPU-bound image work on the blocking pool
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> ImageResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("Image processing task failed: {}", e)))?
        .map_err(AppError::from)
}
