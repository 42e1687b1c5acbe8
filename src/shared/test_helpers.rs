use async_trait::async_trait;
use image::{codecs::jpeg::JpegEncoder, DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};
use crate::features::images::{ImageService, InMemoryImageRepository};
use crate::modules::captioning::CaptionModel;
use crate::modules::storage::LocalStorage;

const TEST_CAPTION_TIMEOUT: Duration = Duration::from_millis(250);

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Encoded JPEG of the given size
pub fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    gradient(width, height)
        .write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, 90))
        .unwrap();
    bytes
}

/// Encoded PNG of the given size
pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(gradient(width, height))
        .write_to(&mut bytes, ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

enum StubBehaviour {
    Caption(String),
    Fail(String),
    Hang,
}

/// Caption model with a scripted answer
pub struct StubCaptionModel {
    behaviour: StubBehaviour,
}

impl StubCaptionModel {
    pub fn caption(text: &str) -> Self {
        Self {
            behaviour: StubBehaviour::Caption(text.to_string()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            behaviour: StubBehaviour::Fail(reason.to_string()),
        }
    }

    /// Never answers within the test timeout
    pub fn hanging() -> Self {
        Self {
            behaviour: StubBehaviour::Hang,
        }
    }
}

#[async_trait]
impl CaptionModel for StubCaptionModel {
    async fn caption(&self, _image: &[u8], _content_type: &str) -> Result<String> {
        match &self.behaviour {
            StubBehaviour::Caption(text) => Ok(text.clone()),
            StubBehaviour::Fail(reason) => Err(AppError::ExternalServiceError(reason.clone())),
            StubBehaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("too late".to_string())
            }
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Image service over fresh temporary directories
pub async fn test_image_service(model: StubCaptionModel) -> (Arc<ImageService>, Arc<LocalStorage>) {
    let root = std::env::temp_dir().join(format!("image-intake-test-{}", Uuid::new_v4()));
    let storage = Arc::new(LocalStorage::new(StorageConfig {
        image_dir: root.join("image"),
        thumbnail_dir: root.join("thumbnails"),
    }));
    storage.ensure_directories_exist().await.unwrap();

    let service = Arc::new(ImageService::new(
        Arc::new(InMemoryImageRepository::new()),
        Arc::clone(&storage),
        Arc::new(model),
        TEST_CAPTION_TIMEOUT,
        "http://localhost:8000".to_string(),
    ));

    (service, storage)
}
