//! Local filesystem storage
//!
//! Keeps uploaded originals and generated thumbnails in two directories.
//! Files are addressed by image id so the catalog can find them again:
//! originals as `{id}_{name}` and thumbnails as `{id}_{label}.jpg`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;
use crate::modules::imaging::ThumbnailSize;

/// Filesystem-backed storage for originals and thumbnails
#[derive(Debug, Clone)]
pub struct LocalStorage {
    image_dir: PathBuf,
    thumbnail_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            image_dir: config.image_dir,
            thumbnail_dir: config.thumbnail_dir,
        }
    }

    /// Create both storage directories if they are missing
    pub async fn ensure_directories_exist(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.image_dir).await?;
        tokio::fs::create_dir_all(&self.thumbnail_dir).await?;
        Ok(())
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn thumbnail_dir(&self) -> &Path {
        &self.thumbnail_dir
    }

    /// Path of the stored original for an upload
    pub fn original_path(&self, image_id: Uuid, original_name: &str) -> PathBuf {
        self.image_dir
            .join(format!("{}_{}", image_id, sanitize_file_name(original_name)))
    }

    /// Path of a thumbnail variant
    pub fn thumbnail_path(&self, image_id: Uuid, size: ThumbnailSize) -> PathBuf {
        self.thumbnail_dir
            .join(format!("{}_{}.jpg", image_id, size.label()))
    }

    /// Write the raw upload bytes and return the path written
    pub async fn save_original(
        &self,
        image_id: Uuid,
        original_name: &str,
        data: &[u8],
    ) -> Result<PathBuf, AppError> {
        let path = self.original_path(image_id, original_name);
        tokio::fs::write(&path, data).await?;

        debug!("Original saved: {} ({} bytes)", path.display(), data.len());

        Ok(path)
    }

    /// Write an encoded JPEG thumbnail
    pub async fn save_thumbnail(
        &self,
        image_id: Uuid,
        size: ThumbnailSize,
        jpeg: &[u8],
    ) -> Result<PathBuf, AppError> {
        let path = self.thumbnail_path(image_id, size);
        tokio::fs::write(&path, jpeg).await?;

        debug!("Thumbnail saved: {}", path.display());

        Ok(path)
    }

    /// Read a thumbnail, returning `None` when it was never written
    pub async fn read_thumbnail(
        &self,
        image_id: Uuid,
        size: ThumbnailSize,
    ) -> Result<Option<Vec<u8>>, AppError> {
        let path = self.thumbnail_path(image_id, size);

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reduce a client-supplied name to a single safe path component
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect();

    match cleaned.trim() {
        "" | "." | ".." => "upload".to_string(),
        trimmed => trimmed.to_string(),
    }
}
