use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::images::models::ImageRecord;

/// Catalog of processed images
///
/// Handlers only see this trait, so the backing store can change without
/// touching request logic.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Append a record to the catalog
    async fn add(&self, record: ImageRecord) -> Result<()>;

    /// All records in insertion order
    async fn list(&self) -> Result<Vec<ImageRecord>>;

    async fn get_by_id(&self, image_id: Uuid) -> Result<Option<ImageRecord>>;
}

/// Process-lifetime catalog guarded by a read-write lock
#[derive(Default)]
pub struct InMemoryImageRepository {
    records: RwLock<Vec<ImageRecord>>,
}

impl InMemoryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn add(&self, record: ImageRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ImageRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn get_by_id(&self, image_id: Uuid) -> Result<Option<ImageRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.image_id == image_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::images::models::ProcessingStatus;
    use crate::modules::imaging::ImageMetadata;
    use chrono::Utc;
    use std::sync::Arc;
    use tokio_test::assert_ok;

    fn record(name: &str) -> ImageRecord {
        ImageRecord {
            image_id: Uuid::new_v4(),
            original_name: name.to_string(),
            processed_at: Utc::now(),
            caption: None,
            metadata: ImageMetadata {
                width: 1,
                height: 1,
                format: "PNG".to_string(),
                size_bytes: 1,
            },
            status: ProcessingStatus::Success,
            error: None,
            processing_time_seconds: 0.1,
        }
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = InMemoryImageRepository::new();
        for name in ["first.png", "second.png", "third.png"] {
            assert_ok!(repo.add(record(name)).await);
        }

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.original_name)
            .collect();

        assert_eq!(names, vec!["first.png", "second.png", "third.png"]);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let repo = InMemoryImageRepository::new();
        let stored = record("a.png");
        let id = stored.image_id;
        repo.add(stored.clone()).await.unwrap();

        assert_eq!(repo.get_by_id(id).await.unwrap(), Some(stored));
        assert_eq!(repo.get_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_all_kept() {
        let repo = Arc::new(InMemoryImageRepository::new());

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.add(record(&format!("{}.png", i))).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(repo.list().await.unwrap().len(), 32);
    }
}
