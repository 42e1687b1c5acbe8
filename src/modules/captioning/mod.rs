//! Captioning module - pretrained image captioning models
//!
//! The model is treated as a black box: image bytes in, one sentence out.

mod http_model;

pub use http_model::HttpCaptionModel;

use async_trait::async_trait;

use crate::core::error::Result;

/// A model that describes an image in natural language
#[async_trait]
pub trait CaptionModel: Send + Sync {
    /// Produce a single descriptive caption for an encoded image
    async fn caption(&self, image: &[u8], content_type: &str) -> Result<String>;

    /// Human-readable model identifier for logs
    fn name(&self) -> &str;
}

/// Result of a caption attempt once timeouts and model errors are folded in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionOutcome {
    Generated(String),
    Failed(String),
}
