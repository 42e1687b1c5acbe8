use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::core::config::CaptionConfig;
use crate::core::error::{AppError, Result};
use crate::modules::captioning::CaptionModel;

/// One candidate returned by an image-to-text inference endpoint
#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Caption model served over HTTP (Hugging Face inference API style)
///
/// The raw image is posted as the request body; the endpoint answers with
/// `[{"generated_text": "..."}]`.
pub struct HttpCaptionModel {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
    model_name: String,
}

impl HttpCaptionModel {
    pub fn new(config: &CaptionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("ImageIntake/0.1 (captioning)")
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
            model_name: config.model_name.clone(),
        })
    }
}

#[async_trait]
impl CaptionModel for HttpCaptionModel {
    async fn caption(&self, image: &[u8], content_type: &str) -> Result<String> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, content_type)
            .body(image.to_vec());

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(
            "Requesting caption from {} ({} bytes)",
            self.model_name,
            image.len()
        );

        let response = request.send().await.map_err(|e| {
            tracing::error!("Caption request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Caption request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Caption endpoint returned status: {}", status);
            return Err(AppError::ExternalServiceError(format!(
                "Caption endpoint returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let candidates: Vec<GeneratedText> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse caption response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse caption response: {}", e))
        })?;

        first_caption(candidates)
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

fn first_caption(candidates: Vec<GeneratedText>) -> Result<String> {
    candidates
        .into_iter()
        .map(|c| c.generated_text.trim().to_string())
        .find(|text| !text.is_empty())
        .ok_or_else(|| AppError::ExternalServiceError("Caption response was empty".to_string()))
}
