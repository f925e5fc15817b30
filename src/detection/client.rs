use super::normalize::normalize;
use super::types::{DetectInputs, DetectRequest, Detections, ImageInput};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Hosted workflow endpoint the app submits images to.
pub const DEFAULT_ENDPOINT: &str =
    "https://serverless.roboflow.com/diabetesapp/workflows/detect-count-and-visualize";

/// Detection request errors. Surfaced to the caller as-is; there is no
/// retry layer.
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Detection API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Missing API key")]
    MissingApiKey,
}

/// Detection client configuration.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    pub api_key: String,
    pub endpoint: String,
}

impl DetectionConfig {
    /// Build from an optional explicit key, falling back to the
    /// `ROBOFLOW_API_KEY` environment variable.
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key
            .or_else(|| std::env::var("ROBOFLOW_API_KEY").ok())
            .unwrap_or_default();

        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Override the endpoint (for testing / self-hosted deployments).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// What a detection call produced: the provider's response verbatim, plus
/// the best-effort normalized view when one could be derived.
#[derive(Debug, Clone)]
pub struct DetectionOutcome {
    pub raw: Value,
    pub normalized: Option<Detections>,
}

/// Client for the wound-detection workflow endpoint.
#[derive(Debug, Clone)]
pub struct DetectionClient {
    client: Client,
    config: DetectionConfig,
}

impl DetectionClient {
    pub fn new(config: DetectionConfig) -> Result<Self, DetectionError> {
        if config.api_key.is_empty() {
            return Err(DetectionError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, config })
    }

    /// Submit an image for detection. One shot: network errors, non-success
    /// statuses, and undecodable bodies all surface directly. A response
    /// that decodes but cannot be normalized is not an error; `normalized`
    /// is simply `None`.
    pub async fn detect(&self, image: ImageInput) -> Result<DetectionOutcome, DetectionError> {
        let request = DetectRequest {
            api_key: self.config.api_key.clone(),
            inputs: DetectInputs {
                image: image.clone(),
            },
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), message = %message, "Detection API error");
            return Err(DetectionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: Value = response.json().await?;

        let normalized = normalize(&raw, Some(&image));
        if normalized.is_none() {
            tracing::warn!("Failed to normalize detection response for viewer");
        }

        Ok(DetectionOutcome { raw, normalized })
    }
}
