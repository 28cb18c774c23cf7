//! Delay predictor HTTP client.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pipeline::DelayPredictor;

use super::error::PredictorError;

/// Default prediction endpoint (the ML service running locally).
pub const DEFAULT_PREDICT_URL: &str = "http://localhost:8000/predict";

/// Inputs to a travel-time prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayFeatures {
    pub distance_km: f64,
    /// Local hour, 0..=23.
    pub hour_of_day: u32,
    pub mode: String,
}

/// Request envelope expected by the service.
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    features: &'a DelayFeatures,
}

/// Service answer. The prediction may be missing or null.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub predicted_duration_min: Option<f64>,
}

/// Configuration for the predictor client.
#[derive(Debug, Clone)]
pub struct MlConfig {
    /// Full URL of the predict endpoint
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MlConfig {
    /// Create a config for the given predict endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 10,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for MlConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREDICT_URL)
    }
}

/// Client for the travel-time prediction service.
#[derive(Debug, Clone)]
pub struct MlClient {
    http: reqwest::Client,
    url: String,
}

impl MlClient {
    /// Create a new predictor client.
    pub fn new(config: MlConfig) -> Result<Self, PredictorError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Ask the service for a predicted duration in minutes.
    pub async fn predict_duration(
        &self,
        features: &DelayFeatures,
    ) -> Result<Option<f64>, PredictorError> {
        debug!(mode = %features.mode, distance_km = features.distance_km, "requesting prediction");

        let response = self
            .http
            .post(&self.url)
            .json(&PredictRequest { features })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PredictorError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let prediction: Prediction =
            serde_json::from_str(&body).map_err(|e| PredictorError::Json {
                message: e.to_string(),
            })?;

        Ok(prediction.predicted_duration_min)
    }
}

impl DelayPredictor for MlClient {
    type Error = PredictorError;

    async fn predict(&self, features: &DelayFeatures) -> Result<Option<f64>, PredictorError> {
        self.predict_duration(features).await
    }
}
