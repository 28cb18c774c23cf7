//! OpenRouteService directions HTTP client.
//!
//! Provides an async method for two-point directions queries. Handles
//! authentication, bounded concurrency and conversion to [`RouteResult`].

use std::sync::Arc;

use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Coordinate, RouteResult, TravelMode};
use crate::pipeline::DirectionsProvider;

use super::error::DirectionsError;
use super::types::{DirectionsRequest, DirectionsResponse, OrsErrorPayload};

/// Default base URL for the OpenRouteService API.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the directions client.
#[derive(Debug, Clone)]
pub struct OrsConfig {
    /// API key, sent in the `Authorization` header
    pub api_key: String,
    /// Base URL for the API (defaults to the public ORS endpoint)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OrsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 15,
        }
    }

    /// Set a custom base URL (for self-hosted ORS or testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// OpenRouteService directions client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    base_url: Url,
    semaphore: Arc<Semaphore>,
}

impl OrsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OrsConfig) -> Result<Self, DirectionsError> {
        let mut headers = HeaderMap::new();

        // ORS takes the bare key, no "Bearer" prefix
        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| DirectionsError::ApiError {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert(reqwest::header::AUTHORIZATION, api_key);

        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| DirectionsError::ApiError {
                status: 0,
                message: format!("Invalid base URL: {}", config.base_url),
            })?;

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Get a route between two points for an ORS profile (e.g. `driving-car`).
    pub async fn get_route(
        &self,
        origin: Coordinate,
        dest: Coordinate,
        profile: &str,
    ) -> Result<RouteResult, DirectionsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DirectionsError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = self.directions_url(profile)?;
        debug!(%origin, %dest, profile, "requesting directions");

        let response = self
            .http
            .post(url)
            .json(&DirectionsRequest::between(origin, dest))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(DirectionsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectionsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured ORS message when there is one
            let message = match serde_json::from_str::<OrsErrorPayload>(&body) {
                Ok(payload) => format!("{} (code {})", payload.error.message, payload.error.code),
                Err(_) => body,
            };
            return Err(DirectionsError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;

        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        parsed
            .features
            .into_iter()
            .next()
            .map(|feature| feature.into_route_result())
            .ok_or(DirectionsError::NoRoute)
    }

    /// `{base}/v2/directions/{profile}/geojson`, with the profile
    /// percent-encoded as a single path segment.
    fn directions_url(&self, profile: &str) -> Result<Url, DirectionsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DirectionsError::ApiError {
                status: 0,
                message: format!("Invalid base URL: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(["v2", "directions", profile, "geojson"]);
        Ok(url)
    }
}

impl DirectionsProvider for OrsClient {
    type Error = DirectionsError;

    async fn route(
        &self,
        origin: Coordinate,
        dest: Coordinate,
        mode: &TravelMode,
    ) -> Result<RouteResult, DirectionsError> {
        self.get_route(origin, dest, mode.id()).await
    }
}
