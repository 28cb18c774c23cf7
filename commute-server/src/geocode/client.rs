//! Nominatim search client.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::domain::Coordinate;
use crate::pipeline::Geocoder;

use super::GeocodedPlace;
use super::error::GeocodeError;

/// Default search endpoint (public OpenStreetMap Nominatim).
pub const DEFAULT_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim's usage policy requires an identifying User-Agent.
const DEFAULT_USER_AGENT: &str = "EcoCommute-App";

/// One search hit. Nominatim sends coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl SearchHit {
    fn into_place(self) -> Result<GeocodedPlace, GeocodeError> {
        let lat = self.lat.parse::<f64>();
        let lng = self.lon.parse::<f64>();
        let (Ok(lat), Ok(lng)) = (lat, lng) else {
            return Err(GeocodeError::Json {
                message: format!("non-numeric coordinates: {},{}", self.lat, self.lon),
            });
        };
        let coordinate = Coordinate::new(lat, lng).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        Ok(GeocodedPlace {
            coordinate,
            display_name: self.display_name,
        })
    }
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Full URL of the search endpoint
    pub search_url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom search URL (for self-hosted instances or testing).
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    /// Set the User-Agent sent with every request.
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Client for a Nominatim-compatible search API.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    search_url: String,
}

impl NominatimClient {
    /// Create a new geocoding client.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        let ua = HeaderValue::from_str(&config.user_agent).map_err(|_| GeocodeError::Api {
            status: 0,
            message: "Invalid User-Agent".to_string(),
        })?;
        headers.insert(USER_AGENT, ua);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            search_url: config.search_url,
        })
    }

    /// Look up the best match for `query`. Returns `None` when nothing matches.
    pub async fn search(&self, query: &str) -> Result<Option<GeocodedPlace>, GeocodeError> {
        debug!(query, "geocoding");

        let response = self
            .http
            .get(&self.search_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let hits: Vec<SearchHit> = serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        hits.into_iter().next().map(SearchHit::into_place).transpose()
    }
}

impl Geocoder for NominatimClient {
    type Error = GeocodeError;

    async fn geocode(&self, name: &str) -> Result<Option<GeocodedPlace>, GeocodeError> {
        self.search(name).await
    }
}
