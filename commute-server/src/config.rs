//! Process configuration.
//!
//! Read once at startup from environment variables and handed to the
//! components that need it; nothing below `main` looks at the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::directions::DEFAULT_BASE_URL;
use crate::geocode::DEFAULT_SEARCH_URL;
use crate::predictor::DEFAULT_PREDICT_URL;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 4000;

/// Error building configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directions API key. Without one every route is simulated.
    pub ors_api_key: Option<String>,

    /// Directions API base URL.
    pub ors_base_url: String,

    /// Delay predictor endpoint.
    pub ml_service_url: String,

    /// Geocoder search endpoint.
    pub geocoder_url: String,

    /// HTTP port.
    pub port: u16,

    /// Route store snapshot file. In-memory only when unset.
    pub route_store_path: Option<PathBuf>,
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            ors_api_key: get("ORS_API_KEY"),
            ors_base_url: get("ORS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ml_service_url: get("ML_SERVICE_URL")
                .unwrap_or_else(|| DEFAULT_PREDICT_URL.to_string()),
            geocoder_url: get("GEOCODER_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            port,
            route_store_path: get("ROUTE_STORE_PATH").map(PathBuf::from),
        })
    }

    /// Address to listen on (all interfaces).
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ors_api_key: None,
            ors_base_url: DEFAULT_BASE_URL.to_string(),
            ml_service_url: DEFAULT_PREDICT_URL.to_string(),
            geocoder_url: DEFAULT_SEARCH_URL.to_string(),
            port: DEFAULT_PORT,
            route_store_path: None,
        }
    }
}
