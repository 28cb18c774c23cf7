//! Geocoder error types.

/// Errors that can occur when resolving a place name.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Geocoder returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
