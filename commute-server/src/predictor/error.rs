//! Delay predictor error types.

/// Errors that can occur when calling the delay prediction service.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
