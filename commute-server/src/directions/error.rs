//! Directions client error types.

/// Errors from the directions HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected GeoJSON
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// The provider answered but returned no route
    #[error("no route in directions response")]
    NoRoute,

    /// Rate limited by the API
    #[error("rate limited by directions API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|body| format!(" (body: {body})"))
        .unwrap_or_default()
}
