//! Planner client error types.

/// Errors from the planner HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Planner returned an error status code
    #[error("planner error {status}: {message}")]
    Api { status: u16, message: String },

    /// Base URL could not be parsed
    #[error("invalid planner URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
}
