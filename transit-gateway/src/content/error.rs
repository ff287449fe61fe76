//! Content source error types.

/// Errors that can occur when loading a content source.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Content service returned an error status
    #[error("content error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
