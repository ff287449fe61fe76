//! Geocoder error types.

/// Errors from the geocoding backend.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned an error status
    #[error("geocoder error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Nothing to look up
    #[error("empty geocode query")]
    EmptyQuery,

    /// No candidate matched the text
    #[error("no match for {0:?}")]
    NotFound(String),

    /// Candidate had no usable coordinate
    #[error("bad coordinate for {text:?}: {reason}")]
    BadCoordinate { text: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::NotFound("ohsu".into());
        assert_eq!(err.to_string(), "no match for \"ohsu\"");

        let err = GeocodeError::Api {
            status: 503,
            message: "down".into(),
        };
        assert_eq!(err.to_string(), "geocoder error 503: down");

        assert_eq!(GeocodeError::EmptyQuery.to_string(), "empty geocode query");
    }
}
