//! Solr geocoder HTTP client.

use std::future::Future;

use serde::Deserialize;
use tracing::debug;

use crate::domain::Coordinate;

use super::error::GeocodeError;

/// Default base URL for the Solr geocoder.
const DEFAULT_BASE_URL: &str = "http://localhost/solr";

/// Resolves free text to a coordinate.
///
/// Implementations surface every backend failure to the caller and never
/// retry; whether a failure is fatal is the caller's decision.
pub trait Geocoder: Send + Sync {
    fn resolve(&self, text: &str) -> impl Future<Output = Result<Coordinate, GeocodeError>> + Send;
}

/// Solr `select` response envelope.
#[derive(Debug, Deserialize)]
struct SolrResponse {
    response: SolrResult,
}

#[derive(Debug, Deserialize)]
struct SolrResult {
    docs: Vec<SolrDoc>,
}

/// A geocoder candidate. Only the coordinate is needed.
#[derive(Debug, Clone, Deserialize)]
pub struct SolrDoc {
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Configuration for the Solr geocoder client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Base URL of the Solr core (without `/select`)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocoderConfig {
    /// Create a config pointing at the given Solr core.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Geocoder backed by a Solr index of named places.
#[derive(Debug, Clone)]
pub struct SolrGeocoder {
    http: reqwest::Client,
    base_url: String,
}

impl SolrGeocoder {
    /// Create a new Solr geocoder client.
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the best candidate for the text.
    pub async fn top_candidate(&self, text: &str) -> Result<SolrDoc, GeocodeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let url = format!("{}/select", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("q", text), ("rows", "1"), ("wt", "json")])
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
        let parsed: SolrResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        let doc = parsed
            .response
            .docs
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(text.to_string()))?;

        debug!(query = text, name = ?doc.name, "geocoded");
        Ok(doc)
    }
}

impl Geocoder for SolrGeocoder {
    async fn resolve(&self, text: &str) -> Result<Coordinate, GeocodeError> {
        let doc = self.top_candidate(text).await?;
        Coordinate::new(doc.lat, doc.lon).map_err(|e| GeocodeError::BadCoordinate {
            text: text.trim().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GeocoderConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_timeout() {
        let config = GeocoderConfig::new("http://maps.example.org/solr").with_timeout(5);
        assert_eq!(config.base_url, "http://maps.example.org/solr");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn trailing_slash_trimmed() {
        let geo = SolrGeocoder::new(GeocoderConfig::new("http://localhost/solr/")).unwrap();
        assert_eq!(geo.base_url, "http://localhost/solr");
    }

    #[tokio::test]
    async fn empty_query_short_circuits() {
        let geo = SolrGeocoder::new(GeocoderConfig::default()).unwrap();
        let err = geo.resolve("   ").await.unwrap_err();
        assert!(matches!(err, GeocodeError::EmptyQuery));
    }
}
