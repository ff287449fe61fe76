//! Planner HTTP client.
//!
//! One GET per trip request, no retries. Transport failures and non-2xx
//! statuses propagate to the orchestrator, which decides how to degrade.

use std::future::Future;

use reqwest::Url;
use tracing::debug;

use super::error::PlannerError;

/// Default plan endpoint.
const DEFAULT_PLAN_URL: &str = "http://localhost/prod";

/// Issues raw calls against the planner.
pub trait PlannerService: Send + Sync {
    /// Fetch the raw response body for a fully-built plan URL.
    fn call(&self, url: &Url) -> impl Future<Output = Result<String, PlannerError>> + Send;
}

/// Configuration for the planner client.
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// The planner's plan endpoint; query parameters are appended to it
    pub plan_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OtpConfig {
    /// Create a config for the given plan endpoint.
    pub fn new(plan_url: impl Into<String>) -> Self {
        Self {
            plan_url: plan_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Parse the plan endpoint.
    pub fn parsed_url(&self) -> Result<Url, PlannerError> {
        Url::parse(&self.plan_url).map_err(|e| PlannerError::InvalidUrl {
            url: self.plan_url.clone(),
            message: e.to_string(),
        })
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PLAN_URL)
    }
}

/// HTTP client for the external trip planner.
#[derive(Debug, Clone)]
pub struct OtpClient {
    http: reqwest::Client,
}

impl OtpClient {
    /// Create a new planner client. The configured plan URL must parse.
    pub fn new(config: OtpConfig) -> Result<Self, PlannerError> {
        config.parsed_url()?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

impl PlannerService for OtpClient {
    async fn call(&self, url: &Url) -> Result<String, PlannerError> {
        debug!(%url, "calling planner");

        let response = self
            .http
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.plan_url, DEFAULT_PLAN_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = OtpConfig::new("http://maps.trimet.org/prod").with_timeout(10);
        assert_eq!(config.plan_url, "http://maps.trimet.org/prod");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn client_creation() {
        assert!(OtpClient::new(OtpConfig::default()).is_ok());
    }

    #[test]
    fn invalid_url_rejected() {
        let err = OtpClient::new(OtpConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidUrl { .. }));
    }
}
