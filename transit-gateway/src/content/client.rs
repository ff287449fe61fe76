//! HTTP client for content documents.

use serde::de::DeserializeOwned;

use super::error::ContentError;

/// Fetches JSON content documents (fare tables, advert catalogs, ...).
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
}

impl ContentClient {
    /// Create a new content client with the given request timeout.
    pub fn new(timeout_secs: u64) -> Result<Self, ContentError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { http })
    }

    /// GET a URL and deserialize its JSON body.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ContentError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ContentError::Json {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        assert!(ContentClient::new(30).is_ok());
    }
}
