//! Optional content sources for trip plans.
//!
//! Fares, adverts and cancelled routes are each optional. Which ones exist
//! is decided once at startup from configuration; a source that fails to
//! load is logged and left out rather than failing the process.

mod adverts;
mod cancelled;
mod client;
mod error;
mod fares;

use std::sync::Arc;

use tracing::{info, warn};

pub use adverts::{Advert, AdvertCatalog, AdvertSource};
pub use cancelled::{CancelledRoutes, CancelledRoutesDoc};
pub use client::ContentClient;
pub use error::ContentError;
pub use fares::{FareSource, FareTable};

/// Where each optional source lives. `None` means "not configured".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentConfig {
    pub adverts_url: Option<String>,
    pub fares_url: Option<String>,
    pub cancelled_routes_url: Option<String>,
}

/// The content sources available to the trip planner.
#[derive(Clone, Default)]
pub struct ContentSources {
    pub fares: Option<Arc<dyn FareSource>>,
    pub adverts: Option<Arc<dyn AdvertSource>>,
    pub cancelled: CancelledRoutes,
}

impl std::fmt::Debug for ContentSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentSources")
            .field("fares", &self.fares.is_some())
            .field("adverts", &self.adverts.is_some())
            .field("cancelled", &self.cancelled.routes().len())
            .finish()
    }
}

impl ContentSources {
    /// No optional content at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_fares(mut self, fares: impl FareSource + 'static) -> Self {
        self.fares = Some(Arc::new(fares));
        self
    }

    pub fn with_adverts(mut self, adverts: impl AdvertSource + 'static) -> Self {
        self.adverts = Some(Arc::new(adverts));
        self
    }

    pub fn with_cancelled(mut self, cancelled: CancelledRoutes) -> Self {
        self.cancelled = cancelled;
        self
    }

    /// Load every configured source.
    ///
    /// Never fails: each source that cannot be fetched is logged as a
    /// warning and treated as absent.
    pub async fn load(client: &ContentClient, config: &ContentConfig) -> Self {
        let mut sources = Self::none();

        if let Some(url) = &config.fares_url {
            match client.fetch_json::<FareTable>(url).await {
                Ok(table) => {
                    info!(%url, modes = table.modes.len(), "loaded fare table");
                    sources = sources.with_fares(table);
                }
                Err(e) => warn!(%url, error = %e, "fare table unavailable"),
            }
        }

        if let Some(url) = &config.adverts_url {
            match client.fetch_json::<AdvertCatalog>(url).await {
                Ok(catalog) => {
                    info!(%url, "loaded advert catalog");
                    sources = sources.with_adverts(catalog);
                }
                Err(e) => warn!(%url, error = %e, "advert catalog unavailable"),
            }
        }

        if let Some(url) = &config.cancelled_routes_url {
            match client.fetch_json::<CancelledRoutesDoc>(url).await {
                Ok(doc) => {
                    let cancelled = CancelledRoutes::from_doc(doc);
                    info!(%url, routes = cancelled.routes().len(), "loaded cancelled routes");
                    sources = sources.with_cancelled(cancelled);
                }
                Err(e) => warn!(%url, error = %e, "cancelled routes unavailable"),
            }
        }

        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn nothing_configured_loads_nothing() {
        let client = ContentClient::new(1).unwrap();
        let sources = ContentSources::load(&client, &ContentConfig::default()).await;

        assert!(sources.fares.is_none());
        assert!(sources.adverts.is_none());
        assert!(sources.cancelled.is_empty());
    }

    #[test]
    fn debug_shows_presence() {
        let sources = ContentSources::none().with_adverts(AdvertCatalog::default());
        let text = format!("{:?}", sources);
        assert!(text.contains("adverts: true"));
        assert!(text.contains("fares: false"));
    }
}
