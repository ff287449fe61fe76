//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedGeocoder;
use crate::geocoder::SolrGeocoder;
use crate::otp::OtpClient;
use crate::planner::TripPlanner;
use crate::transit::TransitRepository;

/// The trip planner as wired up in production.
pub type GatewayPlanner = TripPlanner<CachedGeocoder<SolrGeocoder>, OtpClient>;

/// Shared application state.
///
/// Everything here is read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    /// Trip planner orchestrator
    pub planner: Arc<GatewayPlanner>,

    /// Route database behind the transit index
    pub transit: Arc<dyn TransitRepository>,

    /// Namespace override for route ids when the request names no agency
    pub agency_id: Option<String>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        planner: GatewayPlanner,
        transit: Arc<dyn TransitRepository>,
        agency_id: Option<String>,
    ) -> Self {
        Self {
            planner: Arc::new(planner),
            transit,
            agency_id,
        }
    }

    /// The id namespace for one request: the request's own agency, else the
    /// configured one.
    pub fn agency_override<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested_agency(requested).or(self.agency_id.as_deref())
    }
}

/// The agency a request names explicitly, if any.
pub fn requested_agency(requested: Option<&str>) -> Option<&str> {
    requested.map(str::trim).filter(|a| !a.is_empty())
}
