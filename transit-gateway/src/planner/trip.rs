//! Trip planning orchestration.
//!
//! One call per rider request: resolve endpoints that lack coordinates,
//! build the planner query, call the planner, translate the response and
//! attach adverts. Every failure along the way ends up in the output as a
//! [`PlanError`] or as the empty output; nothing here returns `Err`.

use futures::future::join;
use tracing::{debug, warn};

use crate::content::ContentSources;
use crate::domain::{
    PlanError, PlanParams, TripRequest, has_valid_coord, message, named_location, strip_coord,
};
use crate::geocoder::{GeocodeError, Geocoder};
use crate::otp::{PlannerQuery, PlannerService, translate};

use super::config::PlannerConfig;
use super::output::TripPlanOutput;

const ORIGIN_UNKNOWN: &str = "Origin is unknown. Can you be a bit more descriptive?";
const DESTINATION_UNKNOWN: &str = "Destination is unknown. Can you be a bit more descriptive?";
const PLANNER_UNAVAILABLE: &str =
    "We're sorry. The trip planner is temporarily unavailable. Please try again later.";

/// Orchestrates geocoding, the planner call and response translation.
///
/// Holds only read-only state, so a single instance serves concurrent
/// requests.
pub struct TripPlanner<G, P> {
    geocoder: G,
    planner: P,
    content: ContentSources,
    config: PlannerConfig,
}

impl<G: Geocoder, P: PlannerService> TripPlanner<G, P> {
    pub fn new(geocoder: G, planner: P, content: ContentSources, config: PlannerConfig) -> Self {
        Self {
            geocoder,
            planner,
            content,
            config,
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    /// Whether output is pretty-printed: when either the configuration or
    /// the caller asks.
    pub fn wants_pretty(&self, requested: bool) -> bool {
        self.config.pretty || requested
    }

    /// Plan a trip.
    ///
    /// The returned output echoes the request as it stood after geocoding
    /// and before any "latest" correction.
    pub async fn plan_trip(&self, request: TripRequest) -> TripPlanOutput {
        let request = match self.resolve_endpoints(request).await {
            Ok(request) => request,
            Err(error) => return TripPlanOutput::from_error(error),
        };
        let params = PlanParams::from_request(&request);

        let query = PlannerQuery::build(&request, self.content.cancelled.routes());
        let url = query.to_url(&self.config.plan_url);

        let raw = match self.planner.call(&url).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(%url, error = %e, "planner call failed");
                return TripPlanOutput::from_error(
                    PlanError::new(message::SYSTEM_ERROR, PLANNER_UNAVAILABLE).with_params(params),
                );
            }
        };

        let output = TripPlanOutput::from(translate(&raw, &params, self.content.fares.as_deref()));

        let (Some(adverts), Some(plan)) = (&self.content.adverts, &output.plan) else {
            return output;
        };
        let mode = plan.dominant_transit_mode();
        let lang = request.lang_or_default();
        debug!(?mode, lang, "looking up adverts");
        let found = adverts.query(mode, lang);
        output.with_adverts(found)
    }

    /// Plan a trip and render it as JSON.
    ///
    /// Pretty-printed when either the configuration or the request asks.
    pub async fn plan_trip_json(&self, request: TripRequest) -> String {
        let pretty = self.wants_pretty(request.pretty);
        self.plan_trip(request).await.render(pretty)
    }

    /// Geocode whichever endpoints lack a coordinate.
    ///
    /// Each unresolved endpoint is looked up exactly once; the two lookups
    /// run concurrently. Origin failure wins when both fail.
    async fn resolve_endpoints(&self, mut request: TripRequest) -> Result<TripRequest, PlanError> {
        let (origin, destination) = join(
            self.resolve(&request.origin),
            self.resolve(&request.destination),
        )
        .await;

        let geocode_error = |id: i32, msg: &str, location: &str, e: GeocodeError| {
            warn!(location, error = %e, "geocoding failed");
            PlanError::new(id, msg).with_params(PlanParams::from_request(&request))
        };

        let origin = origin.map_err(|e| {
            geocode_error(message::GEOCODE_FROM_NOT_FOUND, ORIGIN_UNKNOWN, &request.origin, e)
        })?;
        let destination = destination.map_err(|e| {
            geocode_error(
                message::GEOCODE_TO_NOT_FOUND,
                DESTINATION_UNKNOWN,
                &request.destination,
                e,
            )
        })?;

        request.origin = origin;
        request.destination = destination;
        Ok(request)
    }

    /// Resolve one location to a planner place string.
    async fn resolve(&self, location: &str) -> Result<String, GeocodeError> {
        if has_valid_coord(location) {
            return Ok(location.trim().to_string());
        }

        let text = strip_coord(location);
        let coord = self.geocoder.resolve(text).await?;
        debug!(text, %coord, "geocoded location");
        Ok(named_location(text, coord))
    }
}
