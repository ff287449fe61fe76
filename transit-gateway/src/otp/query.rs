//! Planner query construction.
//!
//! Maps a resolved [`TripRequest`] onto the planner's query-string contract.
//! "Latest trip" requests are rewritten through
//! [`TripRequest::apply_latest_correction`] first, because the planner only
//! understands depart-at and arrive-by.

use std::borrow::Cow;
use std::collections::HashSet;

use reqwest::Url;

use crate::domain::{AgencyQualifiedId, TripRequest};

/// Date format the planner accepts.
const DATE_FORMAT: &str = "%m-%d-%Y";

/// Time format the planner accepts, e.g. `1:30am`.
const TIME_FORMAT: &str = "%-I:%M%P";

/// Query parameters for one planner call, in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerQuery {
    params: Vec<(&'static str, String)>,
}

impl PlannerQuery {
    /// Build the query for a request.
    ///
    /// `cancelled` holds routes the operator has cancelled; they are merged
    /// with the rider's own bans into a single `bannedRoutes` list.
    pub fn build(request: &TripRequest, cancelled: &[AgencyQualifiedId]) -> Self {
        let effective: Cow<'_, TripRequest> = if request.is_latest() {
            Cow::Owned(request.apply_latest_correction())
        } else {
            Cow::Borrowed(request)
        };

        let mut params = vec![
            ("fromPlace", effective.origin.clone()),
            ("toPlace", effective.destination.clone()),
            ("date", effective.date.format(DATE_FORMAT).to_string()),
            ("time", effective.time.format(TIME_FORMAT).to_string()),
            (
                "arriveBy",
                effective.arrive_mode.is_arrive_by().to_string(),
            ),
        ];

        if let Some(modes) = effective.modes.as_ref().filter(|m| !m.is_empty()) {
            params.push(("mode", modes.clone()));
        }

        if let Some(meters) = effective.max_walk_meters {
            params.push(("maxWalkDistance", meters.to_string()));
        }

        if let Some(banned) = banned_routes(&effective.banned_routes, cancelled) {
            params.push(("bannedRoutes", banned));
        }

        Self { params }
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Look up a parameter value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append the parameters to the planner's plan endpoint.
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut()
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())));
        url
    }
}

/// Merge rider bans and cancellations into the planner's list form.
///
/// Order is preserved (rider bans first) and duplicates dropped. Returns
/// `None` when there is nothing to ban.
fn banned_routes(
    requested: &[AgencyQualifiedId],
    cancelled: &[AgencyQualifiedId],
) -> Option<String> {
    let mut seen = HashSet::new();
    let merged: Vec<String> = requested
        .iter()
        .chain(cancelled)
        .filter(|id| seen.insert(*id))
        .map(AgencyQualifiedId::to_banned_route)
        .collect();

    if merged.is_empty() {
        None
    } else {
        Some(merged.join(","))
    }
}
