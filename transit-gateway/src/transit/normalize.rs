//! Route and agency normalization.
//!
//! Every entry point funnels its records through [`route_from_record`], so
//! list and single-route responses share the same field semantics. Lookup
//! failures are logged and come back empty; one bad record never sinks a
//! whole listing.

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::{Agency, AgencyQualifiedId, Route, RouteDetail, TransitMode, UnknownRouteType};

use super::repository::{AgencyRecord, RouteRow, TransitRepository};

/// Why a single record could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("route {route_id}: {source}")]
    UnknownRouteType {
        route_id: String,
        source: UnknownRouteType,
    },

    #[error("route has an empty id")]
    EmptyRouteId,
}

/// Normalize one route record.
///
/// The id namespace is `agency_override` when given, else the record's own
/// agency id.
pub fn route_from_record(
    row: &RouteRow,
    agency_override: Option<&str>,
) -> Result<Route, NormalizeError> {
    let record = &row.route;
    if record.route_id.is_empty() {
        return Err(NormalizeError::EmptyRouteId);
    }

    let mode = TransitMode::from_route_type(record.route_type).map_err(|source| {
        NormalizeError::UnknownRouteType {
            route_id: record.route_id.clone(),
            source,
        }
    })?;

    let namespace = agency_override.unwrap_or(&row.agency.agency_id);

    Ok(Route::builder(
        AgencyQualifiedId::new(namespace, record.route_id.as_str()),
        row.agency.agency_name.as_str(),
        mode,
    )
    .short_name(record.route_short_name.clone())
    .long_name(record.route_long_name.clone())
    .route_type(Some(record.route_type))
    .url(record.route_url.clone())
    .color(record.route_color.clone())
    .text_color(record.route_text_color.clone())
    .sort_order(record.route_sort_order)
    .build())
}

pub fn agency_from_record(record: &AgencyRecord) -> Agency {
    Agency {
        id: record.agency_id.clone(),
        name: record.agency_name.clone(),
        url: record.agency_url.clone(),
        timezone: record.agency_timezone.clone(),
        lang: record.agency_lang.clone(),
        phone: record.agency_phone.clone(),
        fare_url: record.agency_fare_url.clone(),
    }
}

/// Normalize a batch, skipping records that fail.
fn normalize_rows(rows: &[RouteRow], agency_override: Option<&str>) -> Vec<Route> {
    rows.iter()
        .filter_map(|row| match route_from_record(row, agency_override) {
            Ok(route) => Some(route),
            Err(e) => {
                warn!(error = %e, "skipping route record");
                None
            }
        })
        .collect()
}

/// All routes active on `as_of` (today when `None`).
///
/// Dated queries are slower: they cannot use the precomputed current
/// tables.
pub fn all_routes(
    repo: &dyn TransitRepository,
    as_of: Option<NaiveDate>,
    agency_override: Option<&str>,
) -> Vec<Route> {
    match repo.routes(as_of) {
        Ok(rows) => normalize_rows(&rows, agency_override),
        Err(e) => {
            warn!(?as_of, error = %e, "route listing failed");
            Vec::new()
        }
    }
}

/// One route with its agency block. `route_id` may be agency-qualified.
pub fn route_by_id(
    repo: &dyn TransitRepository,
    route_id: &str,
    agency_override: Option<&str>,
) -> Option<RouteDetail> {
    let native = crate::domain::native_id(route_id);
    let row = match repo.route(native) {
        Ok(row) => row,
        Err(e) => {
            warn!(route_id, error = %e, "route lookup failed");
            return None;
        }
    };

    match route_from_record(&row, agency_override) {
        Ok(route) => Some(RouteDetail {
            route,
            agency: agency_from_record(&row.agency),
        }),
        Err(e) => {
            warn!(route_id, error = %e, "route record unusable");
            None
        }
    }
}

/// Distinct routes serving a stop. `stop_id` may be agency-qualified.
///
/// `agency_filter` is matched against each record's agency id;
/// `agency_override` only namespaces the ids.
pub fn routes_at_stop(
    repo: &dyn TransitRepository,
    stop_id: &str,
    as_of: Option<NaiveDate>,
    agency_filter: Option<&str>,
    agency_override: Option<&str>,
) -> Vec<Route> {
    let native = crate::domain::native_id(stop_id);
    match repo.routes_at_stop(native, agency_filter, as_of) {
        Ok(rows) => normalize_rows(&rows, agency_override),
        Err(e) => {
            warn!(stop_id, ?as_of, error = %e, "stop route lookup failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transit::repository::fixtures::{date, repository};
    use serde_json::Value;

    #[test]
    fn listing_skips_bad_records() {
        let repo = repository(date(2019, 3, 3));
        let routes = all_routes(&repo, None, None);

        let ids: Vec<String> = routes.iter().map(|r| r.id().to_string()).collect();
        assert_eq!(ids, vec!["TRIMET:18", "TRIMET:90", "PSC:193"]);
    }

    #[test]
    fn override_rewrites_namespace_only() {
        let repo = repository(date(2019, 3, 3));
        let routes = all_routes(&repo, None, Some("TriMet"));

        assert!(routes.iter().all(|r| r.id().namespace() == "TriMet"));
        assert_eq!(routes[2].agency_name(), "Portland Streetcar");
    }

    #[test]
    fn dated_listing_has_same_shape() {
        let repo = repository(date(2019, 3, 3));
        let current = all_routes(&repo, None, None);
        let dated = all_routes(&repo, Some(date(2099, 1, 1)), None);

        assert_eq!(dated.len(), 2);
        assert_eq!(
            serde_json::to_value(&dated[0]).unwrap(),
            serde_json::to_value(&current[0]).unwrap()
        );
    }

    #[test]
    fn sort_order_flag() {
        let repo = repository(date(2019, 3, 3));
        let routes = all_routes(&repo, None, None);

        assert!(routes[0].sort_order_set());
        assert_eq!(routes[0].sort_order(), Some(2300));
        // Zero is "not supplied"
        assert!(!routes[1].sort_order_set());
        assert!(!routes[2].sort_order_set());
    }

    #[test]
    fn route_by_id_includes_agency() {
        let repo = repository(date(2019, 3, 3));
        let detail = route_by_id(&repo, "TRIMET:18", None).unwrap();
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["id"], "TRIMET:18");
        assert_eq!(json["longName"], "Hillside");
        assert_eq!(json["type"], 3);
        assert_eq!(json["sortOrderSet"], true);
        assert_eq!(json["agency"]["fareUrl"], "http://trimet.org/fares/");
        assert_eq!(json["agency"]["phone"], "503-238-RIDE");
    }

    #[test]
    fn agency_block_keeps_null_keys() {
        let repo = repository(date(2019, 3, 3));
        let detail = route_by_id(&repo, "193", None).unwrap();
        let json = serde_json::to_value(&detail).unwrap();

        let agency = json["agency"].as_object().unwrap();
        assert_eq!(agency.len(), 7);
        assert_eq!(agency["url"], Value::Null);
    }

    #[test]
    fn unknown_route_is_none() {
        let repo = repository(date(2019, 3, 3));
        assert!(route_by_id(&repo, "TriMet:nope", None).is_none());
    }

    #[test]
    fn unusable_route_is_none() {
        let repo = repository(date(2019, 3, 3));
        assert!(route_by_id(&repo, "100", None).is_none());
    }

    #[test]
    fn stop_routes() {
        let repo = repository(date(2019, 3, 3));
        let routes = routes_at_stop(&repo, "TriMet:2", None, None, None);
        assert_eq!(routes.len(), 3);

        let psc = routes_at_stop(&repo, "2", None, Some("PSC"), None);
        assert_eq!(psc.len(), 1);
        assert_eq!(psc[0].id().to_string(), "PSC:193");
    }

    #[test]
    fn stop_routes_namespace_does_not_filter() {
        let repo = repository(date(2019, 3, 3));
        let routes = routes_at_stop(&repo, "2", None, None, Some("TriMet"));

        assert_eq!(routes.len(), 3);
        assert!(routes.iter().all(|r| r.id().namespace() == "TriMet"));

        let trimet = routes_at_stop(&repo, "2", None, Some("TRIMET"), Some("TriMet"));
        let ids: Vec<String> = trimet.iter().map(|r| r.id().to_string()).collect();
        assert_eq!(ids, vec!["TriMet:18", "TriMet:90"]);
    }

    #[test]
    fn unknown_stop_is_empty() {
        let repo = repository(date(2019, 3, 3));
        assert!(routes_at_stop(&repo, "nope", None, None, None).is_empty());
    }

    #[test]
    fn empty_route_id_rejected() {
        let repo = repository(date(2019, 3, 3));
        let mut row = repo.route("18").unwrap();
        row.route.route_id.clear();
        assert_eq!(
            route_from_record(&row, None),
            Err(NormalizeError::EmptyRouteId)
        );
    }
}
