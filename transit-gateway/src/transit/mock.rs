//! Synthetic routes for local development and snapshot tests.

use crate::domain::{AgencyQualifiedId, Route, TransitMode};

/// Number of routes [`mock`] produces.
pub const MOCK_ROUTE_COUNT: usize = 50;

/// Agency id used when the caller does not name one.
pub const DEFAULT_MOCK_AGENCY: &str = "MOCK";

/// Generate [`MOCK_ROUTE_COUNT`] deterministic routes for an agency.
///
/// Route `n` (1-based) has id `<agency>:n`, long name `n-<agency>` and sort
/// order `n`. Even-numbered routes get a short name; every third route
/// starting with the first is a bus, the rest are trams.
pub fn mock(agency_id: &str) -> Vec<Route> {
    (0..MOCK_ROUTE_COUNT)
        .map(|i| {
            let route_id = (i + 1).to_string();
            let mode = if i % 3 == 0 {
                TransitMode::Bus
            } else {
                TransitMode::Tram
            };

            Route::builder(
                AgencyQualifiedId::new(agency_id, route_id.as_str()),
                agency_id,
                mode,
            )
            .short_name((i % 2 == 1).then(|| route_id.clone()))
            .long_name(Some(format!("{route_id}-{agency_id}")))
            .color(Some(format!("Ox{:02}{:02}{:02}", i + 3, i * 2, i + 17)))
            .sort_order(Some((i + 1) as i32))
            .build()
        })
        .collect()
}
