//! Transit index: route and agency listings.
//!
//! Serves the same JSON as the planner's own transit index, but from a
//! date-aware route database. The backend sits behind
//! [`TransitRepository`]; [`normalize`] turns its records into
//! [`Route`](crate::domain::Route)s and [`mock`] generates synthetic ones.

pub mod mock;
pub mod normalize;
mod repository;

pub use mock::{DEFAULT_MOCK_AGENCY, MOCK_ROUTE_COUNT, mock};
pub use normalize::{
    NormalizeError, agency_from_record, all_routes, route_by_id, route_from_record,
    routes_at_stop,
};
pub use repository::{
    AgencyRecord, InMemoryRepository, RepositoryError, RouteRecord, RouteRow, ServiceWindow,
    StopRoutes, TransitRepository, TransitSnapshot,
};
