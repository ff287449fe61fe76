//! Domain types for the transit gateway.
//!
//! This module contains the core value types shared by the trip-planning
//! path and the transit index. Types that carry invariants enforce them at
//! construction time, so code that receives them can trust their validity.

mod coord;
mod ident;
mod mode;
mod plan;
mod route;
mod trip;

pub use coord::{
    COORD_SEPARATOR, Coordinate, InvalidCoordinate, has_valid_coord, location_coord,
    named_location, strip_coord,
};
pub use ident::{AgencyQualifiedId, native_id};
pub use mode::{TransitMode, UnknownRouteType};
pub use plan::{Fare, Itinerary, Leg, Place, Plan, PlanError, PlanParams, message};
pub use route::{Agency, Route, RouteBuilder, RouteDetail};
pub use trip::{ArriveMode, LATEST_ARRIVE_BY, TripRequest};
