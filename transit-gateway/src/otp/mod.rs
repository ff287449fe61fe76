//! External trip planner client.
//!
//! This module talks to the routing engine's `plan` endpoint. The engine
//! is date-unaware beyond depart-at/arrive-by, so "latest trip" requests
//! are rewritten by the query builder before they are sent.
//!
//! Key characteristics of the planner:
//! - Places are `name::lat,lon` strings
//! - Times are `h:MMam`, dates `MM-DD-YYYY`, both local to the planner
//! - Responses carry either a `plan` or an `error` block, both with HTTP 200

mod client;
mod convert;
mod error;
mod query;
mod types;

pub use client::{OtpClient, OtpConfig, PlannerService};
pub use convert::{ConversionError, Translation, convert_error, convert_plan, translate};
pub use error::PlannerError;
pub use query::PlannerQuery;
pub use types::{OtpError, OtpItinerary, OtpLeg, OtpPlace, OtpPlan, PlanResponse};
