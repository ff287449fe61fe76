//! Trip planner orchestration.
//!
//! Composes the coordinate validator, geocoder, query builder, planner
//! client and response translator into one `plan_trip` call:
//!
//! 1. Endpoints without a usable coordinate are geocoded
//! 2. The planner query is built, with the "latest trip" correction
//! 3. The planner is called once
//! 4. The response is translated, falling back from plan to error to `{}`
//! 5. Adverts for the plan's dominant mode are attached

mod config;
mod output;
mod trip;

pub use config::PlannerConfig;
pub use output::TripPlanOutput;
pub use trip::TripPlanner;
