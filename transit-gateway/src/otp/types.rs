//! Planner API response DTOs.
//!
//! These types map directly to the planner's `plan` endpoint JSON. The
//! envelope keeps `plan` and `error` as raw values so that a malformed plan
//! can still fall back to reading the error block.

use serde::Deserialize;
use serde_json::Value;

/// Top-level response from the `plan` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Trip plan, present on success.
    pub plan: Option<Value>,

    /// Error block, present when no plan could be produced.
    pub error: Option<Value>,
}

/// A trip plan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpPlan {
    /// Planned date, epoch milliseconds.
    pub date: i64,

    pub from: OtpPlace,

    pub to: OtpPlace,

    pub itineraries: Vec<OtpItinerary>,
}

/// A place in a plan: the endpoints, or a leg's boarding/alighting stop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpPlace {
    pub name: Option<String>,

    pub lat: f64,

    pub lon: f64,

    /// Agency-qualified stop id, only on transit stops.
    pub stop_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpItinerary {
    /// Seconds.
    pub duration: i64,

    /// Epoch milliseconds.
    pub start_time: i64,

    /// Epoch milliseconds.
    pub end_time: i64,

    #[serde(default)]
    pub walk_time: i64,

    #[serde(default)]
    pub transit_time: i64,

    #[serde(default)]
    pub waiting_time: i64,

    #[serde(default)]
    pub walk_distance: f64,

    #[serde(default)]
    pub transfers: i32,

    pub legs: Vec<OtpLeg>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpLeg {
    /// Epoch milliseconds.
    pub start_time: i64,

    /// Epoch milliseconds.
    pub end_time: i64,

    /// Meters.
    #[serde(default)]
    pub distance: f64,

    /// Seconds. Older planners omit it; derived from the times when absent.
    pub duration: Option<f64>,

    /// `WALK`, `BUS`, `TRAM`, ...
    pub mode: String,

    #[serde(default)]
    pub transit_leg: bool,

    /// Route short name (or long name when there is no short name).
    pub route: Option<String>,

    pub route_short_name: Option<String>,

    pub route_id: Option<String>,

    pub agency_id: Option<String>,

    pub headsign: Option<String>,

    pub from: OtpPlace,

    pub to: OtpPlace,
}

/// Error block from the `plan` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpError {
    /// Numeric message id, e.g. 404.
    pub id: i32,

    /// Human-readable message.
    pub msg: String,

    /// Message code, e.g. `PATH_NOT_FOUND`.
    pub message: Option<String>,

    #[serde(default)]
    pub no_path: bool,

    /// Names of missing request parameters.
    #[serde(default)]
    pub missing: Vec<String>,
}
