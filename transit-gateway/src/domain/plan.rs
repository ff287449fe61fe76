//! Normalized trip plans and planner errors.
//!
//! These are the shapes the gateway renders, independent of the planner's
//! wire format. Conversion from the wire DTOs lives in `otp::convert`.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use super::mode::TransitMode;
use super::trip::TripRequest;

/// Echo of the caller's request, attached to every plan or error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanParams {
    pub from_place: String,
    pub to_place: String,
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_hhmm")]
    pub time: NaiveTime,
    pub arr: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_walk_distance: Option<f64>,
}

fn serialize_hhmm<S: serde::Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&t.format("%H:%M"))
}

impl PlanParams {
    pub fn from_request(request: &TripRequest) -> Self {
        Self {
            from_place: request.origin.clone(),
            to_place: request.destination.clone(),
            date: request.date,
            time: request.time,
            arr: request.arrive_mode.code(),
            mode: request.modes.clone(),
            max_walk_distance: request.max_walk_meters,
        }
    }
}

/// A named point in a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_id: Option<String>,
}

/// Fare attached to a transit leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fare {
    pub cents: u32,
    pub currency: String,
}

/// One leg of an itinerary: a walk or a ride on a single transit route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    /// Planner mode string (`WALK`, `BUS`, ...).
    pub mode: String,
    pub transit_leg: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
    pub from: Place,
    pub to: Place,
    /// Epoch milliseconds.
    pub start_time: i64,
    /// Epoch milliseconds.
    pub end_time: i64,
    /// Seconds.
    pub duration: f64,
    /// Meters.
    pub distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare: Option<Fare>,
}

impl Leg {
    /// The transit mode of this leg, if it is a transit leg.
    pub fn transit_mode(&self) -> Option<TransitMode> {
        if !self.transit_leg {
            return None;
        }
        TransitMode::parse(&self.mode)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Seconds.
    pub duration: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub walk_time: i64,
    pub transit_time: i64,
    pub waiting_time: i64,
    pub walk_distance: f64,
    pub transfers: i32,
    pub legs: Vec<Leg>,
}

/// A normalized trip plan: one or more itineraries between two places.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Epoch milliseconds of the planned date.
    pub date: i64,
    pub from: Place,
    pub to: Place,
    pub itineraries: Vec<Itinerary>,
    pub params: PlanParams,
}

impl Plan {
    /// The transit mode contributing most to this plan.
    ///
    /// Sums leg distance per mode across all itineraries; summed duration
    /// breaks ties. Walk-only plans have no dominant mode.
    pub fn dominant_transit_mode(&self) -> Option<TransitMode> {
        let mut totals: HashMap<TransitMode, (f64, f64)> = HashMap::new();

        for leg in self.itineraries.iter().flat_map(|i| &i.legs) {
            if let Some(mode) = leg.transit_mode() {
                let entry = totals.entry(mode).or_insert((0.0, 0.0));
                entry.0 += leg.distance;
                entry.1 += leg.duration;
            }
        }

        totals
            .into_iter()
            .max_by(|(ma, a), (mb, b)| {
                a.0.total_cmp(&b.0)
                    .then(a.1.total_cmp(&b.1))
                    // Stable answer when everything ties
                    .then(mb.as_str().cmp(ma.as_str()))
            })
            .map(|(mode, _)| mode)
    }
}

/// Planner message ids used when the gateway itself produces the error.
pub mod message {
    pub const SYSTEM_ERROR: i32 = 500;
    pub const BOGUS_PARAMETER: i32 = 413;
    pub const GEOCODE_FROM_NOT_FOUND: i32 = 440;
    pub const GEOCODE_TO_NOT_FOUND: i32 = 450;
}

/// A normalized planner-side failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanError {
    pub id: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_path: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<PlanParams>,
}

impl PlanError {
    /// An error raised by the gateway rather than reported by the planner.
    pub fn new(id: i32, msg: impl Into<String>) -> Self {
        Self {
            id,
            msg: msg.into(),
            message: None,
            no_path: false,
            missing: Vec::new(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: PlanParams) -> Self {
        self.params = Some(params);
        self
    }
}
