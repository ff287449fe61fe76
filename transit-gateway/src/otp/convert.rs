//! Translation of planner responses into normalized plans.
//!
//! Two explicit stages: read the `plan` block into a [`Plan`]; if that
//! fails for any reason, read the `error` block into a [`PlanError`]. Only
//! when both fail is the result [`Translation::Empty`], with a warning.

use serde_json::Value;
use tracing::{debug, warn};

use crate::content::FareSource;
use crate::domain::{Itinerary, Leg, Place, Plan, PlanError, PlanParams};

use super::types::{OtpError, OtpItinerary, OtpLeg, OtpPlace, OtpPlan, PlanResponse};

/// Error while converting one block of a planner response.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Body was not JSON, or a block did not have the expected shape
    #[error("JSON parse error: {0}")]
    Json(String),

    /// The block is absent from the response
    #[error("missing {0} block")]
    MissingBlock(&'static str),

    /// The plan parsed but is unusable
    #[error("malformed plan: {0}")]
    MalformedPlan(String),
}

/// Outcome of translating one planner response.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Plan(Plan),
    Error(PlanError),
    Empty,
}

/// Translate a raw planner response.
///
/// `params` is the caller's request echo, attached to whichever of plan or
/// error is produced. When `fares` is set every transit leg gets a fare.
pub fn translate(raw: &str, params: &PlanParams, fares: Option<&dyn FareSource>) -> Translation {
    let envelope: PlanResponse = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "planner response is not JSON");
            return Translation::Empty;
        }
    };

    let plan_failure = match convert_plan(envelope.plan.as_ref(), params, fares) {
        Ok(plan) => return Translation::Plan(plan),
        Err(e) => e,
    };

    match convert_error(envelope.error.as_ref(), params) {
        Ok(error) => {
            debug!(id = error.id, reason = %plan_failure, "planner reported an error");
            Translation::Error(error)
        }
        Err(e) => {
            warn!(plan = %plan_failure, error = %e, "could not interpret planner response");
            Translation::Empty
        }
    }
}

/// Build a [`Plan`] from the `plan` block.
pub fn convert_plan(
    block: Option<&Value>,
    params: &PlanParams,
    fares: Option<&dyn FareSource>,
) -> Result<Plan, ConversionError> {
    let block = block
        .filter(|v| !v.is_null())
        .ok_or(ConversionError::MissingBlock("plan"))?;
    let plan: OtpPlan =
        serde_json::from_value(block.clone()).map_err(|e| ConversionError::Json(e.to_string()))?;

    if plan.itineraries.is_empty() {
        return Err(ConversionError::MalformedPlan("no itineraries".to_string()));
    }

    let itineraries = plan
        .itineraries
        .iter()
        .enumerate()
        .map(|(i, it)| convert_itinerary(i, it, fares))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Plan {
        date: plan.date,
        from: convert_place(&plan.from),
        to: convert_place(&plan.to),
        itineraries,
        params: params.clone(),
    })
}

/// Build a [`PlanError`] from the `error` block.
pub fn convert_error(
    block: Option<&Value>,
    params: &PlanParams,
) -> Result<PlanError, ConversionError> {
    let block = block
        .filter(|v| !v.is_null())
        .ok_or(ConversionError::MissingBlock("error"))?;
    let error: OtpError =
        serde_json::from_value(block.clone()).map_err(|e| ConversionError::Json(e.to_string()))?;

    Ok(PlanError {
        id: error.id,
        msg: error.msg,
        message: error.message,
        no_path: error.no_path,
        missing: error.missing,
        params: Some(params.clone()),
    })
}

fn convert_place(place: &OtpPlace) -> Place {
    Place {
        name: place.name.clone().unwrap_or_default(),
        lat: place.lat,
        lon: place.lon,
        stop_id: place.stop_id.clone(),
    }
}

fn convert_itinerary(
    index: usize,
    itinerary: &OtpItinerary,
    fares: Option<&dyn FareSource>,
) -> Result<Itinerary, ConversionError> {
    if itinerary.legs.is_empty() {
        return Err(ConversionError::MalformedPlan(format!(
            "itinerary {index} has no legs"
        )));
    }
    if elapsed_millis(itinerary.start_time, itinerary.end_time).is_none() {
        return Err(ConversionError::MalformedPlan(format!(
            "itinerary {index} has invalid times"
        )));
    }

    let legs = itinerary
        .legs
        .iter()
        .enumerate()
        .map(|(j, leg)| convert_leg(index, j, leg, fares))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Itinerary {
        duration: itinerary.duration,
        start_time: itinerary.start_time,
        end_time: itinerary.end_time,
        walk_time: itinerary.walk_time,
        transit_time: itinerary.transit_time,
        waiting_time: itinerary.waiting_time,
        walk_distance: itinerary.walk_distance,
        transfers: itinerary.transfers,
        legs,
    })
}

fn convert_leg(
    itinerary: usize,
    index: usize,
    leg: &OtpLeg,
    fares: Option<&dyn FareSource>,
) -> Result<Leg, ConversionError> {
    let Some(elapsed) = elapsed_millis(leg.start_time, leg.end_time) else {
        return Err(ConversionError::MalformedPlan(format!(
            "leg {index} of itinerary {itinerary} has invalid times"
        )));
    };

    let non_empty = |s: &Option<String>| s.clone().filter(|s| !s.is_empty());

    let mut converted = Leg {
        mode: leg.mode.clone(),
        transit_leg: leg.transit_leg,
        route: non_empty(&leg.route_short_name).or_else(|| non_empty(&leg.route)),
        route_id: non_empty(&leg.route_id),
        agency_id: non_empty(&leg.agency_id),
        headsign: non_empty(&leg.headsign),
        from: convert_place(&leg.from),
        to: convert_place(&leg.to),
        start_time: leg.start_time,
        end_time: leg.end_time,
        duration: leg.duration.unwrap_or_else(|| elapsed as f64 / 1000.0),
        distance: leg.distance,
        fare: None,
    };

    converted.fare = fares.and_then(|f| f.leg_fare(&converted));
    Ok(converted)
}

/// Milliseconds from `start` to `end`; `None` if negative or out of range.
fn elapsed_millis(start: i64, end: i64) -> Option<i64> {
    end.checked_sub(start).filter(|ms| *ms >= 0)
}
