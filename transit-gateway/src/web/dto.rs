//! Data transfer objects for web requests and responses.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::{AgencyQualifiedId, ArriveMode, TripRequest};

/// Date formats accepted in query strings.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m-%d-%Y", "%m/%d/%Y"];

/// Time formats accepted in query strings.
const TIME_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M%p", "%I:%M %p"];

/// A query parameter that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {param}: {value:?}")]
pub struct InvalidParameter {
    pub param: &'static str,
    pub value: String,
}

impl InvalidParameter {
    fn new(param: &'static str, value: &str) -> Self {
        Self {
            param,
            value: value.to_string(),
        }
    }
}

/// Trip-plan query parameters, as the planner's own API names them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTripQuery {
    pub from_place: Option<String>,
    pub to_place: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    /// `D`, `A` or `L`
    pub arr: Option<String>,
    pub mode: Option<String>,
    pub max_walk_distance: Option<String>,
    /// Comma-separated `agency:route` or `agency__route` ids
    pub banned_routes: Option<String>,
    pub lang: Option<String>,
    pub pretty: Option<String>,
}

impl PlanTripQuery {
    /// Whether pretty output was asked for, even if the rest is invalid.
    pub fn wants_pretty(&self) -> bool {
        self.pretty.as_deref().is_some_and(parse_flag)
    }

    /// Build a trip request. Missing date and time default to `now`.
    pub fn into_request(self, now: NaiveDateTime) -> Result<TripRequest, InvalidParameter> {
        let origin = required("fromPlace", self.from_place.as_deref())?;
        let destination = required("toPlace", self.to_place.as_deref())?;

        let date = match non_blank(self.date.as_deref()) {
            Some(text) => parse_date(text).ok_or_else(|| InvalidParameter::new("date", text))?,
            None => now.date(),
        };
        let time = match non_blank(self.time.as_deref()) {
            Some(text) => parse_time(text).ok_or_else(|| InvalidParameter::new("time", text))?,
            None => now.time(),
        };
        let arrive_mode = match non_blank(self.arr.as_deref()) {
            Some(text) => {
                ArriveMode::parse(text).ok_or_else(|| InvalidParameter::new("arr", text))?
            }
            None => ArriveMode::DepartAt,
        };

        let mut request = TripRequest::new(origin, destination, date, time)
            .with_arrive_mode(arrive_mode)
            .with_pretty(self.pretty.as_deref().is_some_and(parse_flag));

        if let Some(text) = non_blank(self.max_walk_distance.as_deref()) {
            let meters: f64 = text
                .parse()
                .ok()
                .filter(|m: &f64| m.is_finite() && *m >= 0.0)
                .ok_or_else(|| InvalidParameter::new("maxWalkDistance", text))?;
            request = request.with_max_walk_meters(meters);
        }
        if let Some(text) = non_blank(self.banned_routes.as_deref()) {
            request = request.with_banned_routes(parse_banned_routes(text)?);
        }
        if let Some(mode) = non_blank(self.mode.as_deref()) {
            request = request.with_modes(mode);
        }
        if let Some(lang) = non_blank(self.lang.as_deref()) {
            request = request.with_lang(lang);
        }

        Ok(request)
    }
}

/// Query parameters for route listings.
#[derive(Debug, Default, Deserialize)]
pub struct RoutesQuery {
    pub date: Option<String>,
    pub agency: Option<String>,
}

impl RoutesQuery {
    /// The `as_of` date; `None` for "today".
    pub fn as_of(&self) -> Result<Option<NaiveDate>, InvalidParameter> {
        non_blank(self.date.as_deref())
            .map(|text| parse_date(text).ok_or_else(|| InvalidParameter::new("date", text)))
            .transpose()
    }
}

/// Query parameters for the mock route listing.
#[derive(Debug, Default, Deserialize)]
pub struct MockRoutesQuery {
    pub agency: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required(param: &'static str, value: Option<&str>) -> Result<String, InvalidParameter> {
    non_blank(value)
        .map(str::to_string)
        .ok_or_else(|| InvalidParameter::new(param, value.unwrap_or_default()))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "true" | "1" | "yes" | "y"
    )
}

/// Parse a date in any accepted format.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
}

/// Parse a time in any accepted format.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(text, f).ok())
}

fn parse_banned_routes(text: &str) -> Result<Vec<AgencyQualifiedId>, InvalidParameter> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            AgencyQualifiedId::parse(s)
                .or_else(|| {
                    s.split_once("__")
                        .filter(|(ns, id)| !ns.is_empty() && !id.is_empty())
                        .map(|(ns, id)| AgencyQualifiedId::new(ns, id))
                })
                .ok_or_else(|| InvalidParameter::new("bannedRoutes", s))
        })
        .collect()
}
