//! Transit modes and GTFS route type codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned for a GTFS route type with no transit mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown GTFS route type: {0}")]
pub struct UnknownRouteType(pub i32);

/// Transit mode as named by the planner (`BUS`, `TRAM`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitMode {
    Tram,
    Subway,
    Rail,
    Bus,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
}

impl TransitMode {
    /// Map a GTFS `route_type`, including the extended (Google) ranges.
    ///
    /// ```
    /// use transit_gateway::domain::TransitMode;
    ///
    /// assert_eq!(TransitMode::from_route_type(3), Ok(TransitMode::Bus));
    /// assert_eq!(TransitMode::from_route_type(900), Ok(TransitMode::Tram));
    /// assert!(TransitMode::from_route_type(42).is_err());
    /// ```
    pub fn from_route_type(code: i32) -> Result<Self, UnknownRouteType> {
        let mode = match code {
            0 => Self::Tram,
            1 => Self::Subway,
            2 => Self::Rail,
            3 => Self::Bus,
            4 => Self::Ferry,
            5 => Self::CableCar,
            6 => Self::Gondola,
            7 => Self::Funicular,
            11 => Self::Bus, // trolleybus
            12 => Self::Rail, // monorail
            100..=199 => Self::Rail,
            200..=299 => Self::Bus,
            400..=499 => Self::Subway,
            700..=799 => Self::Bus,
            900..=999 => Self::Tram,
            1000..=1299 => Self::Ferry,
            1300..=1399 => Self::Gondola,
            1400..=1499 => Self::Funicular,
            _ => return Err(UnknownRouteType(code)),
        };
        Ok(mode)
    }

    /// Parse a planner mode string. Non-transit modes (`WALK`, `BICYCLE`)
    /// return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let mode = match s {
            "TRAM" => Self::Tram,
            "SUBWAY" => Self::Subway,
            "RAIL" => Self::Rail,
            "BUS" => Self::Bus,
            "FERRY" => Self::Ferry,
            "CABLE_CAR" => Self::CableCar,
            "GONDOLA" => Self::Gondola,
            "FUNICULAR" => Self::Funicular,
            _ => return None,
        };
        Some(mode)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tram => "TRAM",
            Self::Subway => "SUBWAY",
            Self::Rail => "RAIL",
            Self::Bus => "BUS",
            Self::Ferry => "FERRY",
            Self::CableCar => "CABLE_CAR",
            Self::Gondola => "GONDOLA",
            Self::Funicular => "FUNICULAR",
        }
    }
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
