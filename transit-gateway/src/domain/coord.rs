//! Coordinate pairs and the location-string validator.
//!
//! Trip endpoints arrive as free text in the planner's place convention:
//! either a bare `lat,lon` pair, or `description::lat,lon`. Anything else
//! needs a trip through the geocoder before it can be sent to the planner.

use std::fmt;

/// Separator between a place description and its coordinate hint.
pub const COORD_SEPARATOR: &str = "::";

/// Error returned when a string is not a usable coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A validated WGS84 latitude/longitude pair.
///
/// Latitude is within ±90, longitude within ±180, both finite. The `0,0`
/// placeholder that form fields send for "no location" is rejected.
///
/// # Examples
///
/// ```
/// use transit_gateway::domain::Coordinate;
///
/// let c = Coordinate::parse("45.5152,-122.6784").unwrap();
/// assert_eq!(c.lat(), 45.5152);
///
/// assert!(Coordinate::parse("0,0").is_err());
/// assert!(Coordinate::parse("powell blvd").is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Build a coordinate from numeric parts.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate {
                reason: "must be finite numbers",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude out of range",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                reason: "longitude out of range",
            });
        }
        if lat == 0.0 && lon == 0.0 {
            return Err(InvalidCoordinate {
                reason: "0,0 is a placeholder, not a location",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Parse a `lat,lon` string. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, InvalidCoordinate> {
        let (lat, lon) = s.trim().split_once(',').ok_or(InvalidCoordinate {
            reason: "expected lat,lon",
        })?;

        let lat: f64 = lat.trim().parse().map_err(|_| InvalidCoordinate {
            reason: "latitude is not a number",
        })?;
        let lon: f64 = lon.trim().parse().map_err(|_| InvalidCoordinate {
            reason: "longitude is not a number",
        })?;

        Self::new(lat, lon)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({},{})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// The coordinate-hint portion of a location string.
fn coord_part(location: &str) -> &str {
    match location.rsplit_once(COORD_SEPARATOR) {
        Some((_, coord)) => coord,
        None => location,
    }
}

/// Extract the coordinate from a location string, if it carries one.
pub fn location_coord(location: &str) -> Option<Coordinate> {
    Coordinate::parse(coord_part(location)).ok()
}

/// Whether a location string already carries a usable coordinate pair.
///
/// When this is true the location can be passed to the planner as is and
/// the geocoder must not be called.
pub fn has_valid_coord(location: &str) -> bool {
    location_coord(location).is_some()
}

/// The descriptive text of a location, without any coordinate hint.
///
/// Works whether or not the hint is valid: `"powell blvd::bogus"` strips to
/// `"powell blvd"`.
pub fn strip_coord(location: &str) -> &str {
    match location.split_once(COORD_SEPARATOR) {
        Some((text, _)) => text.trim(),
        None => location.trim(),
    }
}

/// Compose a planner place string from a description and a resolved coordinate.
pub fn named_location(text: &str, coord: Coordinate) -> String {
    if text.is_empty() {
        coord.to_string()
    } else {
        format!("{text}{COORD_SEPARATOR}{coord}")
    }
}
