//! Trip requests and the "latest trip" correction.

use std::fmt;

use chrono::{Days, NaiveDate, NaiveTime};

use super::ident::AgencyQualifiedId;

/// Arrive-by time used to simulate "last trip of the night".
///
/// The planner only knows depart-at and arrive-by. Asking to arrive by
/// 01:30 the following morning yields the last viable departure of the day.
pub const LATEST_ARRIVE_BY: NaiveTime = match NaiveTime::from_hms_opt(1, 30, 0) {
    Some(t) => t,
    None => panic!("01:30 is a valid time"),
};

/// How the requested time is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArriveMode {
    /// Leave at or after the requested time.
    #[default]
    DepartAt,
    /// Arrive at or before the requested time.
    ArriveBy,
    /// Last trip of the service day; the requested time is ignored.
    Latest,
}

impl ArriveMode {
    /// Parse the `arr` request parameter.
    ///
    /// Accepts the single-letter codes `D`, `A`, `L`, the words
    /// `depart`/`arrive`/`latest`, and `true`/`false` as an `arriveBy`
    /// flag. Matching is case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "depart" | "false" => Some(Self::DepartAt),
            "a" | "arrive" | "true" => Some(Self::ArriveBy),
            "l" | "latest" => Some(Self::Latest),
            _ => None,
        }
    }

    /// The single-letter code, as echoed back in plan output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DepartAt => "D",
            Self::ArriveBy => "A",
            Self::Latest => "L",
        }
    }

    /// Whether the planner should treat the time as an arrive-by bound.
    pub fn is_arrive_by(&self) -> bool {
        matches!(self, Self::ArriveBy | Self::Latest)
    }
}

impl fmt::Display for ArriveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A structured trip-planning request.
///
/// Origin and destination are location strings (see
/// [`has_valid_coord`](super::has_valid_coord)). Geocoding rewrites them in
/// place before the planner query is built.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    /// Origin location.
    pub origin: String,

    /// Destination location.
    pub destination: String,

    /// Travel date (local).
    pub date: NaiveDate,

    /// Travel time (local).
    pub time: NaiveTime,

    /// Depart-at, arrive-by or latest.
    pub arrive_mode: ArriveMode,

    /// Pretty-print the JSON response.
    pub pretty: bool,

    /// Routes the rider asked to avoid.
    pub banned_routes: Vec<AgencyQualifiedId>,

    /// Planner mode list, e.g. `TRANSIT,WALK`.
    pub modes: Option<String>,

    /// Maximum walk distance in meters.
    pub max_walk_meters: Option<f64>,

    /// Language tag for content lookups.
    pub lang: Option<String>,
}

impl TripRequest {
    /// Create a depart-at request with no optional parameters.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            date,
            time,
            arrive_mode: ArriveMode::DepartAt,
            pretty: false,
            banned_routes: Vec::new(),
            modes: None,
            max_walk_meters: None,
            lang: None,
        }
    }

    pub fn with_arrive_mode(mut self, mode: ArriveMode) -> Self {
        self.arrive_mode = mode;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_banned_routes(mut self, routes: Vec<AgencyQualifiedId>) -> Self {
        self.banned_routes = routes;
        self
    }

    pub fn with_modes(mut self, modes: impl Into<String>) -> Self {
        self.modes = Some(modes.into());
        self
    }

    pub fn with_max_walk_meters(mut self, meters: f64) -> Self {
        self.max_walk_meters = Some(meters);
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn is_latest(&self) -> bool {
        self.arrive_mode == ArriveMode::Latest
    }

    /// The language for content lookups, `en` when unset.
    pub fn lang_or_default(&self) -> &str {
        self.lang.as_deref().filter(|l| !l.is_empty()).unwrap_or("en")
    }

    /// Rewrite a "latest" request into the arrive-by query the planner
    /// understands: the following day, arriving by 01:30.
    ///
    /// Returns a new request; `self` is left untouched. Requests in any
    /// other mode are returned as plain clones.
    ///
    /// ```
    /// use chrono::{NaiveDate, NaiveTime};
    /// use transit_gateway::domain::{ArriveMode, TripRequest};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let time = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
    /// let req = TripRequest::new("a", "b", date, time).with_arrive_mode(ArriveMode::Latest);
    ///
    /// let corrected = req.apply_latest_correction();
    /// assert_eq!(corrected.date, NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    /// assert_eq!(corrected.arrive_mode, ArriveMode::ArriveBy);
    /// assert_eq!(req.date, date);
    /// ```
    pub fn apply_latest_correction(&self) -> TripRequest {
        let mut corrected = self.clone();
        if !self.is_latest() {
            return corrected;
        }

        // NaiveDate::MAX has no successor; leave the date alone there
        corrected.date = self
            .date
            .checked_add_days(Days::new(1))
            .unwrap_or(self.date);
        corrected.time = LATEST_ARRIVE_BY;
        corrected.arrive_mode = ArriveMode::ArriveBy;
        corrected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn latest_request(d: NaiveDate) -> TripRequest {
        TripRequest::new("ohsu", "pdx", d, time(13, 11)).with_arrive_mode(ArriveMode::Latest)
    }

    #[test]
    fn parse_arrive_mode() {
        assert_eq!(ArriveMode::parse("D"), Some(ArriveMode::DepartAt));
        assert_eq!(ArriveMode::parse("a"), Some(ArriveMode::ArriveBy));
        assert_eq!(ArriveMode::parse("L"), Some(ArriveMode::Latest));
        assert_eq!(ArriveMode::parse("Latest"), Some(ArriveMode::Latest));
        assert_eq!(ArriveMode::parse("true"), Some(ArriveMode::ArriveBy));
        assert_eq!(ArriveMode::parse("false"), Some(ArriveMode::DepartAt));
        assert_eq!(ArriveMode::parse("x"), None);
    }

    #[test]
    fn arrive_by_flag() {
        assert!(!ArriveMode::DepartAt.is_arrive_by());
        assert!(ArriveMode::ArriveBy.is_arrive_by());
        assert!(ArriveMode::Latest.is_arrive_by());
    }

    #[test]
    fn latest_shifts_to_next_day_at_0130() {
        let req = latest_request(date(2019, 3, 3));
        let corrected = req.apply_latest_correction();

        assert_eq!(corrected.date, date(2019, 3, 4));
        assert_eq!(corrected.time, time(1, 30));
        assert_eq!(corrected.arrive_mode, ArriveMode::ArriveBy);
        assert_eq!(corrected.origin, req.origin);
        assert_eq!(corrected.destination, req.destination);
    }

    #[test]
    fn latest_does_not_mutate_original() {
        let req = latest_request(date(2019, 3, 3));
        let before = req.clone();
        let _ = req.apply_latest_correction();
        assert_eq!(req, before);
    }

    #[test]
    fn latest_crosses_month_and_year() {
        let corrected = latest_request(date(2023, 12, 31)).apply_latest_correction();
        assert_eq!(corrected.date, date(2024, 1, 1));

        let corrected = latest_request(date(2024, 2, 28)).apply_latest_correction();
        assert_eq!(corrected.date, date(2024, 2, 29));
    }

    #[test]
    fn non_latest_unchanged() {
        let req = TripRequest::new("a", "b", date(2024, 3, 15), time(9, 0))
            .with_arrive_mode(ArriveMode::ArriveBy);
        assert_eq!(req.apply_latest_correction(), req);
    }

    #[test]
    fn lang_default() {
        let req = TripRequest::new("a", "b", date(2024, 3, 15), time(9, 0));
        assert_eq!(req.lang_or_default(), "en");
        assert_eq!(req.clone().with_lang("es").lang_or_default(), "es");
        assert_eq!(req.with_lang("").lang_or_default(), "en");
    }
}
