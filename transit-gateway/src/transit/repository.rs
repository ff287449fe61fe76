//! Backend contract for route, agency and stop records.
//!
//! Undated queries read precomputed "current" tables. Dated queries scan
//! every route's service windows, which is slower but works for any date.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

/// Errors from a transit repository.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("route not found: {0}")]
    RouteNotFound(String),

    #[error("stop not found: {0}")]
    StopNotFound(String),

    /// Snapshot file could not be read
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file is not valid JSON
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store is unusable
    #[error("repository unavailable: {0}")]
    Backend(String),
}

/// A GTFS agency row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgencyRecord {
    pub agency_id: String,
    pub agency_name: String,
    #[serde(default)]
    pub agency_url: Option<String>,
    #[serde(default)]
    pub agency_timezone: Option<String>,
    #[serde(default)]
    pub agency_lang: Option<String>,
    #[serde(default)]
    pub agency_phone: Option<String>,
    #[serde(default)]
    pub agency_fare_url: Option<String>,
}

/// An inclusive range of dates on which a route runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ServiceWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ServiceWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A GTFS route row plus the dates it runs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteRecord {
    pub route_id: String,
    /// May be omitted in single-agency feeds.
    #[serde(default)]
    pub agency_id: Option<String>,
    #[serde(default)]
    pub route_short_name: Option<String>,
    #[serde(default)]
    pub route_long_name: Option<String>,
    pub route_type: i32,
    #[serde(default)]
    pub route_url: Option<String>,
    #[serde(default)]
    pub route_color: Option<String>,
    #[serde(default)]
    pub route_text_color: Option<String>,
    #[serde(default)]
    pub route_sort_order: Option<i32>,
    /// No windows means the route always runs.
    #[serde(default)]
    pub service: Vec<ServiceWindow>,
}

impl RouteRecord {
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.service.is_empty() || self.service.iter().any(|w| w.contains(date))
    }
}

/// Routes serving one stop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StopRoutes {
    pub stop_id: String,
    pub route_ids: Vec<String>,
}

/// A route joined with its agency.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRow {
    pub route: RouteRecord,
    pub agency: Arc<AgencyRecord>,
}

/// Canonical query contract for route data.
///
/// `as_of = None` means "today", served from precomputed tables.
pub trait TransitRepository: Send + Sync {
    /// All routes active on the given date.
    fn routes(&self, as_of: Option<NaiveDate>) -> Result<Vec<RouteRow>, RepositoryError>;

    /// A single route by native id.
    fn route(&self, route_id: &str) -> Result<RouteRow, RepositoryError>;

    /// Distinct routes serving a stop, optionally restricted to one agency.
    fn routes_at_stop(
        &self,
        stop_id: &str,
        agency_id: Option<&str>,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<RouteRow>, RepositoryError>;
}

/// A full dump of the transit database, as loaded from JSON.
///
/// ```json
/// {"agencies": [...], "routes": [...], "stops": [{"stop_id": "2", "route_ids": ["10"]}]}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransitSnapshot {
    #[serde(default)]
    pub agencies: Vec<AgencyRecord>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
    #[serde(default)]
    pub stops: Vec<StopRoutes>,
}

impl TransitSnapshot {
    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Precomputed view of what runs on one day.
#[derive(Debug, Default)]
struct CurrentTables {
    as_of: Option<NaiveDate>,
    /// Indices into `InMemoryRepository::routes`.
    routes: Vec<usize>,
    stops: HashMap<String, Vec<usize>>,
}

/// Transit repository held entirely in memory.
///
/// Routes whose agency cannot be resolved are dropped at construction.
/// Stop memberships that name unknown routes are ignored.
#[derive(Debug)]
pub struct InMemoryRepository {
    rows: Vec<RouteRow>,
    by_id: HashMap<String, usize>,
    stops: HashMap<String, Vec<usize>>,
    current: RwLock<CurrentTables>,
}

impl InMemoryRepository {
    /// Build the repository and precompute the tables for `today`.
    pub fn new(snapshot: TransitSnapshot, today: NaiveDate) -> Self {
        let agencies: HashMap<String, Arc<AgencyRecord>> = snapshot
            .agencies
            .into_iter()
            .map(|a| (a.agency_id.clone(), Arc::new(a)))
            .collect();
        let sole_agency = match agencies.len() {
            1 => agencies.values().next().cloned(),
            _ => None,
        };

        let mut rows = Vec::with_capacity(snapshot.routes.len());
        let mut by_id = HashMap::new();
        for route in snapshot.routes {
            let agency = match &route.agency_id {
                Some(id) => agencies.get(id).cloned(),
                None => sole_agency.clone(),
            };
            let Some(agency) = agency else {
                warn!(
                    route_id = %route.route_id,
                    agency_id = ?route.agency_id,
                    "route has no known agency, skipping"
                );
                continue;
            };
            if by_id.contains_key(&route.route_id) {
                warn!(route_id = %route.route_id, "duplicate route id, skipping");
                continue;
            }
            by_id.insert(route.route_id.clone(), rows.len());
            rows.push(RouteRow { route, agency });
        }

        let stops = snapshot
            .stops
            .into_iter()
            .map(|s| {
                let mut indices: Vec<usize> =
                    s.route_ids.iter().filter_map(|id| by_id.get(id).copied()).collect();
                indices.sort_unstable();
                indices.dedup();
                (s.stop_id, indices)
            })
            .collect();

        let repo = Self {
            rows,
            by_id,
            stops,
            current: RwLock::new(CurrentTables::default()),
        };
        repo.refresh_current(today);
        repo
    }

    /// Load a snapshot file and build the repository.
    pub fn load(path: impl AsRef<Path>, today: NaiveDate) -> Result<Self, RepositoryError> {
        Ok(Self::new(TransitSnapshot::load(path)?, today))
    }

    /// Recompute the current tables for a new day.
    pub fn refresh_current(&self, today: NaiveDate) {
        let routes = self.active_on(today);
        let stops = self
            .stops
            .iter()
            .map(|(stop, indices)| {
                let active = indices
                    .iter()
                    .copied()
                    .filter(|&i| self.rows[i].route.is_active_on(today))
                    .collect();
                (stop.clone(), active)
            })
            .collect();

        let count = routes.len();
        match self.current.write() {
            Ok(mut guard) => {
                *guard = CurrentTables {
                    as_of: Some(today),
                    routes,
                    stops,
                };
                info!(%today, routes = count, "refreshed current route tables");
            }
            Err(e) => warn!(error = %e, "current route tables poisoned, not refreshed"),
        }
    }

    /// The day the current tables were computed for.
    pub fn current_as_of(&self) -> Option<NaiveDate> {
        self.current.read().ok().and_then(|c| c.as_of)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn active_on(&self, date: NaiveDate) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&i| self.rows[i].route.is_active_on(date))
            .collect()
    }

    fn current(&self) -> Result<std::sync::RwLockReadGuard<'_, CurrentTables>, RepositoryError> {
        self.current
            .read()
            .map_err(|e| RepositoryError::Backend(e.to_string()))
    }

    fn collect(&self, indices: impl IntoIterator<Item = usize>) -> Vec<RouteRow> {
        indices.into_iter().map(|i| self.rows[i].clone()).collect()
    }
}

impl TransitRepository for InMemoryRepository {
    fn routes(&self, as_of: Option<NaiveDate>) -> Result<Vec<RouteRow>, RepositoryError> {
        match as_of {
            Some(date) => Ok(self.collect(self.active_on(date))),
            None => {
                let current = self.current()?;
                Ok(self.collect(current.routes.iter().copied()))
            }
        }
    }

    fn route(&self, route_id: &str) -> Result<RouteRow, RepositoryError> {
        self.by_id
            .get(route_id)
            .map(|&i| self.rows[i].clone())
            .ok_or_else(|| RepositoryError::RouteNotFound(route_id.to_string()))
    }

    fn routes_at_stop(
        &self,
        stop_id: &str,
        agency_id: Option<&str>,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<RouteRow>, RepositoryError> {
        let indices: Vec<usize> = match as_of {
            Some(date) => self
                .stops
                .get(stop_id)
                .ok_or_else(|| RepositoryError::StopNotFound(stop_id.to_string()))?
                .iter()
                .copied()
                .filter(|&i| self.rows[i].route.is_active_on(date))
                .collect(),
            None => self
                .current()?
                .stops
                .get(stop_id)
                .ok_or_else(|| RepositoryError::StopNotFound(stop_id.to_string()))?
                .clone(),
        };

        let rows = indices
            .into_iter()
            .filter(|&i| agency_id.is_none_or(|a| self.rows[i].agency.agency_id == a));
        Ok(self.collect(rows))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Two agencies; route 193 only runs in 2019, route 100 is a bad type.
    pub const SNAPSHOT: &str = r#"{
        "agencies": [
            {
                "agency_id": "TRIMET",
                "agency_name": "TriMet",
                "agency_url": "http://trimet.org/",
                "agency_timezone": "America/Los_Angeles",
                "agency_lang": "en",
                "agency_phone": "503-238-RIDE",
                "agency_fare_url": "http://trimet.org/fares/"
            },
            {"agency_id": "PSC", "agency_name": "Portland Streetcar"}
        ],
        "routes": [
            {
                "route_id": "18",
                "agency_id": "TRIMET",
                "route_short_name": "18",
                "route_long_name": "Hillside",
                "route_type": 3,
                "route_url": "http://trimet.org//schedules/r018.htm",
                "route_sort_order": 2300
            },
            {
                "route_id": "90",
                "agency_id": "TRIMET",
                "route_long_name": "MAX Red Line",
                "route_type": 0,
                "route_color": "D81526",
                "route_text_color": "FFFFFF",
                "route_sort_order": 0
            },
            {
                "route_id": "193",
                "agency_id": "PSC",
                "route_long_name": "Portland Streetcar - NS Line",
                "route_type": 0,
                "route_color": "84BD00",
                "service": [{"start": "2019-01-01", "end": "2019-12-31"}]
            },
            {"route_id": "100", "agency_id": "TRIMET", "route_type": 42},
            {"route_id": "999", "agency_id": "NOPE", "route_type": 3}
        ],
        "stops": [
            {"stop_id": "2", "route_ids": ["18", "90", "90", "193"]},
            {"stop_id": "7", "route_ids": ["ghost"]}
        ]
    }"#;

    pub fn repository(today: NaiveDate) -> InMemoryRepository {
        InMemoryRepository::new(TransitSnapshot::from_json(SNAPSHOT).unwrap(), today)
    }
}
