//! Fare annotations for transit legs.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::{Fare, Leg, TransitMode};

/// Supplies a fare for each transit leg.
pub trait FareSource: Send + Sync {
    /// The fare for a leg, or `None` for walks and unpriced modes.
    fn leg_fare(&self, leg: &Leg) -> Option<Fare>;
}

/// Flat fare table: a price per mode with an optional default.
///
/// ```json
/// {"currency": "USD", "defaultCents": 250, "modes": {"TRAM": 200}}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareTable {
    pub currency: String,

    /// Price for transit modes not listed in `modes`.
    pub default_cents: Option<u32>,

    #[serde(default)]
    pub modes: HashMap<TransitMode, u32>,
}

impl FareSource for FareTable {
    fn leg_fare(&self, leg: &Leg) -> Option<Fare> {
        let mode = leg.transit_mode()?;
        let cents = self.modes.get(&mode).copied().or(self.default_cents)?;
        Some(Fare {
            cents,
            currency: self.currency.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Place;

    fn leg(mode: &str, transit: bool) -> Leg {
        let place = Place {
            name: "x".into(),
            lat: 45.5,
            lon: -122.6,
            stop_id: None,
        };
        Leg {
            mode: mode.into(),
            transit_leg: transit,
            route: None,
            route_id: None,
            agency_id: None,
            headsign: None,
            from: place.clone(),
            to: place,
            start_time: 0,
            end_time: 60_000,
            duration: 60.0,
            distance: 100.0,
            fare: None,
        }
    }

    fn table() -> FareTable {
        serde_json::from_str(r#"{"currency": "USD", "defaultCents": 250, "modes": {"TRAM": 200}}"#)
            .unwrap()
    }

    #[test]
    fn mode_specific_fare() {
        let fare = table().leg_fare(&leg("TRAM", true)).unwrap();
        assert_eq!(fare.cents, 200);
        assert_eq!(fare.currency, "USD");
    }

    #[test]
    fn default_fare() {
        assert_eq!(table().leg_fare(&leg("BUS", true)).unwrap().cents, 250);
    }

    #[test]
    fn walk_has_no_fare() {
        assert_eq!(table().leg_fare(&leg("WALK", false)), None);
    }

    #[test]
    fn no_default_means_unpriced() {
        let t: FareTable =
            serde_json::from_str(r#"{"currency": "USD", "modes": {"RAIL": 500}}"#).unwrap();
        assert_eq!(t.leg_fare(&leg("BUS", true)), None);
        assert_eq!(t.leg_fare(&leg("RAIL", true)).unwrap().cents, 500);
    }
}
