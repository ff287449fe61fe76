//! Route and agency representations exposed by the transit index.
//!
//! Both shapes mirror the planner's own transit-index JSON so existing
//! clients can consume either source without changes.

use serde::Serialize;

use super::ident::AgencyQualifiedId;
use super::mode::TransitMode;

/// A transit route, normalized from a backend record.
///
/// Construct with [`Route::builder`]. Optional fields are omitted from the
/// JSON when absent. `sortOrderSet` is only emitted (as `true`) when a
/// non-zero sort order was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    id: AgencyQualifiedId,
    agency_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_name: Option<String>,
    long_name: Option<String>,
    mode: TransitMode,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    route_type: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_order: Option<i32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    sort_order_set: bool,
}

impl Route {
    /// Start building a route. Id, agency name and mode are required.
    pub fn builder(
        id: AgencyQualifiedId,
        agency_name: impl Into<String>,
        mode: TransitMode,
    ) -> RouteBuilder {
        RouteBuilder {
            id,
            agency_name: agency_name.into(),
            mode,
            short_name: None,
            long_name: None,
            route_type: None,
            url: None,
            color: None,
            text_color: None,
            sort_order: None,
        }
    }

    pub fn id(&self) -> &AgencyQualifiedId {
        &self.id
    }

    pub fn agency_name(&self) -> &str {
        &self.agency_name
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    pub fn mode(&self) -> TransitMode {
        self.mode
    }

    pub fn route_type(&self) -> Option<i32> {
        self.route_type
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn text_color(&self) -> Option<&str> {
        self.text_color.as_deref()
    }

    pub fn sort_order(&self) -> Option<i32> {
        self.sort_order
    }

    /// Whether the sort order is authoritative.
    ///
    /// When false, consumers must not assume any ordering between routes.
    pub fn sort_order_set(&self) -> bool {
        self.sort_order_set
    }
}

/// Builder for [`Route`].
///
/// Empty strings and a zero sort order count as "not supplied".
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    id: AgencyQualifiedId,
    agency_name: String,
    mode: TransitMode,
    short_name: Option<String>,
    long_name: Option<String>,
    route_type: Option<i32>,
    url: Option<String>,
    color: Option<String>,
    text_color: Option<String>,
    sort_order: Option<i32>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

impl RouteBuilder {
    pub fn short_name(mut self, name: Option<String>) -> Self {
        self.short_name = non_empty(name);
        self
    }

    pub fn long_name(mut self, name: Option<String>) -> Self {
        self.long_name = non_empty(name);
        self
    }

    pub fn route_type(mut self, code: Option<i32>) -> Self {
        self.route_type = code;
        self
    }

    pub fn url(mut self, url: Option<String>) -> Self {
        self.url = non_empty(url);
        self
    }

    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = non_empty(color);
        self
    }

    pub fn text_color(mut self, color: Option<String>) -> Self {
        self.text_color = non_empty(color);
        self
    }

    pub fn sort_order(mut self, order: Option<i32>) -> Self {
        self.sort_order = order.filter(|o| *o != 0);
        self
    }

    pub fn build(self) -> Route {
        Route {
            sort_order_set: self.sort_order.is_some(),
            id: self.id,
            agency_name: self.agency_name,
            short_name: self.short_name,
            long_name: self.long_name,
            mode: self.mode,
            route_type: self.route_type,
            url: self.url,
            color: self.color,
            text_color: self.text_color,
            sort_order: self.sort_order,
        }
    }
}

/// Agency detail block, nested under a detailed route response.
///
/// Every key is always present; missing values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub timezone: Option<String>,
    pub lang: Option<String>,
    pub phone: Option<String>,
    pub fare_url: Option<String>,
}

/// A single route together with its agency, as returned by route-by-id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDetail {
    #[serde(flatten)]
    pub route: Route,
    pub agency: Agency,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn base() -> RouteBuilder {
        Route::builder(
            AgencyQualifiedId::new("TriMet", "18"),
            "TriMet",
            TransitMode::Bus,
        )
    }

    /// Keys in emitted order (`Value` maps are sorted, so read the text).
    fn key_positions(route: &Route, keys: &[&str]) -> Vec<usize> {
        let text = serde_json::to_string(route).unwrap();
        keys.iter()
            .map(|k| text.find(&format!("\"{k}\":")).unwrap())
            .collect()
    }

    #[test]
    fn sort_order_set_when_supplied() {
        let route = base().sort_order(Some(2300)).build();
        assert_eq!(route.sort_order(), Some(2300));
        assert!(route.sort_order_set());

        let v = serde_json::to_value(&route).unwrap();
        assert_eq!(v["sortOrder"], json!(2300));
        assert_eq!(v["sortOrderSet"], json!(true));
    }

    #[test]
    fn sort_order_absent_when_missing_or_zero() {
        for order in [None, Some(0)] {
            let route = base().sort_order(order).build();
            assert!(!route.sort_order_set());
            let v = serde_json::to_value(&route).unwrap();
            assert!(v.get("sortOrder").is_none());
            assert!(v.get("sortOrderSet").is_none());
        }
    }

    #[test]
    fn minimal_route_json() {
        let route = base().build();
        let v = serde_json::to_value(&route).unwrap();
        assert_eq!(
            v,
            json!({
                "id": "TriMet:18",
                "agencyName": "TriMet",
                "longName": null,
                "mode": "BUS"
            })
        );
    }

    #[test]
    fn full_route_json_key_order() {
        let route = base()
            .short_name(Some("18".into()))
            .long_name(Some("Hillside".into()))
            .route_type(Some(3))
            .url(Some("http://trimet.org//schedules/r018.htm".into()))
            .color(Some("84BD00".into()))
            .text_color(Some("FFFFFF".into()))
            .sort_order(Some(2300))
            .build();

        let expected = [
            "id",
            "agencyName",
            "shortName",
            "longName",
            "mode",
            "type",
            "url",
            "color",
            "textColor",
            "sortOrder",
            "sortOrderSet",
        ];
        let positions = key_positions(&route, &expected);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            serde_json::to_value(&route).unwrap().as_object().unwrap().len(),
            expected.len()
        );
    }

    #[test]
    fn empty_strings_are_absent() {
        let route = base()
            .short_name(Some(String::new()))
            .color(Some(String::new()))
            .build();
        assert_eq!(route.short_name(), None);
        assert_eq!(route.color(), None);
    }

    #[test]
    fn detail_nests_agency() {
        let detail = RouteDetail {
            route: base().short_name(Some("18".into())).build(),
            agency: Agency {
                id: "TRIMET".into(),
                name: "TriMet".into(),
                url: Some("http://trimet.org/".into()),
                timezone: Some("America/Los_Angeles".into()),
                lang: Some("en".into()),
                phone: None,
                fare_url: Some("http://trimet.org/fares/".into()),
            },
        };

        let v = serde_json::to_value(&detail).unwrap();
        assert_eq!(v["id"], json!("TriMet:18"));
        assert_eq!(v["agency"]["fareUrl"], json!("http://trimet.org/fares/"));
        assert_eq!(v["agency"]["phone"], Value::Null);
        assert_eq!(v["agency"].as_object().unwrap().len(), 7);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// sortOrderSet is present iff a non-zero sort order was supplied
        #[test]
        fn sort_order_set_iff_nonzero(order in proptest::option::of(-5000i32..5000)) {
            let route = Route::builder(AgencyQualifiedId::new("A", "1"), "A", TransitMode::Bus)
                .sort_order(order)
                .build();
            let v = serde_json::to_value(&route).unwrap();
            let supplied = matches!(order, Some(o) if o != 0);
            prop_assert_eq!(route.sort_order_set(), supplied);
            prop_assert_eq!(v.get("sortOrderSet").is_some(), supplied);
        }
    }
}
