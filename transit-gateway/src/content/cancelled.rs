//! Operator-cancelled routes, excluded from every planner query.

use serde::Deserialize;
use tracing::warn;

use crate::domain::AgencyQualifiedId;

/// Wire form: `{"routes": ["TriMet:12", ...]}`.
#[derive(Debug, Deserialize)]
pub struct CancelledRoutesDoc {
    #[serde(default)]
    pub routes: Vec<String>,
}

/// Validated list of cancelled routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelledRoutes {
    routes: Vec<AgencyQualifiedId>,
}

impl CancelledRoutes {
    pub fn new(routes: Vec<AgencyQualifiedId>) -> Self {
        Self { routes }
    }

    /// Build from the wire form, skipping ids without an agency namespace.
    pub fn from_doc(doc: CancelledRoutesDoc) -> Self {
        let routes = doc
            .routes
            .iter()
            .filter_map(|raw| {
                let parsed = AgencyQualifiedId::parse(raw);
                if parsed.is_none() {
                    warn!(route = %raw, "skipping cancelled route without agency namespace");
                }
                parsed
            })
            .collect();

        Self { routes }
    }

    pub fn routes(&self) -> &[AgencyQualifiedId] {
        &self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_ids_skipped() {
        let doc: CancelledRoutesDoc =
            serde_json::from_str(r#"{"routes": ["TriMet:12", "bogus", "TriMet:90"]}"#).unwrap();
        let cancelled = CancelledRoutes::from_doc(doc);

        assert_eq!(
            cancelled.routes(),
            &[
                AgencyQualifiedId::new("TriMet", "12"),
                AgencyQualifiedId::new("TriMet", "90")
            ]
        );
    }

    #[test]
    fn missing_key_is_empty() {
        let doc: CancelledRoutesDoc = serde_json::from_str("{}").unwrap();
        assert!(CancelledRoutes::from_doc(doc).is_empty());
    }
}
