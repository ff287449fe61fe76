//! Agency-qualified identifiers.

use std::fmt;

use serde::{Serialize, Serializer};

/// Separator between agency namespace and native id.
const SEPARATOR: char = ':';

/// An identifier prefixed with its owning agency's namespace.
///
/// Renders as `<namespace>:<native-id>`, e.g. `TriMet:18`. Route and stop
/// ids exposed by the transit index always take this form so that ids from
/// different agencies never collide.
///
/// # Examples
///
/// ```
/// use transit_gateway::domain::AgencyQualifiedId;
///
/// let id = AgencyQualifiedId::new("TriMet", "18");
/// assert_eq!(id.to_string(), "TriMet:18");
///
/// let parsed = AgencyQualifiedId::parse("TriMet:18").unwrap();
/// assert_eq!(parsed, id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgencyQualifiedId {
    namespace: String,
    id: String,
}

impl AgencyQualifiedId {
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }

    /// Parse `namespace:id`. Both halves must be non-empty.
    ///
    /// Only the first separator splits, so native ids may themselves
    /// contain colons.
    pub fn parse(s: &str) -> Option<Self> {
        let (namespace, id) = s.split_once(SEPARATOR)?;
        if namespace.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self::new(namespace, id))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The agency's own id for the entity, without namespace.
    pub fn native_id(&self) -> &str {
        &self.id
    }

    /// Render in the planner's banned-routes form, `agency__route`.
    pub fn to_banned_route(&self) -> String {
        format!("{}__{}", self.namespace, self.id)
    }
}

/// Strip an optional namespace, returning the native id.
///
/// Path parameters such as `TriMet:18` and plain `18` both resolve to `18`.
pub fn native_id(s: &str) -> &str {
    match s.split_once(SEPARATOR) {
        Some((namespace, id)) if !namespace.is_empty() && !id.is_empty() => id,
        _ => s,
    }
}

impl fmt::Display for AgencyQualifiedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, SEPARATOR, self.id)
    }
}

impl Serialize for AgencyQualifiedId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
