//! The rendered result of one trip-planning call.

use serde::Serialize;
use tracing::warn;

use crate::content::Advert;
use crate::domain::{Plan, PlanError};
use crate::otp::Translation;

/// Trip-plan output: `{"plan": ..., "adverts": [...]}`, `{"error": ...}`
/// or `{}`.
///
/// At most one of `plan` and `error` is set. Adverts only accompany a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripPlanOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<PlanError>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub adverts: Vec<Advert>,
}

impl TripPlanOutput {
    /// The empty output, rendered as `{}`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_plan(plan: Plan) -> Self {
        Self {
            plan: Some(plan),
            ..Self::default()
        }
    }

    pub fn from_error(error: PlanError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Attach adverts. Ignored unless a plan is present.
    pub fn with_adverts(mut self, adverts: Vec<Advert>) -> Self {
        if self.plan.is_some() {
            self.adverts = adverts;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_none() && self.error.is_none()
    }

    /// Render as JSON.
    pub fn render(&self, pretty: bool) -> String {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };

        rendered.unwrap_or_else(|e| {
            warn!(error = %e, "failed to render trip plan");
            "{}".to_string()
        })
    }
}

impl From<Translation> for TripPlanOutput {
    fn from(translation: Translation) -> Self {
        match translation {
            Translation::Plan(plan) => Self::from_plan(plan),
            Translation::Error(error) => Self::from_error(error),
            Translation::Empty => Self::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message;

    #[test]
    fn empty_renders_as_empty_object() {
        assert_eq!(TripPlanOutput::empty().render(false), "{}");
        assert!(TripPlanOutput::empty().is_empty());
    }

    #[test]
    fn error_has_no_plan_key() {
        let out = TripPlanOutput::from_error(PlanError::new(message::SYSTEM_ERROR, "down"));
        let json: serde_json::Value = serde_json::from_str(&out.render(false)).unwrap();

        assert!(json.get("plan").is_none());
        assert!(json.get("adverts").is_none());
        assert_eq!(json["error"]["id"], 500);
    }

    #[test]
    fn adverts_need_a_plan() {
        let advert = Advert {
            title: "Ride MAX".to_string(),
            body: None,
            url: None,
            image: None,
        };
        let out = TripPlanOutput::from_error(PlanError::new(404, "no trip"))
            .with_adverts(vec![advert]);
        assert!(out.adverts.is_empty());
    }

    #[test]
    fn pretty_render_is_multiline() {
        let out = TripPlanOutput::from_error(PlanError::new(404, "no trip"));
        assert!(out.render(true).contains('\n'));
        assert!(!out.render(false).contains('\n'));
    }

    #[test]
    fn translation_maps_onto_output() {
        assert!(TripPlanOutput::from(Translation::Empty).is_empty());
        let out = TripPlanOutput::from(Translation::Error(PlanError::new(404, "no trip")));
        assert_eq!(out.error.map(|e| e.id), Some(404));
    }
}
