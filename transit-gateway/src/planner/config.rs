//! Trip planner configuration.

use reqwest::Url;

/// Configuration for the trip planner orchestrator.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// The planner's plan endpoint; query parameters are appended to it.
    pub plan_url: Url,

    /// Pretty-print every response, whatever the request asks for.
    pub pretty: bool,
}

impl PlannerConfig {
    /// Create a configuration for the given plan endpoint.
    pub fn new(plan_url: Url) -> Self {
        Self {
            plan_url,
            pretty: false,
        }
    }

    /// Force pretty-printed output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_by_default() {
        let config = PlannerConfig::new(Url::parse("http://localhost/prod").unwrap());
        assert!(!config.pretty);
        assert_eq!(config.plan_url.path(), "/prod");
    }

    #[test]
    fn pretty_override() {
        let config =
            PlannerConfig::new(Url::parse("http://localhost/prod").unwrap()).with_pretty(true);
        assert!(config.pretty);
    }
}
