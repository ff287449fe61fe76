//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::content::ContentConfig;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_OTP_URL: &str = "http://localhost/prod";
const DEFAULT_GEOCODER_URL: &str = "http://localhost/solr";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_GEOCODE_TTL_SECS: u64 = 3600;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: invalid address {value:?}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var}: invalid URL {value:?}: {message}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        message: String,
    },

    #[error("{var}: expected a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: expected true or false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Listen address (`GATEWAY_ADDR`).
    pub addr: SocketAddr,

    /// Planner plan endpoint (`OTP_URL`).
    pub otp_url: Url,

    /// Solr geocoder base (`GEOCODER_URL`).
    pub geocoder_url: Url,

    /// Optional content sources (`ADVERTS_URL`, `FARES_URL`,
    /// `CANCELLED_ROUTES_URL`).
    pub content: ContentConfig,

    /// Transit snapshot for the transit index (`ROUTES_DATA`).
    pub routes_data: Option<PathBuf>,

    /// Namespace override for route ids (`AGENCY_ID`).
    pub agency_id: Option<String>,

    /// Timeout on outbound HTTP calls (`HTTP_TIMEOUT_SECS`).
    pub http_timeout: Duration,

    /// Geocoder cache TTL (`GEOCODE_CACHE_TTL_SECS`).
    pub geocode_cache_ttl: Duration,

    /// Pretty-print every trip plan (`PRETTY_OUTPUT`).
    pub pretty: bool,
}

impl GatewayConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary lookup.
    ///
    /// Unset and blank variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let addr_text = get("GATEWAY_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_text.parse().map_err(|_| ConfigError::InvalidAddr {
            var: "GATEWAY_ADDR",
            value: addr_text.clone(),
        })?;

        let content = ContentConfig {
            adverts_url: get("ADVERTS_URL")
                .map(|u| check_url("ADVERTS_URL", u))
                .transpose()?,
            fares_url: get("FARES_URL").map(|u| check_url("FARES_URL", u)).transpose()?,
            cancelled_routes_url: get("CANCELLED_ROUTES_URL")
                .map(|u| check_url("CANCELLED_ROUTES_URL", u))
                .transpose()?,
        };

        Ok(Self {
            addr,
            otp_url: parse_url("OTP_URL", get("OTP_URL"), DEFAULT_OTP_URL)?,
            geocoder_url: parse_url("GEOCODER_URL", get("GEOCODER_URL"), DEFAULT_GEOCODER_URL)?,
            content,
            routes_data: get("ROUTES_DATA").map(PathBuf::from),
            agency_id: get("AGENCY_ID"),
            http_timeout: Duration::from_secs(parse_secs(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
            )?),
            geocode_cache_ttl: Duration::from_secs(parse_secs(
                "GEOCODE_CACHE_TTL_SECS",
                get("GEOCODE_CACHE_TTL_SECS"),
                DEFAULT_GEOCODE_TTL_SECS,
            )?),
            pretty: parse_flag("PRETTY_OUTPUT", get("PRETTY_OUTPUT"))?,
        })
    }
}

fn parse_url(var: &'static str, value: Option<String>, default: &str) -> Result<Url, ConfigError> {
    let value = value.unwrap_or_else(|| default.to_string());
    Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
        var,
        message: e.to_string(),
        value,
    })
}

/// Validate a URL but keep it as text.
fn check_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    match Url::parse(&value) {
        Ok(_) => Ok(value),
        Err(e) => Err(ConfigError::InvalidUrl {
            var,
            message: e.to_string(),
            value,
        }),
    }
}

fn parse_secs(var: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value: v }),
    }
}

fn parse_flag(var: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let lowered = value.as_deref().map(str::to_ascii_lowercase);
    match lowered.as_deref() {
        None | Some("false" | "0" | "no") => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some(_) => Err(ConfigError::InvalidFlag {
            var,
            value: value.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<GatewayConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GatewayConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[]).unwrap();

        assert_eq!(c.addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.otp_url.as_str(), "http://localhost/prod");
        assert_eq!(c.geocoder_url.as_str(), "http://localhost/solr");
        assert_eq!(c.content, ContentConfig::default());
        assert_eq!(c.routes_data, None);
        assert_eq!(c.agency_id, None);
        assert_eq!(c.http_timeout, Duration::from_secs(30));
        assert_eq!(c.geocode_cache_ttl, Duration::from_secs(3600));
        assert!(!c.pretty);
    }

    #[test]
    fn overrides() {
        let c = config(&[
            ("GATEWAY_ADDR", "0.0.0.0:8080"),
            ("OTP_URL", "http://maps.trimet.org/otp_mod/plan"),
            ("FARES_URL", "http://cdn.example.com/fares.json"),
            ("ROUTES_DATA", "/data/gtfs.json"),
            ("AGENCY_ID", "TriMet"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("PRETTY_OUTPUT", "TRUE"),
        ])
        .unwrap();

        assert_eq!(c.addr.port(), 8080);
        assert_eq!(c.otp_url.path(), "/otp_mod/plan");
        assert_eq!(
            c.content.fares_url.as_deref(),
            Some("http://cdn.example.com/fares.json")
        );
        assert_eq!(c.content.adverts_url, None);
        assert_eq!(c.routes_data, Some(PathBuf::from("/data/gtfs.json")));
        assert_eq!(c.agency_id.as_deref(), Some("TriMet"));
        assert_eq!(c.http_timeout, Duration::from_secs(5));
        assert!(c.pretty);
    }

    #[test]
    fn blank_means_unset() {
        let c = config(&[("ADVERTS_URL", "  "), ("AGENCY_ID", "")]).unwrap();
        assert_eq!(c.content.adverts_url, None);
        assert_eq!(c.agency_id, None);
    }

    #[test]
    fn bad_values_rejected() {
        assert!(matches!(
            config(&[("GATEWAY_ADDR", "localhost")]),
            Err(ConfigError::InvalidAddr { .. })
        ));
        assert!(matches!(
            config(&[("OTP_URL", "not a url")]),
            Err(ConfigError::InvalidUrl { var: "OTP_URL", .. })
        ));
        assert!(matches!(
            config(&[("ADVERTS_URL", "adverts.json")]),
            Err(ConfigError::InvalidUrl { var: "ADVERTS_URL", .. })
        ));
        assert!(matches!(
            config(&[("HTTP_TIMEOUT_SECS", "ten")]),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            config(&[("PRETTY_OUTPUT", "sometimes")]),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }
}
