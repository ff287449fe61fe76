//! Contextual advertisements keyed by transit mode and language.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::TransitMode;

/// Language used when the requested one has no adverts.
const FALLBACK_LANG: &str = "en";

/// Key for adverts shown regardless of mode.
const DEFAULT_KEY: &str = "default";

/// Supplies adverts for a plan's dominant mode.
pub trait AdvertSource: Send + Sync {
    fn query(&self, mode: Option<TransitMode>, lang: &str) -> Vec<Advert>;
}

/// A single advert, rendered alongside a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advert {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Advert catalog: language → mode (or `default`) → adverts.
///
/// ```json
/// {"en": {"BUS": [{"title": "Frequent Service"}], "default": [...]}}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AdvertCatalog {
    by_lang: HashMap<String, HashMap<String, Vec<Advert>>>,
}

impl AdvertCatalog {
    fn lookup(&self, mode: Option<TransitMode>, lang: &str) -> Option<&Vec<Advert>> {
        let by_mode = self.by_lang.get(lang)?;
        mode.and_then(|m| by_mode.get(m.as_str()))
            .or_else(|| by_mode.get(DEFAULT_KEY))
    }
}

impl AdvertSource for AdvertCatalog {
    /// Mode-specific adverts in the requested language, then that
    /// language's defaults, then the same two lookups in English.
    fn query(&self, mode: Option<TransitMode>, lang: &str) -> Vec<Advert> {
        let lang = lang.to_ascii_lowercase();
        self.lookup(mode, &lang)
            .or_else(|| self.lookup(mode, FALLBACK_LANG))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> AdvertCatalog {
        serde_json::from_str(
            r#"{
                "en": {
                    "BUS": [{"title": "Frequent Service"}],
                    "RAIL": [{"title": "MAX", "url": "http://trimet.org/max"}],
                    "default": [{"title": "Ride TriMet"}]
                },
                "es": {
                    "BUS": [{"title": "Servicio Frecuente"}]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn mode_and_lang_match() {
        let ads = catalog().query(Some(TransitMode::Bus), "es");
        assert_eq!(ads[0].title, "Servicio Frecuente");
    }

    #[test]
    fn falls_back_to_english_mode() {
        let ads = catalog().query(Some(TransitMode::Rail), "es");
        assert_eq!(ads[0].title, "MAX");
    }

    #[test]
    fn falls_back_to_default_list() {
        let ads = catalog().query(Some(TransitMode::Ferry), "en");
        assert_eq!(ads[0].title, "Ride TriMet");

        let ads = catalog().query(None, "en");
        assert_eq!(ads[0].title, "Ride TriMet");
    }

    #[test]
    fn unknown_everything_is_empty() {
        assert!(AdvertCatalog::default().query(Some(TransitMode::Bus), "en").is_empty());
    }

    #[test]
    fn lang_case_insensitive() {
        let ads = catalog().query(Some(TransitMode::Bus), "ES");
        assert_eq!(ads[0].title, "Servicio Frecuente");
    }
}
