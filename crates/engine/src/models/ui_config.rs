//! Filter / sort / search configuration.
//!
//! This is UI-owned state, but it is part of the persisted snapshot and
//! is reset (to defaults) by the reset-all operation, so it lives with
//! the entity model. Loading is deliberately field-by-field lenient:
//! an unrecognized sort mode or an out-of-range radius falls back to the
//! default for that field without discarding the rest of the document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use lowkal_core::{ActiveTab, SortMode};

/// Catalog filter, sort, and navigation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Maximum listing distance shown, in whole kilometers (1..=10).
    pub max_distance_km: u8,
    /// Show only listings that accept barter offers.
    #[serde(rename = "exchangeOnly")]
    pub takas_only: bool,
    pub sort_mode: SortMode,
    #[serde(default)]
    pub search_text: String,
    pub active_tab: ActiveTab,
}

impl UiConfig {
    /// Default search radius in kilometers.
    pub const DEFAULT_RADIUS_KM: u8 = 5;
    /// Valid radius range.
    pub const RADIUS_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

    /// Clamp the radius into the valid 1..=10 range.
    #[must_use]
    pub fn clamp_radius(km: u8) -> u8 {
        km.clamp(*Self::RADIUS_RANGE.start(), *Self::RADIUS_RANGE.end())
    }

    /// Decode a persisted document, field by field.
    ///
    /// Every unrecognized or ill-typed field falls back to its default,
    /// and a document that is not an object yields the full default
    /// config. Startup never fails on a corrupt ui document.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut config = Self::default();
        let Some(doc) = value.as_object() else {
            return config;
        };

        if let Some(km) = doc
            .get("maxDistanceKm")
            .and_then(Value::as_u64)
            .and_then(|v| u8::try_from(v).ok())
            .filter(|km| Self::RADIUS_RANGE.contains(km))
        {
            config.max_distance_km = km;
        }
        if let Some(takas_only) = doc.get("exchangeOnly").and_then(Value::as_bool) {
            config.takas_only = takas_only;
        }
        if let Some(mode) = doc
            .get("sortMode")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<SortMode>().ok())
        {
            config.sort_mode = mode;
        }
        if let Some(text) = doc.get("searchText").and_then(Value::as_str) {
            config.search_text = text.to_owned();
        }
        if let Some(tab) = doc
            .get("activeTab")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<ActiveTab>().ok())
        {
            config.active_tab = tab;
        }

        config
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_distance_km: Self::DEFAULT_RADIUS_KM,
            takas_only: false,
            sort_mode: SortMode::default(),
            search_text: String::new(),
            active_tab: ActiveTab::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_value_full_document() {
        let config = UiConfig::from_value(&json!({
            "maxDistanceKm": 8,
            "exchangeOnly": true,
            "sortMode": "priceLow",
            "searchText": "bisiklet",
            "activeTab": "messages",
        }));
        assert_eq!(config.max_distance_km, 8);
        assert!(config.takas_only);
        assert_eq!(config.sort_mode, SortMode::PriceLow);
        assert_eq!(config.search_text, "bisiklet");
        assert_eq!(config.active_tab, ActiveTab::Messages);
    }

    #[test]
    fn test_from_value_ignores_bad_fields() {
        let config = UiConfig::from_value(&json!({
            "maxDistanceKm": 99,
            "exchangeOnly": "yes",
            "sortMode": "cheapest",
            "activeTab": 3,
            "searchText": "kamera",
        }));
        // valid field kept, invalid ones fall back to defaults
        assert_eq!(config.search_text, "kamera");
        assert_eq!(config.max_distance_km, UiConfig::DEFAULT_RADIUS_KM);
        assert!(!config.takas_only);
        assert_eq!(config.sort_mode, SortMode::Newest);
        assert_eq!(config.active_tab, ActiveTab::Home);
    }

    #[test]
    fn test_from_value_non_object_yields_defaults() {
        assert_eq!(UiConfig::from_value(&json!([1, 2, 3])), UiConfig::default());
        assert_eq!(UiConfig::from_value(&Value::Null), UiConfig::default());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(UiConfig::default()).unwrap();
        assert_eq!(json.get("maxDistanceKm").unwrap(), 5);
        assert_eq!(json.get("exchangeOnly").unwrap(), false);
        assert_eq!(json.get("sortMode").unwrap(), "newest");
        assert_eq!(json.get("activeTab").unwrap(), "home");
    }

    #[test]
    fn test_clamp_radius() {
        assert_eq!(UiConfig::clamp_radius(0), 1);
        assert_eq!(UiConfig::clamp_radius(7), 7);
        assert_eq!(UiConfig::clamp_radius(200), 10);
    }
}
