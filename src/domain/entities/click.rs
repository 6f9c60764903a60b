//! Click event captured when a shortened URL is resolved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded click, stored inside the owning [`LinkRecord`].
///
/// [`LinkRecord`]: super::link::LinkRecord
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    /// Referrer of the click, or `"Direct"` when none was supplied.
    pub source: String,
    /// Coarse location hint (an IANA timezone name), or `"Unknown"`.
    pub coarse_geo: String,
}

impl ClickEvent {
    /// Missing source and geo fall back to their sentinel values.
    pub fn new(timestamp: DateTime<Utc>, source: Option<&str>, coarse_geo: Option<&str>) -> Self {
        Self {
            timestamp,
            source: source
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("Direct")
                .to_string(),
            coarse_geo: coarse_geo
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .unwrap_or("Unknown")
                .to_string(),
        }
    }

    /// A click happening right now.
    pub fn now(source: Option<&str>, coarse_geo: Option<&str>) -> Self {
        Self::new(Utc::now(), source, coarse_geo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_keeps_supplied_fields() {
        let ts = Utc::now();
        let click = ClickEvent::new(ts, Some("https://ref.example/page"), Some("Europe/Berlin"));

        assert_eq!(click.timestamp, ts);
        assert_eq!(click.source, "https://ref.example/page");
        assert_eq!(click.coarse_geo, "Europe/Berlin");
    }

    #[test]
    fn test_missing_source_becomes_direct() {
        let click = ClickEvent::now(None, Some("Asia/Kolkata"));
        assert_eq!(click.source, "Direct");
    }

    #[test]
    fn test_blank_source_becomes_direct() {
        let click = ClickEvent::now(Some("   "), None);
        assert_eq!(click.source, "Direct");
    }

    #[test]
    fn test_missing_geo_becomes_unknown() {
        let click = ClickEvent::now(Some("https://ref.example"), None);
        assert_eq!(click.coarse_geo, "Unknown");
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let click = ClickEvent::now(None, None);
        let json = serde_json::to_value(&click).unwrap();

        assert!(json.get("timestamp").is_some());
        assert!(json.get("source").is_some());
        assert!(json.get("coarseGeo").is_some());
    }
}
