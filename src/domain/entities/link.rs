//! Link record representing one shortened URL and its click history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::click::ClickEvent;

/// A shortened URL with its analytics, as stored in the collection blob.
///
/// Serialized with camelCase keys so a collection exported from the original
/// browser build loads unchanged. `clicks` and `clickDetails` default when
/// absent, tolerating older partial records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub shortcode: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub click_details: Vec<ClickEvent>,
}

impl LinkRecord {
    /// Creates a fresh record with no clicks.
    pub fn new(
        shortcode: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expiry_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            shortcode,
            original_url,
            created_at,
            expiry_at,
            clicks: 0,
            click_details: Vec::new(),
        }
    }

    /// Appends a click event, keeping `clicks == click_details.len()`.
    pub fn register_click(&mut self, event: ClickEvent) {
        self.clicks += 1;
        self.click_details.push(event);
    }

    /// Returns true iff the record's validity window has passed at `now`.
    ///
    /// Strictly after: a record is still active at the exact expiry instant.
    /// Records with no expiry never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_at.is_some_and(|e| now > e)
    }

    /// Returns true iff the record has expired as of the current wall clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// One entry of a shorten batch, as supplied by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct LinkSubmission {
    /// The URL to shorten. Leading/trailing whitespace is ignored.
    pub original_url: String,
    /// Validity window in minutes; defaults to 30 when absent.
    pub validity_minutes: Option<i64>,
    /// Requested shortcode; blank values are treated as absent.
    pub preferred_shortcode: Option<String>,
}

impl LinkSubmission {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            validity_minutes: None,
            preferred_shortcode: None,
        }
    }

    pub fn with_validity(mut self, minutes: i64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn with_preferred_shortcode(mut self, code: impl Into<String>) -> Self {
        self.preferred_shortcode = Some(code.into());
        self
    }

    /// The URL as it will be stored.
    pub fn trimmed_url(&self) -> &str {
        self.original_url.trim()
    }

    /// The preferred shortcode, with blank input normalized away.
    pub fn preferred_code(&self) -> Option<&str> {
        self.preferred_shortcode
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}
