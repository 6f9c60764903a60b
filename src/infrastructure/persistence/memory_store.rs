//! In-memory implementation of the link store.

use std::sync::Mutex;

use crate::domain::entities::LinkRecord;
use crate::domain::store::LinkStore;

/// Volatile store keeping the collection in process memory.
///
/// Useful for tests and one-off runs where nothing should touch disk.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<LinkRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with the given records.
    pub fn with_records(records: Vec<LinkRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl LinkStore for InMemoryStore {
    fn load(&self) -> Vec<LinkRecord> {
        match self.records.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, records: &[LinkRecord]) -> bool {
        let mut guard = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = records.to_vec();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(code: &str) -> LinkRecord {
        LinkRecord::new(
            code.to_string(),
            "https://example.com".to_string(),
            Utc::now(),
            None,
        )
    }

    #[test]
    fn test_starts_empty() {
        assert!(InMemoryStore::new().load().is_empty());
    }

    #[test]
    fn test_save_replaces_collection() {
        let store = InMemoryStore::new();

        assert!(store.save(&[record("abc123")]));
        assert!(store.save(&[record("def456"), record("ghi789")]));

        let codes: Vec<_> = store.load().into_iter().map(|r| r.shortcode).collect();
        assert_eq!(codes, ["def456", "ghi789"]);
    }

    #[test]
    fn test_seeded_store_serves_records() {
        let store = InMemoryStore::with_records(vec![record("abc123")]);
        assert_eq!(store.load()[0].shortcode, "abc123");
    }
}
