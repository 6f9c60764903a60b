//! JSON file implementation of the link store.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::warn;

use crate::domain::entities::LinkRecord;
use crate::domain::store::LinkStore;

/// Stores the link collection as one pretty-printed JSON file.
///
/// The file holds a plain array of records, compatible with collections
/// exported from the original browser build. Saves go through a sibling
/// temp file and an atomic rename, so a crash mid-write never leaves a
/// truncated collection behind.
///
/// Concurrent writers are not coordinated: with several processes pointed
/// at the same file, the last save wins.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the given file path. The file and its
    /// parent directories are created lazily on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn try_save(&self, records: &[LinkRecord]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(records).map_err(io::Error::other)?;

        let mut tmp = self.path.clone();
        tmp.as_mut_os_string().push(".tmp");

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }
}

impl LinkStore for JsonFileStore {
    fn load(&self) -> Vec<LinkRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read collection, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "stored collection is not valid JSON, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[LinkRecord]) -> bool {
        match self.try_save(records) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to persist collection");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn record(code: &str) -> LinkRecord {
        LinkRecord::new(
            code.to_string(),
            "https://example.com".to_string(),
            Utc::now(),
            None,
        )
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("links.json"));

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("links.json"));

        let records = vec![record("abc123"), record("def456")];
        assert!(store.save(&records));

        assert_eq!(store.load(), records);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deeper/links.json"));

        assert!(store.save(&[record("abc123")]));
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");
        let store = JsonFileStore::new(&path);

        store.save(&[record("abc123")]);

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["links.json"]);
    }

    #[test]
    fn test_failed_save_returns_false_and_keeps_old_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");

        let store = JsonFileStore::new(&path);
        assert!(store.save(&[record("abc123")]));

        // Turning the target path into a directory makes the rename fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(!store.save(&[record("def456")]));
    }

    #[test]
    fn test_load_accepts_original_export_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");
        fs::write(
            &path,
            r#"[{
                "shortcode": "doc123",
                "originalUrl": "https://example.com/docs",
                "createdAt": "2025-06-01T10:00:00Z",
                "expiryAt": "2025-06-01T10:30:00Z",
                "clicks": 1,
                "clickDetails": [{
                    "timestamp": "2025-06-01T10:05:00Z",
                    "source": "Direct",
                    "coarseGeo": "Asia/Kolkata"
                }]
            }]"#,
        )
        .unwrap();

        let store = JsonFileStore::new(&path);
        let records = store.load();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].shortcode, "doc123");
        assert_eq!(records[0].clicks, 1);
        assert_eq!(records[0].click_details[0].coarse_geo, "Asia/Kolkata");
    }
}
