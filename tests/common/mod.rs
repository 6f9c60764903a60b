#![allow(dead_code)]

use chrono::{Duration, Utc};
use linkstash::prelude::*;
use tempfile::TempDir;

/// A registry over a JSON file in a fresh temp directory.
///
/// The directory guard must stay alive for the duration of the test.
pub fn temp_registry() -> (TempDir, Registry<JsonFileStore>) {
    let dir = TempDir::new().unwrap();
    let registry = Registry::new(store_in(&dir));
    (dir, registry)
}

/// A second store handle over the same collection file.
pub fn store_in(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::new(dir.path().join("links.json"))
}

/// A second registry over the same collection file, as a fresh process
/// would open it.
pub fn reopen(dir: &TempDir) -> Registry<JsonFileStore> {
    Registry::new(store_in(dir))
}

pub fn active_record(code: &str, url: &str) -> LinkRecord {
    LinkRecord::new(
        code.to_string(),
        url.to_string(),
        Utc::now(),
        Some(Utc::now() + Duration::minutes(60)),
    )
}

pub fn expired_record(code: &str, url: &str) -> LinkRecord {
    LinkRecord::new(
        code.to_string(),
        url.to_string(),
        Utc::now() - Duration::minutes(90),
        Some(Utc::now() - Duration::minutes(60)),
    )
}
