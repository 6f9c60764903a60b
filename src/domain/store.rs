//! Persistence interface for the link collection.

use crate::domain::entities::LinkRecord;

/// Storage backend holding the full link collection as one unit.
///
/// The contract mirrors a browser-storage blob: `load` always yields a
/// usable collection (missing or corrupt data comes back empty) and `save`
/// reports success as a plain boolean. Implementations must write the
/// whole collection atomically; a failed save leaves the previous blob
/// intact.
#[cfg_attr(test, mockall::automock)]
pub trait LinkStore: Send + Sync {
    /// Reads the full collection. Never fails; unreadable data yields
    /// an empty collection.
    fn load(&self) -> Vec<LinkRecord>;

    /// Replaces the full collection. Returns false when the write did
    /// not take effect.
    fn save(&self, records: &[LinkRecord]) -> bool;
}
