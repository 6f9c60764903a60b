//! # Linkstash
//!
//! A small URL shortener core: batch link creation, click analytics, and
//! expiry handling over a single JSON collection file.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link records, click events, and the store trait
//! - **Application Layer** ([`application`]) - The registry orchestrating batches,
//!   lookups, and click recording
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON file persistence and
//!   remote log shipping
//!
//! ## Features
//!
//! - Batch shortening of up to five URLs with all-or-nothing semantics
//! - Preferred shortcodes with collision detection
//! - Generated base62 codes that widen when the code space gets crowded
//! - Per-link validity windows and strict expiry on resolve
//! - Click history with referrer source and coarse location
//!
//! ## Quick Start
//!
//! ```no_run
//! use linkstash::application::registry::Registry;
//! use linkstash::domain::entities::LinkSubmission;
//! use linkstash::infrastructure::persistence::JsonFileStore;
//!
//! let registry = Registry::new(JsonFileStore::new("links.json"));
//! let created = registry
//!     .create_batch(vec![
//!         LinkSubmission::new("https://example.com/some/long/path").with_validity(60),
//!     ])
//!     .expect("batch failed");
//! println!("shortcode: {}", created[0].shortcode);
//! ```
//!
//! ## Configuration
//!
//! The CLI loads its settings from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::{FieldError, RegistryError};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::registry::Registry;
    pub use crate::domain::entities::{ClickEvent, LinkRecord, LinkSubmission};
    pub use crate::domain::store::LinkStore;
    pub use crate::error::{FieldError, RegistryError};
    pub use crate::infrastructure::persistence::{InMemoryStore, JsonFileStore};
}
