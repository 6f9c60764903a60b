//! Concrete link store implementations.
//!
//! # Stores
//!
//! - [`JsonFileStore`] - collection persisted as one JSON file
//! - [`InMemoryStore`] - volatile store for tests and dry runs

pub mod json_file_store;
pub mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::InMemoryStore;
