//! Infrastructure layer for external integrations.
//!
//! Implements the persistence contract defined by the domain layer and
//! hosts the remote log shipper.
//!
//! # Modules
//!
//! - [`persistence`] - JSON file and in-memory store implementations
//! - [`remote_log`] - fire-and-forget delivery to a log collector

pub mod persistence;
pub mod remote_log;
