//! Domain layer: entities and the persistence contract.

pub mod entities;
pub mod store;
