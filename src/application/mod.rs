//! Application layer: registry orchestration over the domain.

pub mod registry;
