//! Domain entities.

pub mod click;
pub mod link;

pub use click::ClickEvent;
pub use link::{LinkRecord, LinkSubmission};
