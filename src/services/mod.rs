//! Application services
//!
//! Each service orchestrates one storage round trip per call: load the
//! property document, apply the change, write back.

pub mod checklist;
pub mod properties;

pub use checklist::ChecklistService;
pub use properties::{PropertyPatch, PropertyService};
