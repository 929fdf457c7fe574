//! Database schemas for Homestead
//!
//! Defines the MongoDB document structures for properties.

mod metadata;
mod property;

pub use metadata::Metadata;
pub use property::{PropertyDoc, PROPERTY_COLLECTION};
