//! Property document schema
//!
//! Represents a vacation home managed by Loved Homes. The checklist tree
//! is embedded whole in the document; every mutation rewrites the full
//! `checklist` field, which makes the single document write the atomicity
//! boundary.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistNode;
use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;

/// Collection name for properties
pub const PROPERTY_COLLECTION: &str = "property";

/// Property document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PropertyDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Common metadata (created_at, updated_at)
    #[serde(default)]
    pub metadata: Metadata,

    /// Property display name
    pub name: String,

    /// Public URL of the uploaded cover photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// Root-level checklist nodes
    #[serde(default)]
    pub checklist: Vec<ChecklistNode>,
}

impl PropertyDoc {
    /// Create a new property document with an empty checklist
    pub fn new(name: String, photo_url: Option<String>) -> Self {
        Self {
            _id: None,
            metadata: Metadata::new(),
            name,
            photo_url,
            checklist: Vec::new(),
        }
    }
}

impl IntoIndexes for PropertyDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "name": 1 },
            Some(
                IndexOptions::builder()
                    .name("name_index".to_string())
                    .build(),
            ),
        )]
    }
}

impl MutMetadata for PropertyDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
