//! Property CRUD
//!
//! Simple field-level persistence for the property documents themselves;
//! the checklist tree has its own service.

use std::sync::Arc;

use bson::{doc, DateTime};
use tracing::info;

use crate::db::schemas::PropertyDoc;
use crate::db::store::{parse_property_id, PropertyStore};
use crate::types::Result;

/// Field changes for a property; absent fields are left alone
#[derive(Clone, Debug, Default)]
pub struct PropertyPatch {
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

impl PropertyPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.photo_url.is_none()
    }
}

/// Service for property documents
#[derive(Clone)]
pub struct PropertyService {
    store: Arc<dyn PropertyStore>,
}

impl PropertyService {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }

    /// All properties
    pub async fn list(&self) -> Result<Vec<PropertyDoc>> {
        self.store.list_all().await
    }

    /// Create a property with an empty checklist, returning its id
    pub async fn create(&self, name: String, photo_url: Option<String>) -> Result<String> {
        let id = self
            .store
            .insert(PropertyDoc::new(name, photo_url))
            .await?;
        info!(property = %id, "Property created");
        Ok(id.to_hex())
    }

    /// Patch name/photo fields; an empty patch is a no-op returning `false`
    pub async fn update(&self, property_id: &str, patch: PropertyPatch) -> Result<bool> {
        let id = parse_property_id(property_id)?;
        if patch.is_empty() {
            return Ok(false);
        }

        let mut fields = doc! { "metadata.updated_at": DateTime::now() };
        if let Some(name) = patch.name {
            fields.insert("name", name);
        }
        if let Some(photo_url) = patch.photo_url {
            fields.insert("photo_url", photo_url);
        }

        let matched = self.store.update_fields(id, fields).await?;
        Ok(matched == 1)
    }

    /// Delete a property outright
    pub async fn remove(&self, property_id: &str) -> Result<bool> {
        let id = parse_property_id(property_id)?;
        let deleted = self.store.delete_by_id(id).await?;
        if deleted == 1 {
            info!(property = %id, "Property deleted");
        }
        Ok(deleted == 1)
    }
}
