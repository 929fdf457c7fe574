//! Property persistence
//!
//! `PropertyStore` is the storage contract the services depend on:
//! single-document reads and writes by primary key, with `update_fields`
//! as a `$set` of the given field map. `MongoPropertyStore` implements it
//! over the typed collection wrapper; tests substitute an in-memory
//! implementation.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};

use crate::db::mongo::{MongoClient, MongoCollection};
use crate::db::schemas::{PropertyDoc, PROPERTY_COLLECTION};
use crate::types::{HomesteadError, Result};

/// Storage contract for property documents
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Insert a new property, returning its store-assigned id
    async fn insert(&self, property: PropertyDoc) -> Result<ObjectId>;

    /// Fetch a property by primary key
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<PropertyDoc>>;

    /// `$set` the given fields on a property, returning the matched count
    async fn update_fields(&self, id: ObjectId, fields: Document) -> Result<u64>;

    /// Delete a property by primary key, returning the deleted count
    async fn delete_by_id(&self, id: ObjectId) -> Result<u64>;

    /// All properties in the collection
    async fn list_all(&self) -> Result<Vec<PropertyDoc>>;
}

/// Parse an external property id string into a store key
pub fn parse_property_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| HomesteadError::InvalidIdentifier(id.to_string()))
}

/// MongoDB-backed property store
pub struct MongoPropertyStore {
    collection: MongoCollection<PropertyDoc>,
}

impl MongoPropertyStore {
    pub async fn new(client: &MongoClient) -> Result<Self> {
        Ok(Self {
            collection: client.collection::<PropertyDoc>(PROPERTY_COLLECTION).await?,
        })
    }
}

#[async_trait]
impl PropertyStore for MongoPropertyStore {
    async fn insert(&self, property: PropertyDoc) -> Result<ObjectId> {
        self.collection.insert_one(property).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<PropertyDoc>> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    async fn update_fields(&self, id: ObjectId, fields: Document) -> Result<u64> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    async fn list_all(&self) -> Result<Vec<PropertyDoc>> {
        self.collection.find_many(doc! {}).await
    }
}

/// In-memory store for service-level tests
///
/// Interprets the same field maps the services write, so the full
/// serialize-through-BSON path is exercised without a running MongoDB.
#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryPropertyStore {
        docs: Mutex<HashMap<ObjectId, PropertyDoc>>,
    }

    impl MemoryPropertyStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl PropertyStore for MemoryPropertyStore {
        async fn insert(&self, mut property: PropertyDoc) -> Result<ObjectId> {
            let id = ObjectId::new();
            property._id = Some(id);
            property.metadata = crate::db::schemas::Metadata::new();
            self.docs.lock().unwrap().insert(id, property);
            Ok(id)
        }

        async fn find_by_id(&self, id: ObjectId) -> Result<Option<PropertyDoc>> {
            Ok(self.docs.lock().unwrap().get(&id).cloned())
        }

        async fn update_fields(&self, id: ObjectId, fields: Document) -> Result<u64> {
            let mut docs = self.docs.lock().unwrap();
            let Some(property) = docs.get_mut(&id) else {
                return Ok(0);
            };
            for (key, value) in fields {
                match key.as_str() {
                    "name" => {
                        property.name = value.as_str().unwrap_or_default().to_string();
                    }
                    "photo_url" => {
                        property.photo_url = value.as_str().map(str::to_string);
                    }
                    "checklist" => {
                        property.checklist = bson::from_bson(value).map_err(|e| {
                            HomesteadError::Database(format!("Bad checklist field: {}", e))
                        })?;
                    }
                    "metadata.updated_at" => {
                        property.metadata.updated_at = value.as_datetime().copied();
                    }
                    other => {
                        return Err(HomesteadError::Database(format!(
                            "Unexpected field in update: {}",
                            other
                        )));
                    }
                }
            }
            Ok(1)
        }

        async fn delete_by_id(&self, id: ObjectId) -> Result<u64> {
            Ok(self.docs.lock().unwrap().remove(&id).map_or(0, |_| 1))
        }

        async fn list_all(&self) -> Result<Vec<PropertyDoc>> {
            Ok(self.docs.lock().unwrap().values().cloned().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_id_valid_hex() {
        let id = ObjectId::new();
        assert_eq!(parse_property_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn test_parse_property_id_rejects_garbage() {
        assert!(matches!(
            parse_property_id("not-an-object-id"),
            Err(HomesteadError::InvalidIdentifier(_))
        ));
    }
}
