//! Checklist orchestration
//!
//! Loads the owning property, applies one tree mutation in memory, and
//! persists the entire `checklist` field back in a single `$set`. The
//! document write is the atomicity boundary: there is no
//! optimistic-concurrency check, so two concurrent writers to the same
//! property race and the last full-field write wins.

use std::sync::Arc;

use bson::{doc, oid::ObjectId, DateTime};
use tracing::info;

use crate::checklist::{mutate, ChecklistNode, NodeChanges, NodePath};
use crate::db::schemas::PropertyDoc;
use crate::db::store::{parse_property_id, PropertyStore};
use crate::types::{HomesteadError, Result};

/// Service for checklist tree operations on a property
#[derive(Clone)]
pub struct ChecklistService {
    store: Arc<dyn PropertyStore>,
}

impl ChecklistService {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }

    /// Identity read of the stored root list
    pub async fn get(&self, property_id: &str) -> Result<Vec<ChecklistNode>> {
        let (_, property) = self.load(property_id).await?;
        Ok(property.checklist)
    }

    /// Create a node and append it under `parent_path` (root when empty)
    pub async fn add(
        &self,
        property_id: &str,
        parent_path: &NodePath,
        title: String,
        kind: &str,
    ) -> Result<ChecklistNode> {
        let (id, mut property) = self.load(property_id).await?;
        let node = ChecklistNode::new(title, kind);
        let created = mutate::insert(&mut property.checklist, parent_path.indices(), node)?;
        self.persist(id, &property.checklist).await?;
        info!(property = %id, node = %created.id, kind = created.kind_str(), "Checklist node added");
        Ok(created)
    }

    /// Apply field changes to the node at `path`
    pub async fn update(
        &self,
        property_id: &str,
        path: &NodePath,
        changes: NodeChanges,
    ) -> Result<ChecklistNode> {
        let (id, mut property) = self.load(property_id).await?;
        let updated = mutate::update(&mut property.checklist, path.indices(), changes)?;
        self.persist(id, &property.checklist).await?;
        info!(property = %id, node = %updated.id, "Checklist node updated");
        Ok(updated)
    }

    /// Remove the node at `path`, discarding its subtree
    pub async fn remove(&self, property_id: &str, path: &NodePath) -> Result<ChecklistNode> {
        let (id, mut property) = self.load(property_id).await?;
        let removed = mutate::delete(&mut property.checklist, path.indices())?;
        self.persist(id, &property.checklist).await?;
        info!(property = %id, node = %removed.id, "Checklist node removed");
        Ok(removed)
    }

    async fn load(&self, property_id: &str) -> Result<(ObjectId, PropertyDoc)> {
        let id = parse_property_id(property_id)?;
        let property = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| HomesteadError::PropertyNotFound(property_id.to_string()))?;
        Ok((id, property))
    }

    /// Full-field replace of the checklist tree
    async fn persist(&self, id: ObjectId, checklist: &[ChecklistNode]) -> Result<()> {
        let tree = bson::to_bson(checklist)
            .map_err(|e| HomesteadError::Database(format!("Failed to encode checklist: {}", e)))?;
        self.store
            .update_fields(
                id,
                doc! { "checklist": tree, "metadata.updated_at": DateTime::now() },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::KindTag;
    use crate::db::store::memory::MemoryPropertyStore;

    async fn service_with_property() -> (ChecklistService, String) {
        let store = Arc::new(MemoryPropertyStore::new());
        let id = store
            .insert(PropertyDoc::new("Lakeside Cabin".to_string(), None))
            .await
            .unwrap();
        (ChecklistService::new(store), id.to_hex())
    }

    #[tokio::test]
    async fn test_get_empty_checklist() {
        let (service, id) = service_with_property().await;
        assert!(service.get(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_then_get_round_trip() {
        let (service, id) = service_with_property().await;
        let created = service
            .add(&id, &NodePath::default(), "Inspect roof".to_string(), "folder")
            .await
            .unwrap();

        let tree = service.get(&id).await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0], created);
    }

    #[tokio::test]
    async fn test_scenario_end_to_end() {
        let (service, id) = service_with_property().await;

        service
            .add(&id, &NodePath::default(), "Inspect roof".to_string(), "folder")
            .await
            .unwrap();
        service
            .add(
                &id,
                &NodePath::new(vec![0]),
                "Check shingles".to_string(),
                "item",
            )
            .await
            .unwrap();

        let tree = service.get(&id).await.unwrap();
        let children = tree[0].children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].title, "Check shingles");

        let removed = service.remove(&id, &NodePath::new(vec![0, 0])).await.unwrap();
        assert_eq!(removed.title, "Check shingles");
        assert_eq!(service.get(&id).await.unwrap()[0].children(), Some(&[][..]));

        service
            .update(
                &id,
                &NodePath::new(vec![0]),
                NodeChanges {
                    title: None,
                    kind: Some(KindTag::Item),
                },
            )
            .await
            .unwrap();
        let tree = service.get(&id).await.unwrap();
        assert!(tree[0].children().is_none());
    }

    #[tokio::test]
    async fn test_update_out_of_range() {
        let (service, id) = service_with_property().await;
        service
            .add(&id, &NodePath::default(), "a".to_string(), "item")
            .await
            .unwrap();
        service
            .add(&id, &NodePath::default(), "b".to_string(), "item")
            .await
            .unwrap();

        let err = service
            .update(&id, &NodePath::new(vec![5]), NodeChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HomesteadError::OutOfRange { index: 5, len: 2 }
        ));
    }

    #[tokio::test]
    async fn test_malformed_id_rejected_before_lookup() {
        let store = Arc::new(MemoryPropertyStore::new());
        let service = ChecklistService::new(store);
        assert!(matches!(
            service.get("not-hex").await,
            Err(HomesteadError::InvalidIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_property_not_found() {
        let store = Arc::new(MemoryPropertyStore::new());
        let service = ChecklistService::new(store);
        let missing = ObjectId::new().to_hex();
        assert!(matches!(
            service.get(&missing).await,
            Err(HomesteadError::PropertyNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_mutation_persists_nothing() {
        let (service, id) = service_with_property().await;
        service
            .add(&id, &NodePath::default(), "a".to_string(), "item")
            .await
            .unwrap();

        let err = service
            .add(&id, &NodePath::new(vec![9]), "orphan".to_string(), "item")
            .await
            .unwrap_err();
        assert!(matches!(err, HomesteadError::OutOfRange { .. }));

        let tree = service.get(&id).await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].title, "a");
    }

    /// Known limitation, not a guarantee: two read-modify-write cycles that
    /// both read before either writes end with only the last writer's edit.
    #[tokio::test]
    async fn test_concurrent_edits_last_writer_wins() {
        let store = Arc::new(MemoryPropertyStore::new());
        let id = store
            .insert(PropertyDoc::new("Shared".to_string(), None))
            .await
            .unwrap();

        let mut tree_a = store.find_by_id(id).await.unwrap().unwrap().checklist;
        let mut tree_b = store.find_by_id(id).await.unwrap().unwrap().checklist;

        mutate::insert(&mut tree_a, &[], ChecklistNode::new("from A", "item")).unwrap();
        mutate::insert(&mut tree_b, &[], ChecklistNode::new("from B", "item")).unwrap();

        for tree in [&tree_a, &tree_b] {
            store
                .update_fields(id, doc! { "checklist": bson::to_bson(tree).unwrap() })
                .await
                .unwrap();
        }

        let survived = store.find_by_id(id).await.unwrap().unwrap().checklist;
        assert_eq!(survived.len(), 1);
        assert_eq!(survived[0].title, "from B");
    }
}
