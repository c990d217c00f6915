//! Data-model contract consumed by blueprint actions, plus an in-memory
//! implementation for demos and tests.

use crate::error::ActionError;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::RwLock;

/// Data-access capability behind a resource. Every operation resolves
/// asynchronously; failures surface as `ActionError`s through the generic
/// error responder.
#[async_trait]
pub trait DataModel: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Value>, ActionError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Value>, ActionError>;

    async fn create(&self, attrs: Map<String, Value>) -> Result<Value, ActionError>;

    /// Upsert semantics for PUT: `Some(entity)` when the record was created,
    /// `None` when an existing record was updated in place.
    async fn update_by_id(
        &self,
        id: &str,
        attrs: Map<String, Value>,
    ) -> Result<Option<Value>, ActionError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), ActionError>;
}

/// In-process `DataModel` keyed by generated UUID ids, listing in insertion
/// order. Backs the example consumer and the integration tests.
#[derive(Default)]
pub struct MemoryModel {
    inner: RwLock<MemoryRows>,
}

#[derive(Default)]
struct MemoryRows {
    order: Vec<String>,
    rows: HashMap<String, Value>,
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> ActionError {
        ActionError::internal("memory model lock poisoned")
    }

    fn stamp(attrs: &mut Map<String, Value>, id: &str, created: bool) {
        let now = Value::String(Utc::now().to_rfc3339());
        attrs.insert("id".into(), Value::String(id.to_string()));
        if created {
            attrs.insert("createdAt".into(), now.clone());
        }
        attrs.insert("updatedAt".into(), now);
    }
}

#[async_trait]
impl DataModel for MemoryModel {
    async fn find_all(&self) -> Result<Vec<Value>, ActionError> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.rows.get(id).cloned())
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Value>, ActionError> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        Ok(inner.rows.get(id).cloned())
    }

    async fn create(&self, mut attrs: Map<String, Value>) -> Result<Value, ActionError> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        let id = uuid::Uuid::new_v4().to_string();
        Self::stamp(&mut attrs, &id, true);
        let row = Value::Object(attrs);
        inner.order.push(id.clone());
        inner.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update_by_id(
        &self,
        id: &str,
        mut attrs: Map<String, Value>,
    ) -> Result<Option<Value>, ActionError> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        match inner.rows.get_mut(id) {
            Some(Value::Object(existing)) => {
                Self::stamp(&mut attrs, id, false);
                for (k, v) in attrs {
                    existing.insert(k, v);
                }
                Ok(None)
            }
            _ => {
                Self::stamp(&mut attrs, id, true);
                let row = Value::Object(attrs);
                inner.order.push(id.to_string());
                inner.rows.insert(id.to_string(), row.clone());
                Ok(Some(row))
            }
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), ActionError> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        inner.rows.remove(id);
        inner.order.retain(|existing| existing != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn create_then_find_round_trip() {
        let model = MemoryModel::new();
        let row = model.create(attrs(json!({"name": "anvil"}))).await.unwrap();
        let id = row["id"].as_str().unwrap().to_string();
        assert_eq!(row["name"], "anvil");
        assert!(row["createdAt"].is_string());

        let found = model.find_by_id(&id).await.unwrap();
        assert_eq!(found, Some(row));
        assert_eq!(model.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_in_place_returns_none_and_merges() {
        let model = MemoryModel::new();
        let row = model.create(attrs(json!({"name": "anvil"}))).await.unwrap();
        let id = row["id"].as_str().unwrap().to_string();

        let created = model
            .update_by_id(&id, attrs(json!({"price": 10})))
            .await
            .unwrap();
        assert!(created.is_none());
        let found = model.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found["name"], "anvil");
        assert_eq!(found["price"], 10);
    }

    #[tokio::test]
    async fn update_of_unknown_id_creates_the_record() {
        let model = MemoryModel::new();
        let created = model
            .update_by_id("fixed-id", attrs(json!({"name": "hammer"})))
            .await
            .unwrap();
        assert_eq!(created.unwrap()["id"], "fixed-id");
        assert!(model.find_by_id("fixed-id").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let model = MemoryModel::new();
        let row = model.create(attrs(json!({"name": "anvil"}))).await.unwrap();
        let id = row["id"].as_str().unwrap().to_string();
        model.delete_by_id(&id).await.unwrap();
        model.delete_by_id(&id).await.unwrap();
        assert!(model.find_by_id(&id).await.unwrap().is_none());
        assert!(model.find_all().await.unwrap().is_empty());
    }
}
