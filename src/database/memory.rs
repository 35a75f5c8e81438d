use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use tokio::sync::RwLock;

use super::backend::{ScanPage, StoreBackend, StoreError};
use crate::types::ReadConsistency;

/// In-process storage engine. Every read observes the latest write.
#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn scan(
        &self,
        table: &str,
        start_after: Option<&str>,
        limit: usize,
    ) -> Result<ScanPage, StoreError> {
        let tables = self.tables.read().await;
        let rows = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;

        let lower = match start_after {
            Some(key) => Bound::Excluded(key.to_string()),
            None => Bound::Unbounded,
        };

        let mut page = ScanPage::default();
        let mut last = None;
        for (key, item) in rows.range((lower, Bound::Unbounded)).take(limit) {
            page.items.push(item.clone());
            last = Some(key.clone());
        }

        if page.items.len() == limit {
            page.last_key = last;
        }
        Ok(page)
    }

    async fn get(
        &self,
        table: &str,
        key: &str,
        _consistency: ReadConsistency,
    ) -> Result<Option<Value>, StoreError> {
        let tables = self.tables.read().await;
        let rows = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        Ok(rows.get(key).cloned())
    }

    async fn put(&self, table: &str, key: &str, item: Value) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        rows.insert(key.to_string(), item);
        Ok(())
    }

    async fn delete(&self, table: &str, key: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        rows.remove(key);
        Ok(())
    }

    async fn create_table(&self, table: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(table) {
            return Err(StoreError::TableExists(table.to_string()));
        }
        tables.insert(table.to_string(), BTreeMap::new());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn scan_pages_through_every_key() {
        let backend = MemoryBackend::new();
        backend.create_table("t").await.unwrap();
        for key in ["a", "b", "c", "d", "e"] {
            backend.put("t", key, json!({ "id": key })).await.unwrap();
        }

        let first = backend.scan("t", None, 2).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.last_key.as_deref(), Some("b"));

        let second = backend.scan("t", Some("b"), 2).await.unwrap();
        assert_eq!(second.last_key.as_deref(), Some("d"));

        let third = backend.scan("t", Some("d"), 2).await.unwrap();
        assert_eq!(third.items, vec![json!({ "id": "e" })]);
        assert!(third.last_key.is_none());
    }

    #[tokio::test]
    async fn missing_table_is_reported() {
        let backend = MemoryBackend::new();
        let err = backend.get("nope", "a", ReadConsistency::Strong).await.unwrap_err();
        assert!(matches!(err, StoreError::TableNotFound(t) if t == "nope"));

        let err = backend.put("nope", "a", json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::TableNotFound(_)));
    }

    #[tokio::test]
    async fn create_table_twice_conflicts() {
        let backend = MemoryBackend::new();
        backend.create_table("t").await.unwrap();
        let err = backend.create_table("t").await.unwrap_err();
        assert!(matches!(err, StoreError::TableExists(_)));
    }

    #[tokio::test]
    async fn delete_of_absent_key_succeeds() {
        let backend = MemoryBackend::new();
        backend.create_table("t").await.unwrap();
        backend.delete("t", "ghost").await.unwrap();
    }
}
