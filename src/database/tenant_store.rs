use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::backend::{ScanPage, StoreBackend, StoreError};
use crate::types::{ReadConsistency, TenantId};

/// Maps a tenant to its physical table: fixed prefix followed by the tenant id.
/// No validation happens here; a malformed id fails later at the store.
#[derive(Debug, Clone)]
pub struct TableResolver {
    prefix: String,
}

impl TableResolver {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn resolve(&self, tenant: &TenantId) -> String {
        format!("{}{}", self.prefix, tenant.as_str())
    }
}

/// Storage handle bound to exactly one tenant's data
#[async_trait]
pub trait TenantStore: Send + Sync {
    fn table(&self) -> &str;

    async fn scan_page(
        &self,
        start_after: Option<&str>,
        limit: usize,
    ) -> Result<ScanPage, StoreError>;

    async fn get(
        &self,
        key: &str,
        consistency: ReadConsistency,
    ) -> Result<Option<Value>, StoreError>;

    async fn put(&self, key: &str, item: Value) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Produces tenant-bound stores; the isolation strategy lives behind this seam
#[async_trait]
pub trait TenantStoreFactory: Send + Sync {
    async fn for_tenant(&self, tenant: &TenantId) -> Arc<dyn TenantStore>;

    /// Create the tenant's storage, returning its table name
    async fn provision(&self, tenant: &TenantId) -> Result<String, StoreError>;
}

/// A store handle for one table of a shared backend
pub struct TableTenantStore {
    table: String,
    backend: Arc<dyn StoreBackend>,
}

#[async_trait]
impl TenantStore for TableTenantStore {
    fn table(&self) -> &str {
        &self.table
    }

    async fn scan_page(
        &self,
        start_after: Option<&str>,
        limit: usize,
    ) -> Result<ScanPage, StoreError> {
        self.backend.scan(&self.table, start_after, limit).await
    }

    async fn get(
        &self,
        key: &str,
        consistency: ReadConsistency,
    ) -> Result<Option<Value>, StoreError> {
        self.backend.get(&self.table, key, consistency).await
    }

    async fn put(&self, key: &str, item: Value) -> Result<(), StoreError> {
        self.backend.put(&self.table, key, item).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(&self.table, key).await
    }
}

/// Table-per-tenant isolation. Handles of provisioned tenants are cached; a
/// tenant without a table gets a fresh handle that is never retained. A cached
/// handle is never rebound to another table.
pub struct TableStoreFactory {
    resolver: TableResolver,
    backend: Arc<dyn StoreBackend>,
    handles: RwLock<HashMap<TenantId, Arc<dyn TenantStore>>>,
}

impl TableStoreFactory {
    pub fn new(resolver: TableResolver, backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            resolver,
            backend,
            handles: RwLock::new(HashMap::new()),
        }
    }

    fn bind(&self, tenant: &TenantId) -> Arc<dyn TenantStore> {
        Arc::new(TableTenantStore {
            table: self.resolver.resolve(tenant),
            backend: self.backend.clone(),
        })
    }
}

#[async_trait]
impl TenantStoreFactory for TableStoreFactory {
    async fn for_tenant(&self, tenant: &TenantId) -> Arc<dyn TenantStore> {
        if let Some(store) = self.handles.read().await.get(tenant) {
            return store.clone();
        }
        self.bind(tenant)
    }

    async fn provision(&self, tenant: &TenantId) -> Result<String, StoreError> {
        let store = self.bind(tenant);
        self.backend.create_table(store.table()).await?;

        let table = store.table().to_string();
        debug!("Bound tenant '{}' to table '{}'", tenant, table);
        self.handles.write().await.insert(tenant.clone(), store);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryBackend;
    use serde_json::json;

    #[test]
    fn resolves_prefix_plus_tenant() {
        let resolver = TableResolver::new("Artifact-");
        assert_eq!(resolver.resolve(&TenantId::from("acme")), "Artifact-acme");
        assert_eq!(resolver.resolve(&TenantId::from("")), "Artifact-");
    }

    #[tokio::test]
    async fn handles_are_bound_to_their_own_table() {
        let backend = Arc::new(MemoryBackend::new());
        let factory = TableStoreFactory::new(TableResolver::new("Artifact-"), backend);
        factory.provision(&"acme".into()).await.unwrap();
        factory.provision(&"globex".into()).await.unwrap();

        let acme = factory.for_tenant(&"acme".into()).await;
        let globex = factory.for_tenant(&"globex".into()).await;
        assert_eq!(acme.table(), "Artifact-acme");
        assert_eq!(globex.table(), "Artifact-globex");

        acme.put("a1", json!({ "id": "a1" })).await.unwrap();
        assert!(globex.get("a1", ReadConsistency::Strong).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn only_provisioned_handles_are_cached() {
        let factory = TableStoreFactory::new(
            TableResolver::new("Artifact-"),
            Arc::new(MemoryBackend::new()),
        );

        for i in 0..10 {
            let ghost = factory.for_tenant(&TenantId::new(format!("ghost{}", i))).await;
            assert_eq!(ghost.table(), format!("Artifact-ghost{}", i));
        }
        assert!(factory.handles.read().await.is_empty());

        factory.provision(&"acme".into()).await.unwrap();
        let first = factory.for_tenant(&"acme".into()).await;
        let second = factory.for_tenant(&"acme".into()).await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.handles.read().await.len(), 1);
    }
}
