use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use crate::database::backend::StoreError;
use crate::database::models::Artifact;
use crate::database::tenant_store::TenantStoreFactory;
use crate::types::{ReadConsistency, TenantId};

/// Outcome of a data access operation that did not produce a value
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {id}")]
    NotFound { id: String },

    #[error("Store error for tenant {tenant}: {source}")]
    Store {
        tenant: TenantId,
        #[source]
        source: StoreError,
    },
}

/// Per-tenant data access for artifacts. Every call resolves the tenant's own
/// store, so no query can reach another tenant's records.
pub struct ArtifactRepository {
    stores: Arc<dyn TenantStoreFactory>,
    page_size: usize,
}

impl ArtifactRepository {
    pub fn new(stores: Arc<dyn TenantStoreFactory>, page_size: usize) -> Self {
        Self {
            stores,
            page_size: page_size.max(1),
        }
    }

    /// Full scan of the tenant's table, every page drained. No ordering guarantee.
    pub async fn get_artifacts(&self, tenant: &TenantId) -> Result<Vec<Artifact>, ArtifactError> {
        let store = self.stores.for_tenant(tenant).await;
        let mut artifacts = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = match store.scan_page(cursor.as_deref(), self.page_size).await {
                Ok(page) => page,
                Err(StoreError::TableNotFound(table)) => {
                    warn!("TenantId: {} - Get Artifacts found no table {}", tenant, table);
                    return Ok(Vec::new());
                }
                Err(e) => return Err(Self::failed(tenant, "Get Artifacts", e)),
            };

            for item in page.items {
                let artifact = serde_json::from_value(item)
                    .map_err(|e| Self::failed(tenant, "Get Artifacts", e.into()))?;
                artifacts.push(artifact);
            }

            match page.last_key {
                Some(key) => cursor = Some(key),
                None => break,
            }
        }

        Ok(artifacts)
    }

    /// Strongly consistent point lookup
    pub async fn get_artifact_by_id(
        &self,
        artifact_id: &str,
        tenant: &TenantId,
    ) -> Result<Option<Artifact>, ArtifactError> {
        let store = self.stores.for_tenant(tenant).await;

        let item = match store.get(artifact_id, ReadConsistency::Strong).await {
            Ok(item) => item,
            Err(StoreError::TableNotFound(_)) => None,
            Err(e) => return Err(Self::failed(tenant, "Get Artifact By Id", e)),
        };

        item.map(serde_json::from_value)
            .transpose()
            .map_err(|e| Self::failed(tenant, "Get Artifact By Id", e.into()))
    }

    /// Unconditional upsert keyed by id; an artifact without an id gets a fresh one.
    /// Returns the artifact as stored, only once the write is acknowledged.
    pub async fn save(&self, mut artifact: Artifact, tenant: &TenantId) -> Result<Artifact, ArtifactError> {
        if artifact.id.is_empty() {
            artifact.id = Uuid::new_v4().to_string();
        }

        let item = serde_json::to_value(&artifact)
            .map_err(|e| Self::failed(tenant, "Save Artifact", e.into()))?;

        let store = self.stores.for_tenant(tenant).await;
        store
            .put(&artifact.id, item)
            .await
            .map_err(|e| Self::failed(tenant, "Save Artifact", e))?;

        Ok(artifact)
    }

    /// Unconditional delete by key; deleting an absent artifact succeeds
    pub async fn delete(&self, artifact: &Artifact, tenant: &TenantId) -> Result<(), ArtifactError> {
        let store = self.stores.for_tenant(tenant).await;

        match store.delete(&artifact.id).await {
            Ok(()) | Err(StoreError::TableNotFound(_)) => Ok(()),
            Err(e) => Err(Self::failed(tenant, "Delete Artifact", e)),
        }
    }

    fn failed(tenant: &TenantId, operation: &str, source: StoreError) -> ArtifactError {
        error!("TenantId: {} - {} failed: {}", tenant, operation, source);
        ArtifactError::Store {
            tenant: tenant.clone(),
            source,
        }
    }
}
