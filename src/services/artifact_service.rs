use async_trait::async_trait;
use std::sync::Arc;

use crate::database::models::Artifact;
use crate::database::repository::{ArtifactError, ArtifactRepository};
use crate::types::TenantId;

/// Artifact operations as seen by the HTTP layer
#[async_trait]
pub trait ArtifactService: Send + Sync {
    async fn get_artifacts(&self, tenant: &TenantId) -> Result<Vec<Artifact>, ArtifactError>;

    async fn get_artifact_by_id(
        &self,
        artifact_id: &str,
        tenant: &TenantId,
    ) -> Result<Option<Artifact>, ArtifactError>;

    async fn save(&self, artifact: Artifact, tenant: &TenantId) -> Result<Artifact, ArtifactError>;

    async fn delete(&self, artifact: &Artifact, tenant: &TenantId) -> Result<(), ArtifactError>;
}

pub struct ArtifactServiceImpl {
    repository: Arc<ArtifactRepository>,
}

impl ArtifactServiceImpl {
    pub fn new(repository: Arc<ArtifactRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ArtifactService for ArtifactServiceImpl {
    async fn get_artifacts(&self, tenant: &TenantId) -> Result<Vec<Artifact>, ArtifactError> {
        self.repository.get_artifacts(tenant).await
    }

    async fn get_artifact_by_id(
        &self,
        artifact_id: &str,
        tenant: &TenantId,
    ) -> Result<Option<Artifact>, ArtifactError> {
        self.repository.get_artifact_by_id(artifact_id, tenant).await
    }

    async fn save(&self, artifact: Artifact, tenant: &TenantId) -> Result<Artifact, ArtifactError> {
        self.repository.save(artifact, tenant).await
    }

    async fn delete(&self, artifact: &Artifact, tenant: &TenantId) -> Result<(), ArtifactError> {
        self.repository.delete(artifact, tenant).await
    }
}
