use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::database::backend::StoreError;
use crate::database::models::{TenantDetails, TenantRegistration};
use crate::database::tenant_store::TenantStoreFactory;
use crate::types::TenantId;

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Invalid tenant: {0}")]
    InvalidName(String),
    #[error("Tenant already exists: {0}")]
    AlreadyExists(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Onboards tenants by provisioning their isolated storage
pub struct TenantRegistrationService {
    stores: Arc<dyn TenantStoreFactory>,
}

impl TenantRegistrationService {
    pub fn new(stores: Arc<dyn TenantStoreFactory>) -> Self {
        Self { stores }
    }

    pub async fn register(&self, details: TenantDetails) -> Result<TenantRegistration, RegistrationError> {
        self.validate_company_name(&details.company_name)?;

        let tenant_id = match details.tenant_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().simple().to_string(),
        };
        self.validate_tenant_id(&tenant_id)?;

        let tenant = TenantId::new(tenant_id);
        let table = match self.stores.provision(&tenant).await {
            Ok(table) => table,
            Err(StoreError::TableExists(_)) => {
                return Err(RegistrationError::AlreadyExists(tenant.to_string()))
            }
            Err(e) => {
                error!("TenantId: {} - Register Tenant failed: {}", tenant, e);
                return Err(e.into());
            }
        };

        info!(
            "Registered tenant {} for '{}' (plan: {})",
            tenant,
            details.company_name,
            details.plan.as_deref().unwrap_or("default")
        );

        Ok(TenantRegistration {
            tenant_id: tenant.to_string(),
            table,
        })
    }

    fn validate_company_name(&self, name: &str) -> Result<(), RegistrationError> {
        if name.trim().is_empty() {
            return Err(RegistrationError::InvalidName("Company name is required".to_string()));
        }
        if name.chars().count() > 100 {
            return Err(RegistrationError::InvalidName(
                "Company name must be less than 100 characters".to_string(),
            ));
        }
        Ok(())
    }

    /// Tenant ids end up inside table names, so keep them short and plain
    fn validate_tenant_id(&self, id: &str) -> Result<(), RegistrationError> {
        if id.len() < 2 || id.len() > 48 {
            return Err(RegistrationError::InvalidName(
                "Tenant id must be between 2 and 48 characters".to_string(),
            ));
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(RegistrationError::InvalidName(
                "Tenant id can only contain letters, numbers, hyphens, and underscores".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryBackend;
    use crate::database::tenant_store::{TableResolver, TableStoreFactory};

    fn service() -> TenantRegistrationService {
        TenantRegistrationService::new(Arc::new(TableStoreFactory::new(
            TableResolver::new("Artifact-"),
            Arc::new(MemoryBackend::new()),
        )))
    }

    fn details(company: &str, tenant_id: Option<&str>) -> TenantDetails {
        TenantDetails {
            tenant_id: tenant_id.map(String::from),
            company_name: company.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn registers_requested_tenant_id() {
        let registration = service().register(details("Acme Corp", Some("acme"))).await.unwrap();
        assert_eq!(registration.tenant_id, "acme");
        assert_eq!(registration.table, "Artifact-acme");
    }

    #[tokio::test]
    async fn generates_tenant_id_when_absent() {
        let registration = service().register(details("Acme Corp", None)).await.unwrap();
        assert_eq!(registration.tenant_id.len(), 32);
        assert_eq!(registration.table, format!("Artifact-{}", registration.tenant_id));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let service = service();
        service.register(details("Acme", Some("acme"))).await.unwrap();
        let err = service.register(details("Acme again", Some("acme"))).await.unwrap_err();
        assert!(matches!(err, RegistrationError::AlreadyExists(id) if id == "acme"));
    }

    #[tokio::test]
    async fn rejects_bad_names() {
        let service = service();
        assert!(matches!(
            service.register(details("  ", Some("acme"))).await,
            Err(RegistrationError::InvalidName(_))
        ));
        assert!(matches!(
            service.register(details("Acme", Some("acme; drop"))).await,
            Err(RegistrationError::InvalidName(_))
        ));
        assert!(matches!(
            service.register(details("Acme", Some("a"))).await,
            Err(RegistrationError::InvalidName(_))
        ));
    }
}
