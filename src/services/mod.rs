pub mod artifact_service;
pub mod tenant_service;

pub use artifact_service::{ArtifactService, ArtifactServiceImpl};
pub use tenant_service::{RegistrationError, TenantRegistrationService};
