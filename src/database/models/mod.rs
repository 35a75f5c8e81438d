pub mod artifact;
pub mod tenant;

pub use artifact::Artifact;
pub use tenant::{TenantDetails, TenantRegistration};
