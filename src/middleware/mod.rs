pub mod auth;
pub mod legacy;

pub use auth::TenantContext;
pub use legacy::legacy_null_responses;
