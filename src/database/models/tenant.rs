use serde::{Deserialize, Serialize};

/// Onboarding request for a new tenant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDetails {
    /// Chosen by the caller, or generated during registration
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub company_name: String,
    #[serde(default)]
    pub tenant_email: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
}

/// Outcome of a successful registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRegistration {
    pub tenant_id: String,
    pub table: String,
}
