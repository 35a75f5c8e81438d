// handlers/artifact - Artifact service endpoints
//
// Every data route is scoped to the tenant carried by the bearer token.
// The leading `:company` segment only distinguishes deployments.

pub mod delete;
pub mod get;
pub mod health;
pub mod list;
pub mod save;

pub use delete::artifact_delete;
pub use get::artifact_get;
pub use health::artifact_health;
pub use list::artifacts_list;
pub use save::artifact_save;
