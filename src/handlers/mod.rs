// handlers/mod.rs - HTTP controllers
//
// artifact: tenant-scoped artifact CRUD (bearer token required)
// tenant:   public tenant onboarding
// health:   platform health probe

pub mod artifact;
pub mod health;
pub mod tenant;

pub use health::health;
