pub mod backend;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod tenant_store;

pub use backend::{ScanPage, StoreBackend, StoreError};
pub use memory::MemoryBackend;
pub use postgres::PostgresBackend;
pub use repository::{ArtifactError, ArtifactRepository};
pub use tenant_store::{TableResolver, TableStoreFactory, TenantStore, TenantStoreFactory};
