use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::types::ReadConsistency;

/// Errors from a storage engine client
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table already exists: {0}")]
    TableExists(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// One page of a table scan. `last_key` is set when more items may follow.
#[derive(Debug, Default, Clone)]
pub struct ScanPage {
    pub items: Vec<Value>,
    pub last_key: Option<String>,
}

/// Key/document storage engine addressed by table name
#[async_trait]
pub trait StoreBackend: Send + Sync + 'static {
    /// Items with keys after `start_after`, at most `limit` of them
    async fn scan(
        &self,
        table: &str,
        start_after: Option<&str>,
        limit: usize,
    ) -> Result<ScanPage, StoreError>;

    async fn get(
        &self,
        table: &str,
        key: &str,
        consistency: ReadConsistency,
    ) -> Result<Option<Value>, StoreError>;

    /// Unconditional insert-or-replace
    async fn put(&self, table: &str, key: &str, item: Value) -> Result<(), StoreError>;

    /// Unconditional delete; an absent key is not an error
    async fn delete(&self, table: &str, key: &str) -> Result<(), StoreError>;

    async fn create_table(&self, table: &str) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
