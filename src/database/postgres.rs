use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use std::time::Duration;
use tracing::info;

use super::backend::{ScanPage, StoreBackend, StoreError};
use crate::config::StoreConfig;
use crate::types::ReadConsistency;

/// Postgres silently truncates longer identifiers, which could fold two tenants into one table
const MAX_IDENTIFIER_BYTES: usize = 63;

/// Storage engine backed by one Postgres table per tenant:
/// `(id TEXT PRIMARY KEY, data JSONB NOT NULL)`.
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let url = config
            .database_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool ({} max connections)", config.max_connections);
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    /// Quote SQL identifier to prevent injection
    fn quote_identifier(name: &str) -> Result<String, StoreError> {
        if name.is_empty() || name.len() > MAX_IDENTIFIER_BYTES || name.contains('\0') {
            return Err(StoreError::InvalidTable(name.to_string()));
        }
        Ok(format!("\"{}\"", name.replace('"', "\"\"")))
    }

    fn map_error(table: &str, err: sqlx::Error) -> StoreError {
        if let sqlx::Error::Database(db) = &err {
            match db.code().as_deref() {
                Some("42P01") => return StoreError::TableNotFound(table.to_string()),
                Some("42P07") => return StoreError::TableExists(table.to_string()),
                _ => {}
            }
        }
        StoreError::Sqlx(err)
    }
}

#[async_trait]
impl StoreBackend for PostgresBackend {
    async fn scan(
        &self,
        table: &str,
        start_after: Option<&str>,
        limit: usize,
    ) -> Result<ScanPage, StoreError> {
        let sql = format!(
            "SELECT id, data FROM {} WHERE ($1::text IS NULL OR id > $1) ORDER BY id LIMIT $2",
            Self::quote_identifier(table)?
        );

        let rows = sqlx::query(&sql)
            .bind(start_after)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::map_error(table, e))?;

        let mut page = ScanPage::default();
        let mut last = None;
        for row in rows {
            let id: String = row.try_get("id")?;
            let data: Value = row.try_get("data")?;
            page.items.push(data);
            last = Some(id);
        }

        if page.items.len() == limit {
            page.last_key = last;
        }
        Ok(page)
    }

    async fn get(
        &self,
        table: &str,
        key: &str,
        _consistency: ReadConsistency,
    ) -> Result<Option<Value>, StoreError> {
        // Reads go to the primary through this pool, so every read is strongly consistent
        let sql = format!("SELECT data FROM {} WHERE id = $1", Self::quote_identifier(table)?);

        let row = sqlx::query(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::map_error(table, e))?;

        match row {
            Some(row) => Ok(Some(row.try_get::<Value, _>("data")?)),
            None => Ok(None),
        }
    }

    async fn put(&self, table: &str, key: &str, item: Value) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {} (id, data) VALUES ($1, $2) ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data",
            Self::quote_identifier(table)?
        );

        sqlx::query(&sql)
            .bind(key)
            .bind(sqlx::types::Json(item))
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_error(table, e))?;
        Ok(())
    }

    async fn delete(&self, table: &str, key: &str) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", Self::quote_identifier(table)?);

        sqlx::query(&sql)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_error(table, e))?;
        Ok(())
    }

    async fn create_table(&self, table: &str) -> Result<(), StoreError> {
        let sql = format!(
            "CREATE TABLE {} (id TEXT PRIMARY KEY, data JSONB NOT NULL)",
            Self::quote_identifier(table)?
        );

        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_error(table, e))?;

        info!("Created tenant table: {}", table);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
