#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tenant_artifact_api::auth::{generate_jwt, Claims};
use tenant_artifact_api::config::AppConfig;
use tenant_artifact_api::database::{MemoryBackend, ScanPage, StoreBackend, StoreError};
use tenant_artifact_api::types::ReadConsistency;
use tenant_artifact_api::{app, AppState};

pub const JWT_SECRET: &str = "integration-test-secret";

/// Memory backend that counts every data operation it serves
#[derive(Default)]
pub struct CountingBackend {
    inner: MemoryBackend,
    calls: AtomicUsize,
    reads: Mutex<Vec<ReadConsistency>>,
}

impl CountingBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Consistency requested by each point lookup, in order
    pub fn read_consistency(&self) -> Vec<ReadConsistency> {
        self.reads.lock().expect("reads lock").clone()
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl StoreBackend for CountingBackend {
    async fn scan(&self, table: &str, start_after: Option<&str>, limit: usize) -> Result<ScanPage, StoreError> {
        self.hit();
        self.inner.scan(table, start_after, limit).await
    }

    async fn get(&self, table: &str, key: &str, consistency: ReadConsistency) -> Result<Option<Value>, StoreError> {
        self.hit();
        self.reads.lock().expect("reads lock").push(consistency);
        self.inner.get(table, key, consistency).await
    }

    async fn put(&self, table: &str, key: &str, item: Value) -> Result<(), StoreError> {
        self.hit();
        self.inner.put(table, key, item).await
    }

    async fn delete(&self, table: &str, key: &str) -> Result<(), StoreError> {
        self.hit();
        self.inner.delete(table, key).await
    }

    async fn create_table(&self, table: &str) -> Result<(), StoreError> {
        self.inner.create_table(table).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

pub struct TestServer {
    pub base_url: String,
    pub backend: Arc<CountingBackend>,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the app in-process on a free port
    pub async fn spawn(legacy_null_responses: bool) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.security.jwt_secret = JWT_SECRET.to_string();
        config.store.scan_page_size = 2;
        config.api.port = port;
        config.api.legacy_null_responses = legacy_null_responses;

        let backend = Arc::new(CountingBackend::default());
        let state = AppState::new(config, backend.clone());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        tokio::spawn(async move {
            axum::serve(listener, app(state)).await.expect("server");
        });

        let server = Self {
            base_url,
            backend,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(format!("{}/amIUp", self.base_url)).send().await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn artifact_url(&self, rest: &str) -> String {
        format!("{}/acme-corp/artifact/api/{}", self.base_url, rest)
    }

    /// Register a tenant through the public endpoint
    pub async fn register(&self, tenant_id: &str) -> Result<()> {
        let res = self
            .client
            .post(self.url("/register"))
            .json(&serde_json::json!({ "tenantId": tenant_id, "companyName": "Test Co" }))
            .send()
            .await?;
        anyhow::ensure!(res.status().is_success(), "registration failed: {}", res.status());
        Ok(())
    }
}

pub fn token_for(tenant: &str) -> String {
    let claims = Claims::new("tester", tenant, 1).expect("claims");
    generate_jwt(&claims, JWT_SECRET).expect("token")
}
