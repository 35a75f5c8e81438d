use anyhow::{bail, Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::database::models::{Artifact, TenantDetails};

/// Thin HTTP client over the artifact and registration routes
pub struct ApiClient {
    http: Client,
    base_url: String,
    company: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, company: &str, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            company: company.to_string(),
            token,
        }
    }

    fn artifact_url(&self, rest: &str) -> String {
        format!("{}/{}/artifact/api/{}", self.base_url, self.company, rest)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn register(&self, details: &TenantDetails) -> Result<String> {
        let res = self
            .http
            .post(format!("{}/register", self.base_url))
            .json(details)
            .send()
            .await
            .context("register request failed")?;
        Ok(Self::ensure_success(res).await?.text().await?)
    }

    pub async fn list(&self) -> Result<Vec<Artifact>> {
        let res = self
            .authorized(self.http.get(self.artifact_url("artifacts")))
            .send()
            .await
            .context("list request failed")?;
        Ok(Self::ensure_success(res).await?.json().await?)
    }

    pub async fn get(&self, artifact_id: &str) -> Result<Option<Artifact>> {
        let res = self
            .authorized(self.http.get(self.artifact_url(&format!("artifact/{}", artifact_id))))
            .send()
            .await
            .context("get request failed")?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Self::ensure_success(res).await?.json().await?)
    }

    pub async fn save(&self, artifact: &Artifact) -> Result<Artifact> {
        let res = self
            .authorized(self.http.post(self.artifact_url("artifact")))
            .json(artifact)
            .send()
            .await
            .context("save request failed")?;
        Ok(Self::ensure_success(res).await?.json().await?)
    }

    pub async fn delete(&self, artifact_id: &str) -> Result<()> {
        let res = self
            .authorized(self.http.delete(self.artifact_url(&format!("artifact/{}", artifact_id))))
            .send()
            .await
            .context("delete request failed")?;
        Self::ensure_success(res).await?;
        Ok(())
    }

    async fn ensure_success(res: Response) -> Result<Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body: Value = res.json().await.unwrap_or(Value::Null);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();
        bail!("{} ({})", message, status)
    }
}
