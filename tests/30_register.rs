mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::TestServer;

#[tokio::test]
async fn register_then_conflict() -> Result<()> {
    let server = TestServer::spawn(false).await?;

    let res = server
        .client
        .post(server.url("/register"))
        .json(&json!({ "tenantId": "acme", "companyName": "Acme Corp", "plan": "basic" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "Tenant acme registered successfully");

    let res = server
        .client
        .post(server.url("/register"))
        .json(&json!({ "tenantId": "acme", "companyName": "Acme Corp" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn register_rejects_blank_company() -> Result<()> {
    let server = TestServer::spawn(false).await?;

    let res = server
        .client
        .post(server.url("/register"))
        .json(&json!({ "companyName": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
