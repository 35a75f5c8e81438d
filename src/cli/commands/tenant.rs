use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::models::TenantDetails;

#[derive(Subcommand)]
pub enum TenantCommands {
    #[command(about = "Register a new tenant")]
    Register {
        #[arg(long, help = "Company name")]
        company: String,
        #[arg(long, help = "Tenant id (generated when omitted)")]
        tenant_id: Option<String>,
        #[arg(long, help = "Contact email")]
        email: Option<String>,
        #[arg(long, help = "Subscription plan")]
        plan: Option<String>,
    },
}

pub async fn handle(cmd: TenantCommands, server: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TenantCommands::Register { company, tenant_id, email, plan } => {
            let client = ApiClient::new(server, "", None);
            let details = TenantDetails {
                tenant_id,
                company_name: company,
                tenant_email: email,
                plan,
            };
            let result = client.register(&details).await?;
            output_success(&output_format, &result, Some(json!({ "result": result })))
        }
    }
}
