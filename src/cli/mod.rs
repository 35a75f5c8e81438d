pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "tenantctl")]
#[command(about = "tenantctl - tenant onboarding and artifact client for the tenant artifact API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "TENANTCTL_SERVER",
        default_value = "http://localhost:3000",
        help = "Base URL of the API server"
    )]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint a bearer token for a tenant")]
    Token {
        #[arg(long, help = "Tenant id carried by the token")]
        tenant: String,
        #[arg(long, default_value = "tenantctl", help = "Token subject")]
        subject: String,
        #[arg(long, help = "Hours until expiry [default: SECURITY_JWT_EXPIRY_HOURS or the environment's expiry]")]
        hours: Option<u64>,
        #[arg(long, env = "SECURITY_JWT_SECRET", hide_env_values = true, help = "Signing secret")]
        secret: String,
    },

    #[command(about = "Tenant onboarding")]
    Tenant {
        #[command(subcommand)]
        cmd: commands::tenant::TenantCommands,
    },

    #[command(about = "Artifact operations for the token's tenant")]
    Artifact {
        #[arg(long, global = true, env = "TENANTCTL_COMPANY", default_value = "default", help = "Company path segment")]
        company: String,
        #[arg(long, global = true, env = "TENANTCTL_TOKEN", hide_env_values = true, help = "Bearer token")]
        token: Option<String>,
        #[command(subcommand)]
        cmd: commands::artifact::ArtifactCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// An explicit `--hours` wins; otherwise tokens live as long as the server's configured expiry
fn token_expiry_hours(requested: Option<u64>, config: impl FnOnce() -> AppConfig) -> u64 {
    requested.unwrap_or_else(|| config().security.jwt_expiry_hours)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token { tenant, subject, hours, secret } => {
            let hours = token_expiry_hours(hours, AppConfig::from_env);
            commands::token::handle(&tenant, &subject, hours, &secret, output_format)
        }
        Commands::Tenant { cmd } => commands::tenant::handle(cmd, &cli.server, output_format).await,
        Commands::Artifact { company, token, cmd } => {
            let token = token.ok_or_else(|| anyhow::anyhow!("a bearer token is required (--token or TENANTCTL_TOKEN)"))?;
            let client = client::ApiClient::new(&cli.server, &company, Some(token));
            commands::artifact::handle(cmd, &client, output_format).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hours_default_to_configured_expiry() {
        let cli = Cli::parse_from(["tenantctl", "token", "--tenant", "acme", "--secret", "s"]);
        let Commands::Token { hours, .. } = cli.command else {
            panic!("expected token command");
        };
        assert_eq!(hours, None);

        let mut config = AppConfig::development();
        config.security.jwt_expiry_hours = 12;
        assert_eq!(token_expiry_hours(hours, || config.clone()), 12);
        assert_eq!(token_expiry_hours(Some(3), || config.clone()), 3);
    }
}
