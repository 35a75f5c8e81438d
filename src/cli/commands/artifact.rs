use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_artifacts, output_success};
use crate::cli::OutputFormat;
use crate::database::models::Artifact;

#[derive(Subcommand)]
pub enum ArtifactCommands {
    #[command(about = "List all artifacts")]
    List,

    #[command(about = "Show one artifact")]
    Get {
        #[arg(help = "Artifact id")]
        id: String,
    },

    #[command(about = "Create or replace an artifact from a JSON document")]
    Save {
        #[arg(help = "Artifact JSON, e.g. '{\"id\":\"a1\",\"name\":\"x\"}'")]
        json: String,
    },

    #[command(about = "Delete an artifact")]
    Delete {
        #[arg(help = "Artifact id")]
        id: String,
    },
}

pub async fn handle(cmd: ArtifactCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ArtifactCommands::List => {
            let artifacts = client.list().await?;
            output_artifacts(&output_format, &artifacts)
        }
        ArtifactCommands::Get { id } => match client.get(&id).await? {
            Some(artifact) => output_artifacts(&output_format, std::slice::from_ref(&artifact)),
            None => Err(anyhow::anyhow!("Artifact '{}' not found", id)),
        },
        ArtifactCommands::Save { json } => {
            let artifact: Artifact = serde_json::from_str(&json)?;
            let saved = client.save(&artifact).await?;
            output_success(
                &output_format,
                &format!("Saved artifact '{}'", saved.id),
                Some(json!({ "artifact": saved })),
            )
        }
        ArtifactCommands::Delete { id } => {
            client.delete(&id).await?;
            output_success(&output_format, &format!("Deleted artifact '{}'", id), None)
        }
    }
}
