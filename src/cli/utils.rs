use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::models::Artifact;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output artifacts as a JSON array or one line per artifact
pub fn output_artifacts(output_format: &OutputFormat, artifacts: &[Artifact]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(artifacts)?);
        }
        OutputFormat::Text => {
            if artifacts.is_empty() {
                println!("No artifacts");
            }
            for artifact in artifacts {
                println!("{}\t{}", artifact.id, Value::Object(artifact.payload.clone()));
            }
        }
    }
    Ok(())
}
