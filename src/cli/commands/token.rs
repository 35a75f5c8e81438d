use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;

pub fn handle(
    tenant: &str,
    subject: &str,
    hours: u64,
    secret: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let claims = Claims::new(subject, tenant, hours)?;
    let token = generate_jwt(&claims, secret)?;

    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "token": token,
                    "tenant_id": tenant,
                    "expires_at": claims.exp
                }))?
            );
        }
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
