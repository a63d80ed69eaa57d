use anyhow::Result;

use nactive_client::ApiClient;

use crate::cli::OutputFormat;
use crate::output::{audit_table, print_json};

/// Audit-log view. The client-side admin gate is convenience only; the
/// server re-checks the role before returning anything.
pub async fn list(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let logs = client.audit_logs().await?;
    match format {
        OutputFormat::Json => print_json(&logs),
        OutputFormat::Table => {
            if logs.is_empty() {
                println!("No audit entries.");
            } else {
                println!("{}", audit_table(&logs));
            }
        }
    }
    Ok(())
}
