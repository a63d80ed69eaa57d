use anyhow::Result;

use nactive_client::ApiClient;

use crate::cli::EncountersAddArgs;
use crate::output::print_success;

pub async fn add(client: &ApiClient, args: &EncountersAddArgs) -> Result<()> {
    let encounter = client
        .create_encounter(args.patient_id, args.notes.clone())
        .await?;
    print_success(&format!(
        "Recorded encounter #{} for patient {}",
        encounter.id, encounter.patient_id
    ));
    Ok(())
}
