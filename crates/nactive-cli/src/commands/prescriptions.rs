use anyhow::Result;
use colored::Colorize;

use nactive_client::ApiClient;
use nactive_core::NewPrescription;

use crate::cli::PrescriptionsAddArgs;
use crate::output::print_success;

pub async fn add(client: &ApiClient, args: &PrescriptionsAddArgs) -> Result<()> {
    let prescription = NewPrescription {
        encounter_id: args.encounter_id,
        drug_name: args.drug_name.clone(),
        dosage: args.dosage.clone(),
        frequency: args.frequency.clone(),
        duration: args.duration.clone(),
    };

    let created = client.create_prescription(&prescription).await?;
    print_success(&format!(
        "Prescribed {} {} on encounter #{}",
        created.drug_name.cyan(),
        created.dosage,
        created.encounter_id
    ));
    Ok(())
}
