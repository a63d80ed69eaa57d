use anyhow::Result;
use colored::Colorize;

use nactive_client::ApiClient;
use nactive_core::{Gender, NewPatient};

use crate::cli::{GenderArg, OutputFormat, PatientsListArgs, PatientsRegisterArgs};
use crate::output::{dashboard_heading, patients_table, print_json, print_success, records_view};

/// Dashboard view: role-specific greeting plus the (optionally searched)
/// patient list.
pub async fn list(client: &ApiClient, args: &PatientsListArgs, format: OutputFormat) -> Result<()> {
    let patients = client.list_patients(args.search.as_deref()).await?;

    match format {
        OutputFormat::Json => print_json(&patients),
        OutputFormat::Table => {
            if let Some(identity) = client.session().current() {
                println!("{}\n", dashboard_heading(identity.role, &identity.username));
            }
            if patients.is_empty() {
                if args.search.is_some() {
                    println!("No patients found matching your search.");
                } else {
                    println!("No patients registered yet.");
                }
            } else {
                println!("{}", patients_table(&patients));
            }
        }
    }
    Ok(())
}

pub async fn register(
    client: &ApiClient,
    args: &PatientsRegisterArgs,
    format: OutputFormat,
) -> Result<()> {
    let patient = NewPatient {
        full_name: args.full_name.clone(),
        date_of_birth: args.date_of_birth.clone(),
        gender: match args.gender {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Other => Gender::Other,
        },
        phone: args.phone.clone(),
    };

    let created = client.register_patient(&patient).await?;
    print_success(&format!(
        "Registered patient {} (id {})",
        created.full_name.cyan(),
        created.id
    ));
    match format {
        OutputFormat::Json => print_json(&created),
        OutputFormat::Table => {
            println!("View the record with: nactive patients records {}", created.id);
        }
    }
    Ok(())
}

/// Patient-detail view: demographics and the clinical timeline.
pub async fn records(client: &ApiClient, id: i64, format: OutputFormat) -> Result<()> {
    let records = client.patient_records(id).await?;
    match format {
        OutputFormat::Json => print_json(&records),
        OutputFormat::Table => println!("{}", records_view(&records)),
    }
    Ok(())
}
