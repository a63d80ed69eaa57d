use colored::{ColoredString, Colorize};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use nactive_core::{AuditLog, Patient, PatientRecords, Role};

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => print_error(&format!("Failed to render JSON: {err}")),
    }
}

/// Colored role badge: green for doctors, cyan for nurses, magenta for admins.
pub fn role_badge(role: Role) -> ColoredString {
    match role {
        Role::Doctor => role.to_string().to_uppercase().green(),
        Role::Nurse => role.to_string().to_uppercase().cyan(),
        Role::Admin => role.to_string().to_uppercase().magenta(),
    }
}

/// Role-specific dashboard greeting, shown above the patient list.
pub fn dashboard_heading(role: Role, username: &str) -> String {
    let title = match role {
        Role::Doctor => "Doctor Dashboard",
        Role::Nurse => "Nurse Dashboard",
        Role::Admin => "Admin Dashboard",
    };
    format!("{title} - welcome, {username}")
}

pub fn patients_table(patients: &[Patient]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Date of birth", "Gender", "Phone"]);
    for patient in patients {
        builder.push_record([
            patient.id.to_string(),
            patient.full_name.clone(),
            patient.date_of_birth.clone(),
            patient.gender.to_string(),
            patient.phone.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Patient demographic header plus the encounter timeline with nested
/// prescriptions, the CLI rendering of the patient-detail view.
pub fn records_view(records: &PatientRecords) -> String {
    let mut out = String::new();
    let patient = &records.patient;
    out.push_str(&format!(
        "{}  (id {})\nDOB: {}   Gender: {}   Phone: {}\n",
        patient.full_name,
        patient.id,
        patient.date_of_birth,
        patient.gender,
        patient.phone.as_deref().unwrap_or("-"),
    ));

    if records.encounters.is_empty() {
        out.push_str("\nNo encounters recorded.\n");
        return out;
    }

    for encounter in &records.encounters {
        out.push_str(&format!(
            "\nEncounter #{} ({})  {}\n",
            encounter.id,
            encounter.clinician_role,
            encounter.created_at.as_deref().unwrap_or(""),
        ));
        if let Some(notes) = &encounter.notes {
            out.push_str(&format!("  Notes: {notes}\n"));
        }
        for rx in records
            .prescriptions
            .iter()
            .filter(|rx| rx.encounter_id == encounter.id)
        {
            out.push_str(&format!(
                "  Rx: {} {}, {} for {}{}\n",
                rx.drug_name,
                rx.dosage,
                rx.frequency,
                rx.duration,
                rx.prescribed_by
                    .as_deref()
                    .map(|by| format!(" (by {by})"))
                    .unwrap_or_default(),
            ));
        }
    }
    out
}

pub fn audit_table(logs: &[AuditLog]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Role", "Action", "Entity", "Entity ID", "Timestamp"]);
    for log in logs {
        builder.push_record([
            log.id.to_string(),
            log.user_role.clone(),
            log.action.clone(),
            log.entity_type.clone(),
            log.entity_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            log.timestamp.clone(),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nactive_core::{Encounter, Gender, Prescription};

    fn patient() -> Patient {
        Patient {
            id: 12,
            full_name: "Alice Smith".to_string(),
            date_of_birth: "1985-02-03".to_string(),
            gender: Gender::Female,
            phone: None,
            created_at: None,
        }
    }

    #[test]
    fn test_dashboard_heading_is_role_specific() {
        assert_eq!(
            dashboard_heading(Role::Nurse, "nurse1patel"),
            "Nurse Dashboard - welcome, nurse1patel"
        );
        assert!(dashboard_heading(Role::Admin, "admin1").starts_with("Admin Dashboard"));
    }

    #[test]
    fn test_patients_table_renders_missing_phone_as_dash() {
        let table = patients_table(&[patient()]);
        assert!(table.contains("Alice Smith"));
        assert!(table.contains('-'));
    }

    #[test]
    fn test_records_view_nests_prescriptions_under_their_encounter() {
        let records = PatientRecords {
            patient: patient(),
            encounters: vec![
                Encounter {
                    id: 1,
                    patient_id: 12,
                    clinician_role: "doctor".to_string(),
                    notes: Some("Initial".to_string()),
                    created_at: None,
                },
                Encounter {
                    id: 2,
                    patient_id: 12,
                    clinician_role: "nurse".to_string(),
                    notes: None,
                    created_at: None,
                },
            ],
            prescriptions: vec![Prescription {
                id: 4,
                encounter_id: 1,
                drug_name: "Amoxicillin".to_string(),
                dosage: "500mg".to_string(),
                frequency: "3x daily".to_string(),
                duration: "7 days".to_string(),
                created_by: 7,
                created_at: None,
                prescribed_by: Some("doctor1williams".to_string()),
            }],
        };

        let view = records_view(&records);
        let enc1 = view.find("Encounter #1").unwrap();
        let enc2 = view.find("Encounter #2").unwrap();
        let rx = view.find("Amoxicillin").unwrap();
        assert!(enc1 < rx && rx < enc2, "prescription belongs to encounter 1");
    }

    #[test]
    fn test_records_view_without_encounters() {
        let records = PatientRecords {
            patient: patient(),
            encounters: vec![],
            prescriptions: vec![],
        };
        assert!(records_view(&records).contains("No encounters recorded."));
    }
}
