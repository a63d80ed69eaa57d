//! Core domain types and error taxonomy for the Nactive EHR client.

pub mod error;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use types::{
    AuditLog, Encounter, Gender, Identity, LoginResponse, NewEncounter, NewPatient,
    NewPrescription, Patient, PatientRecords, Prescription, Role,
};
