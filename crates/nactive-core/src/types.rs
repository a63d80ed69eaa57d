//! Wire shapes consumed from the Nactive EHR REST backend.
//!
//! Date and timestamp fields are carried as opaque strings; the backend owns
//! their formatting and the client only displays them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// =============================================================================
// Identity
// =============================================================================

/// Clinical role issued by the server as part of an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Nurse,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctor => write!(f, "doctor"),
            Self::Nurse => write!(f, "nurse"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(Self::Doctor),
            "nurse" => Ok(Self::Nurse),
            "admin" => Ok(Self::Admin),
            other => Err(ApiError::Validation {
                message: format!("unknown role: {other}"),
            }),
        }
    }
}

/// Server-issued record of who the user is and their role.
///
/// Immutable for the life of a session; replaced wholesale on re-login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// Successful `POST /auth/login` exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
}

// =============================================================================
// Clinical records
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Payload for `POST /patients`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPatient {
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub id: i64,
    pub patient_id: i64,
    pub clinician_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Payload for `POST /encounters`.
///
/// `clinician_role` is filled from the current session, never from user input.
#[derive(Debug, Clone, Serialize)]
pub struct NewEncounter {
    pub patient_id: i64,
    pub clinician_role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i64,
    pub encounter_id: i64,
    pub drug_name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub created_by: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescribed_by: Option<String>,
}

/// Payload for `POST /prescriptions`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPrescription {
    pub encounter_id: i64,
    pub drug_name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

/// `GET /patients/{id}/records` response: a patient's clinical timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecords {
    pub patient: Patient,
    pub encounters: Vec<Encounter>,
    pub prescriptions: Vec<Prescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: i64,
    pub user_role: String,
    pub action: String,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<i64>,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Doctor, Role::Nurse, Role::Admin] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
        assert!(Role::from_str("surgeon").is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"doctor\"");
        let role: Role = serde_json::from_str("\"nurse\"").unwrap();
        assert_eq!(role, Role::Nurse);
    }

    #[test]
    fn test_identity_deserializes_login_response() {
        let body = serde_json::json!({
            "token": "tok-123",
            "user": { "id": 7, "username": "doctor1williams", "role": "doctor" }
        });
        let resp: LoginResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.token, "tok-123");
        assert_eq!(resp.user.id, 7);
        assert_eq!(resp.user.role, Role::Doctor);
    }

    #[test]
    fn test_patient_optional_fields_default() {
        let body = serde_json::json!({
            "id": 1,
            "full_name": "Jane Doe",
            "date_of_birth": "1990-04-12",
            "gender": "female"
        });
        let patient: Patient = serde_json::from_value(body).unwrap();
        assert!(patient.phone.is_none());
        assert!(patient.created_at.is_none());
    }

    #[test]
    fn test_audit_log_null_entity_id() {
        let body = serde_json::json!({
            "id": 3,
            "user_role": "admin",
            "action": "LOGIN",
            "entity_type": "user",
            "entity_id": null,
            "timestamp": "2026-02-01T09:00:00Z"
        });
        let log: AuditLog = serde_json::from_value(body).unwrap();
        assert_eq!(log.entity_id, None);
    }
}
