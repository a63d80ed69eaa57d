//! Static role-based access policy.
//!
//! The grant relation is fixed at compile time: role alone determines the
//! grant, with no per-resource ACLs and no delegation. Views consult this
//! table instead of re-encoding role checks inline, and the API client
//! consults it again before issuing state-changing calls. The server remains
//! the final authority either way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nactive_core::{Identity, Role};

/// Errors from policy evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The action name is outside the fixed action set. Never silently
    /// mapped to allow or deny.
    #[error("Unknown action: {name}")]
    UnknownAction { name: String },
}

/// The closed set of client actions subject to role gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ViewPatients,
    RegisterPatient,
    ViewPatientDetail,
    CreateEncounter,
    CreatePrescription,
    ViewAuditLog,
}

impl Action {
    /// Every action, in grant-table order.
    pub const ALL: [Action; 6] = [
        Action::ViewPatients,
        Action::RegisterPatient,
        Action::ViewPatientDetail,
        Action::CreateEncounter,
        Action::CreatePrescription,
        Action::ViewAuditLog,
    ];

    /// Wire/display name of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewPatients => "view_patients",
            Self::RegisterPatient => "register_patient",
            Self::ViewPatientDetail => "view_patient_detail",
            Self::CreateEncounter => "create_encounter",
            Self::CreatePrescription => "create_prescription",
            Self::ViewAuditLog => "view_audit_log",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view_patients" => Ok(Self::ViewPatients),
            "register_patient" => Ok(Self::RegisterPatient),
            "view_patient_detail" => Ok(Self::ViewPatientDetail),
            "create_encounter" => Ok(Self::CreateEncounter),
            "create_prescription" => Ok(Self::CreatePrescription),
            "view_audit_log" => Ok(Self::ViewAuditLog),
            other => Err(PolicyError::UnknownAction {
                name: other.to_string(),
            }),
        }
    }
}

/// The grant table: is `role` allowed to perform `action`?
///
/// Pure and total over the action set. Clinical roles (doctor, nurse) handle
/// patients; admin handles oversight. Admin deliberately has no
/// patient-mutating grants.
#[must_use]
pub fn is_allowed(role: Role, action: Action) -> bool {
    match action {
        Action::ViewPatients | Action::ViewPatientDetail => true,
        Action::RegisterPatient | Action::CreateEncounter => {
            matches!(role, Role::Doctor | Role::Nurse)
        }
        Action::CreatePrescription => matches!(role, Role::Doctor),
        Action::ViewAuditLog => matches!(role, Role::Admin),
    }
}

/// Policy check against an optional session identity.
///
/// An absent session denies every action, regardless of any role value left
/// over in stale client state.
#[must_use]
pub fn check(identity: Option<&Identity>, action: Action) -> bool {
    match identity {
        Some(identity) => is_allowed(identity.role, action),
        None => false,
    }
}

/// Parse an action name and evaluate it in one step.
///
/// # Errors
///
/// Returns [`PolicyError::UnknownAction`] for any name outside the fixed set.
pub fn is_allowed_named(role: Role, action: &str) -> Result<bool, PolicyError> {
    Ok(is_allowed(role, action.parse()?))
}
