//! Intercepting API client.
//!
//! Every outgoing call goes through one request builder that attaches the
//! session's bearer token, and one response handler that reacts to
//! server-declared authorization failure. Individual views never duplicate
//! either step.
//!
//! A 401/403 on any authenticated call clears the session store, fires the
//! session-expired hook exactly once per client (concurrent failing responses
//! race only on an atomic flag; the extra clears are idempotent), and then
//! propagates [`ApiError::Authorization`] to the caller. The failed request
//! is never retried here; after re-login, the caller decides.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use nactive_auth::policy::{self, Action};
use nactive_auth::session::SessionStore;
use nactive_core::{
    ApiError, ApiResult, AuditLog, Encounter, Identity, NewEncounter, NewPatient, NewPrescription,
    Patient, PatientRecords, Prescription,
};

type ExpiredHook = Box<dyn Fn() + Send + Sync>;

/// HTTP client for the Nactive EHR backend.
///
/// Reads the session store to attach credentials; writes it only on
/// server-reported authorization failure.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    torn_down: AtomicBool,
    on_session_expired: Option<ExpiredHook>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            torn_down: AtomicBool::new(false),
            on_session_expired: None,
        }
    }

    /// Install a hook invoked once when the server invalidates the session.
    /// The front-end uses it to return the user to the login view.
    #[must_use]
    pub fn with_session_expired_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Box::new(hook));
        self
    }

    /// Session store backing this client.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // =========================================================================
    // Interceptor
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        req.header("Accept", "application/json")
    }

    /// Policy gate consulted before a call is even attempted. The server
    /// re-checks; this keeps denied actions off the wire.
    fn require(&self, action: Action) -> ApiResult<Identity> {
        match self.session.current() {
            Some(identity) if policy::is_allowed(identity.role, action) => Ok(identity),
            Some(identity) => Err(ApiError::PolicyDenied {
                role: identity.role.to_string(),
                action: action.to_string(),
            }),
            None => Err(ApiError::PolicyDenied {
                role: "unauthenticated".to_string(),
                action: action.to_string(),
            }),
        }
    }

    async fn handle<T: DeserializeOwned>(&self, resp: reqwest::Response) -> ApiResult<T> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            self.teardown(status.as_u16());
            return Err(ApiError::Authorization {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|err| ApiError::transport(format!("Failed to read response: {err}")))?;

        if status.is_client_error() {
            return Err(ApiError::validation(
                server_error_message(&body).unwrap_or_else(|| format!("HTTP {status}")),
            ));
        }
        if !status.is_success() {
            return Err(ApiError::transport(format!("HTTP {status}: {body}")));
        }

        serde_json::from_str(&body)
            .map_err(|err| ApiError::transport(format!("Failed to parse response JSON: {err}")))
    }

    fn teardown(&self, status: u16) {
        if self.torn_down.swap(true, Ordering::SeqCst) {
            return;
        }
        warn!(status, "server invalidated the session, clearing local state");
        if let Err(err) = self.session.clear() {
            warn!(%err, "failed to remove persisted session during teardown");
        }
        if let Some(hook) = &self.on_session_expired {
            hook();
        }
    }

    // =========================================================================
    // Endpoints
    // =========================================================================

    /// `GET /patients[?search=…]`
    pub async fn list_patients(&self, search: Option<&str>) -> ApiResult<Vec<Patient>> {
        self.require(Action::ViewPatients)?;
        let mut req = self.request(Method::GET, "/patients");
        if let Some(term) = search {
            req = req.query(&[("search", term)]);
        }
        let resp = req.send().await.map_err(connect_err)?;
        self.handle(resp).await
    }

    /// `POST /patients`
    pub async fn register_patient(&self, patient: &NewPatient) -> ApiResult<Patient> {
        self.require(Action::RegisterPatient)?;
        debug!(full_name = %patient.full_name, "registering patient");
        let resp = self
            .request(Method::POST, "/patients")
            .json(patient)
            .send()
            .await
            .map_err(connect_err)?;
        self.handle(resp).await
    }

    /// `GET /patients/{id}/records`
    pub async fn patient_records(&self, patient_id: i64) -> ApiResult<PatientRecords> {
        self.require(Action::ViewPatientDetail)?;
        let resp = self
            .request(Method::GET, &format!("/patients/{patient_id}/records"))
            .send()
            .await
            .map_err(connect_err)?;
        self.handle(resp).await
    }

    /// `POST /encounters`
    ///
    /// `clinician_role` comes from the current session identity, not from the
    /// caller.
    pub async fn create_encounter(
        &self,
        patient_id: i64,
        notes: Option<String>,
    ) -> ApiResult<Encounter> {
        let identity = self.require(Action::CreateEncounter)?;
        let body = NewEncounter {
            patient_id,
            clinician_role: identity.role,
            notes,
        };
        let resp = self
            .request(Method::POST, "/encounters")
            .json(&body)
            .send()
            .await
            .map_err(connect_err)?;
        self.handle(resp).await
    }

    /// `POST /prescriptions`
    pub async fn create_prescription(
        &self,
        prescription: &NewPrescription,
    ) -> ApiResult<Prescription> {
        self.require(Action::CreatePrescription)?;
        let resp = self
            .request(Method::POST, "/prescriptions")
            .json(prescription)
            .send()
            .await
            .map_err(connect_err)?;
        self.handle(resp).await
    }

    /// `GET /audit-logs`
    ///
    /// The policy gate here is a front-end convenience; the server enforces
    /// the admin requirement independently.
    pub async fn audit_logs(&self) -> ApiResult<Vec<AuditLog>> {
        self.require(Action::ViewAuditLog)?;
        let resp = self
            .request(Method::GET, "/audit-logs")
            .send()
            .await
            .map_err(connect_err)?;
        self.handle(resp).await
    }
}

fn connect_err(err: reqwest::Error) -> ApiError {
    ApiError::transport(format!("Failed to connect to server: {err}"))
}

/// Extract the backend's `{"error": "…"}` message, if the body carries one.
fn server_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_message_extraction() {
        assert_eq!(
            server_error_message("{\"error\": \"date_of_birth is required\"}").as_deref(),
            Some("date_of_birth is required")
        );
        assert_eq!(server_error_message("not json"), None);
        assert_eq!(server_error_message("{\"detail\": \"nope\"}"), None);
    }
}
