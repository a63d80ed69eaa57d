//! Auth gateway: login and logout exchanges.
//!
//! The only component that creates a session or ends one through explicit
//! user action. Login is fail-closed: any failure, credential or transport,
//! comes back as a generic authentication denial and leaves the store
//! untouched. Logout is fail-open: the server notification is best-effort
//! and local teardown always happens.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use nactive_auth::session::SessionStore;
use nactive_core::{ApiError, ApiResult, Identity, LoginResponse};

const GENERIC_LOGIN_FAILURE: &str = "Login failed";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Performs the `/auth/login` and `/auth/logout` exchanges and mutates the
/// session store accordingly.
pub struct AuthGateway {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl AuthGateway {
    pub fn new(base_url: &str, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Exchange credentials for an identity and install the session.
    ///
    /// The password goes only into the request body; it is never logged,
    /// persisted, or echoed in errors. Failures do not distinguish transport
    /// from bad credentials beyond the server's own message.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Identity> {
        debug!(%username, "attempting login");

        let resp = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|_| ApiError::authentication(GENERIC_LOGIN_FAILURE))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|_| ApiError::authentication(GENERIC_LOGIN_FAILURE))?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string());
            return Err(ApiError::authentication(message));
        }

        let issued: LoginResponse = serde_json::from_str(&body)
            .map_err(|err| ApiError::transport(format!("Malformed login response: {err}")))?;

        self.session
            .set(issued.token, issued.user.clone())
            .map_err(|err| ApiError::transport(format!("Failed to persist session: {err}")))?;

        debug!(username = %issued.user.username, role = %issued.user.role, "login succeeded");
        Ok(issued.user)
    }

    /// Notify the server, then tear down the local session regardless.
    ///
    /// A failed notification must never leave the user stuck logged in
    /// client-side, so transport errors are logged and swallowed.
    pub async fn logout(&self) -> ApiResult<()> {
        let mut req = self.http.post(format!("{}/auth/logout", self.base_url));
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        match req.send().await {
            Ok(resp) if !resp.status().is_success() => {
                warn!(status = %resp.status(), "server rejected logout notification");
            }
            Ok(_) => {}
            Err(err) => {
                warn!(%err, "logout notification failed, proceeding with local teardown");
            }
        }

        self.session
            .clear()
            .map_err(|err| ApiError::transport(format!("Failed to clear session: {err}")))?;
        Ok(())
    }
}
