//! Error taxonomy for client/server exchanges.
//!
//! The interceptor reacts globally only to [`ApiError::Authorization`];
//! every other class propagates to the calling view for local display.

use thiserror::Error;

/// Result alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the Nactive EHR client when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad credentials on login. Recoverable; the user retries.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Generic denial reason. Never distinguishes network-vs-credential
        /// detail in a way that allows username enumeration.
        message: String,
    },

    /// Server-reported 401/403 on an authenticated call. Session-invalidating:
    /// the interceptor tears down the session before propagating this.
    #[error("Authorization failed (HTTP {status}): session is no longer valid")]
    Authorization {
        /// The HTTP status that triggered teardown (401 or 403).
        status: u16,
    },

    /// Client-side policy refusal. No network call was made and the session
    /// is untouched.
    #[error("Role {role} is not permitted to {action}")]
    PolicyDenied { role: String, action: String },

    /// Malformed request payload, reported by the server. Surfaced next to
    /// the originating form; in-progress input stays intact.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Network or decode failure. Retryable; never silently swallowed except
    /// in best-effort logout.
    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl ApiError {
    /// Create an authentication failure with a generic message.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a transport failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Returns `true` if this error already tore down the session.
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization { .. })
    }

    /// Returns `true` for failures the user can retry without re-login.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Validation { .. })
    }
}
