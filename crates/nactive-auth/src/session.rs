//! Durable session store.
//!
//! Single authoritative in-memory representation of "who is using the app",
//! backed by a JSON file so a restart does not force re-login. The store is
//! constructed once at startup and shared by `Arc`; there is no module-level
//! global. Only the auth gateway and the API client's authorization-failure
//! handler mutate it; views only read.
//!
//! `current()` and `token()` are synchronous and never touch the filesystem:
//! the persisted file is read once at load time into an
//! [`arc_swap::ArcSwapOption`], and mutations swap the whole cell so no
//! partial write is ever observable.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use nactive_core::Identity;

/// Errors from session persistence.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot determine home directory")]
    NoHomeDir,

    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// On-disk session record: the bearer token plus the identity it was issued
/// for. Treated as untrusted on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    user: Identity,
}

/// File-backed store for the current session.
pub struct SessionStore {
    path: PathBuf,
    state: ArcSwapOption<PersistedSession>,
}

impl SessionStore {
    /// Open the store for a named profile under `~/.nactive`, loading any
    /// persisted session.
    pub fn open(profile: &str) -> Result<Self, SessionError> {
        let dir = dirs::home_dir().ok_or(SessionError::NoHomeDir)?.join(".nactive");
        fs::create_dir_all(&dir)?;
        Ok(Self::at_path(dir.join(format!("session.{profile}.json"))))
    }

    /// Open the store against an explicit file path and load it.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        let store = Self {
            path: path.into(),
            state: ArcSwapOption::const_empty(),
        };
        store.load();
        store
    }

    /// Reload the in-memory session from the persisted file.
    ///
    /// Missing or malformed data yields an absent session; this never fails
    /// to the caller. A corrupt file is removed so the next load is clean.
    pub fn load(&self) {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<PersistedSession>(&content) {
                Ok(session) => {
                    debug!(username = %session.user.username, "restored persisted session");
                    self.state.store(Some(Arc::new(session)));
                }
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "discarding malformed session record");
                    let _ = fs::remove_file(&self.path);
                    self.state.store(None);
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                self.state.store(None);
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "session file unreadable, treating as absent");
                self.state.store(None);
            }
        }
    }

    /// Install a new session and persist it.
    ///
    /// The file write happens first; the in-memory swap only lands on
    /// success, so a reader immediately after `set` sees a session the disk
    /// also has.
    pub fn set(&self, token: impl Into<String>, identity: Identity) -> Result<(), SessionError> {
        let session = PersistedSession {
            token: token.into(),
            user: identity,
        };
        let content = serde_json::to_string_pretty(&session)?;
        fs::write(&self.path, content)?;
        self.state.store(Some(Arc::new(session)));
        Ok(())
    }

    /// Remove the persisted session and reset memory to absent.
    ///
    /// Idempotent: clearing an already-absent session is a no-op. The
    /// in-memory state is reset first, so teardown succeeds even when the
    /// backing file cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.state.store(None);
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// The current identity, if a session is established. Synchronous and
    /// free of I/O.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.state.load().as_ref().map(|s| s.user.clone())
    }

    /// The bearer token of the current session.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.load().as_ref().map(|s| s.token.clone())
    }

    /// Whether a session is currently established.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.load().is_some()
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nactive_core::Role;
    use tempfile::TempDir;

    fn identity() -> Identity {
        Identity {
            id: 42,
            username: "nurse1patel".to_string(),
            role: Role::Nurse,
        }
    }

    fn store_in(dir: &TempDir) -> SessionStore {
        SessionStore::at_path(dir.path().join("session.default.json"))
    }

    #[test]
    fn test_set_then_current_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("tok-abc", identity()).unwrap();
        assert_eq!(store.current(), Some(identity()));
        assert_eq!(store.token().as_deref(), Some("tok-abc"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.default.json");

        SessionStore::at_path(&path).set("tok-abc", identity()).unwrap();

        let reopened = SessionStore::at_path(&path);
        assert_eq!(reopened.current(), Some(identity()));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("tok-abc", identity()).unwrap();

        store.clear().unwrap();
        assert_eq!(store.current(), None);

        // Second clear on an already-absent session is a no-op, not an error.
        store.clear().unwrap();
        assert_eq!(store.current(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear_before_any_set_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.clear().unwrap();
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_malformed_file_loads_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.default.json");
        fs::write(&path, "{\"token\": \"tok-abc\", \"user\": {\"id\":").unwrap();

        let store = SessionStore::at_path(&path);
        assert_eq!(store.current(), None);
        assert!(!store.is_authenticated());
        // The corrupt record is gone; a later load stays absent.
        assert!(!path.exists());
    }

    #[test]
    fn test_wrong_shape_loads_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.default.json");
        fs::write(&path, "{\"token\": \"tok-abc\", \"user\": {\"id\": \"not-a-number\"}}")
            .unwrap();

        let store = SessionStore::at_path(&path);
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_missing_file_loads_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::at_path(dir.path().join("never-written.json"));
        assert_eq!(store.current(), None);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_relogin_replaces_identity_wholesale() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("tok-1", identity()).unwrap();

        let replacement = Identity {
            id: 7,
            username: "doctor1williams".to_string(),
            role: Role::Doctor,
        };
        store.set("tok-2", replacement.clone()).unwrap();

        assert_eq!(store.current(), Some(replacement));
        assert_eq!(store.token().as_deref(), Some("tok-2"));
    }
}
