//! Session context: the bearer token and where it is persisted.
//!
//! Lifecycle:
//! - `load` once at startup, reading any token saved by a previous run
//! - `set_token` after login or registration
//! - `clear` on logout, and from [`Session::handle_unauthorised`] when the API answers 401
//!
//! The token file holds a small JSON document. A missing file means "signed out"; an unreadable
//! or malformed one is logged and treated the same way.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Route the user is sent to when the API rejects the session.
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to write session file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to remove session file {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize session: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for Results that can fail with a [`SessionError`].
pub type SessionResult<T> = Result<T, SessionError>;

/// Where the front end goes when the session ends.
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &str);
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

pub struct Session {
    token: RwLock<Option<String>>,
    file: Option<PathBuf>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("file", &self.file)
            .finish()
    }
}

fn read_token(path: &Path) -> Option<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to read session file: {e}");
            return None;
        }
    };
    match serde_json::from_str::<StoredSession>(&content) {
        Ok(stored) if !stored.token.trim().is_empty() => Some(stored.token),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to parse session file: {e}");
            None
        }
    }
}

fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    io::Write::write_all(&mut file, contents.as_bytes())
}

impl Session {
    /// A session that is never persisted.
    pub fn in_memory(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            token: RwLock::new(None),
            file: None,
            navigator,
        }
    }

    /// Load the session persisted at `file`, if any.
    pub fn load(file: Option<PathBuf>, navigator: Arc<dyn Navigator>) -> Self {
        let token = file.as_deref().and_then(read_token);
        if token.is_some() {
            tracing::debug!("loaded saved session");
        }
        Self {
            token: RwLock::new(token),
            file,
            navigator,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// Store `token` and persist it.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the session file cannot be written. The in-memory token is
    /// set either way.
    pub fn set_token(&self, token: impl Into<String>) -> SessionResult<()> {
        let token = token.into();
        let stored = serde_json::to_string(&StoredSession {
            token: token.clone(),
        })?;
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
        if let Some(path) = &self.file {
            write_private(path, &stored).map_err(|source| SessionError::Write {
                path: path.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Forget the token and delete the session file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Remove`] if the file exists but cannot be deleted.
    pub fn clear(&self) -> SessionResult<()> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        if let Some(path) = &self.file {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(SessionError::Remove {
                        path: path.clone(),
                        source,
                    })
                }
            }
        }
        Ok(())
    }

    /// Called by the transport on HTTP 401: clear the session and send the user to log in.
    pub fn handle_unauthorised(&self) {
        if let Err(e) = self.clear() {
            tracing::warn!("failed to clear session after 401: {e}");
        }
        self.navigator.redirect(LOGIN_ROUTE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingNavigator;

    #[test]
    fn set_token_persists_and_load_restores() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("session.json");
        let nav = Arc::new(RecordingNavigator::default());

        let session = Session::load(Some(path.clone()), nav.clone());
        assert!(!session.is_authenticated());
        session.set_token("tok-1").expect("persist");
        assert!(path.exists());

        let restored = Session::load(Some(path), nav);
        assert_eq!(restored.token().as_deref(), Some("tok-1"));
    }

    #[test]
    fn clear_removes_file_and_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let session = Session::load(Some(path.clone()), Arc::new(RecordingNavigator::default()));
        session.set_token("tok").expect("persist");

        session.clear().expect("clear");
        assert!(!path.exists());
        assert_eq!(session.token(), None);
        session.clear().expect("second clear");
    }

    #[test]
    fn malformed_file_is_signed_out() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").expect("write");
        let session = Session::load(Some(path), Arc::new(RecordingNavigator::default()));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn unauthorised_clears_and_redirects() {
        let nav = Arc::new(RecordingNavigator::default());
        let session = Session::in_memory(nav.clone());
        session.set_token("tok").expect("set");

        session.handle_unauthorised();
        assert_eq!(session.token(), None);
        assert_eq!(nav.routes(), vec![LOGIN_ROUTE.to_owned()]);
    }

    #[test]
    fn debug_hides_token() {
        let session = Session::in_memory(Arc::new(RecordingNavigator::default()));
        session.set_token("very-secret").expect("set");
        assert!(!format!("{session:?}").contains("very-secret"));
    }
}
