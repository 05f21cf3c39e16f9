//! Session
//!
//! Sign-in state for the single demo account. The session is persisted as a
//! small JSON marker file: if the marker exists the user is signed in.
//!
//! ```rust,ignore
//! let mut session = SessionContext::from_config(&config.session, notifier);
//! if session.authenticate("trial", "assignment123") {
//!     assert!(session.is_authenticated());
//! }
//! session.clear();
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SessionConfig;
use crate::notify::SharedNotifier;

/// Errors touching the marker file
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid session marker: {0}")]
    Marker(#[from] serde_json::Error),
}

/// Current sign-in state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub authenticated: bool,
    pub username: Option<String>,
}

/// What is written to disk
#[derive(Debug, Serialize, Deserialize)]
struct Marker {
    #[serde(default)]
    username: Option<String>,
}

/// Reads and writes the session marker file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session
    ///
    /// A missing marker is a signed-out session. A marker that does not parse
    /// is removed and also treated as signed out.
    pub fn read(&self) -> Session {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Session::default(),
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    "Failed to read session marker: {}",
                    e
                );
                return Session::default();
            }
        };

        match serde_json::from_str::<Marker>(&content) {
            Ok(marker) => Session {
                authenticated: true,
                username: marker.username,
            },
            Err(e) => {
                tracing::error!("Failed to parse stored auth data: {}", e);
                if let Err(e) = self.clear() {
                    tracing::warn!("Failed to remove corrupt session marker: {}", e);
                }
                Session::default()
            }
        }
    }

    pub fn write(&self, username: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let marker = Marker {
            username: Some(username.to_string()),
        };
        fs::write(&self.path, serde_json::to_string(&marker)?)?;
        Ok(())
    }

    /// Remove the marker; a missing marker is not an error
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The demo account
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl From<&SessionConfig> for Credentials {
    fn from(config: &SessionConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

/// Explicit session lifecycle: `initialize → authenticate → clear`
pub struct SessionContext {
    store: SessionStore,
    credentials: Credentials,
    notifier: SharedNotifier,
    session: Session,
}

impl SessionContext {
    /// Restore whatever session the marker holds
    pub fn initialize(
        store: SessionStore,
        credentials: Credentials,
        notifier: SharedNotifier,
    ) -> Self {
        let session = store.read();
        tracing::debug!(authenticated = session.authenticated, "Session initialized");
        Self {
            store,
            credentials,
            notifier,
            session,
        }
    }

    pub fn from_config(config: &SessionConfig, notifier: SharedNotifier) -> Self {
        Self::initialize(SessionStore::new(&config.path), config.into(), notifier)
    }

    /// Check the demo credentials and persist the session on success
    pub fn authenticate(&mut self, username: &str, password: &str) -> bool {
        if username != self.credentials.username || password != self.credentials.password {
            tracing::info!(username = %username, "Rejected sign-in");
            self.notifier.error("Invalid username or password");
            return false;
        }

        if let Err(e) = self.store.write(username) {
            tracing::error!("Login error: {}", e);
            self.notifier.error("Login failed");
            return false;
        }

        self.session = Session {
            authenticated: true,
            username: Some(username.to_string()),
        };
        tracing::info!(username = %username, "Signed in");
        self.notifier.success("Login successful");
        true
    }

    /// Sign out
    pub fn clear(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to remove session marker: {}", e);
        }
        self.session = Session::default();
        tracing::info!("Signed out");
        self.notifier.info("Logged out successfully");
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    pub fn username(&self) -> Option<&str> {
        self.session.username.as_deref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
