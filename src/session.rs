//! Session token management.
//!
//! The bearer token identifying the logged-in user lives in a single file
//! under the td data directory, the counterpart of the web client's fixed
//! localStorage key. The session is an explicitly-owned value passed to the
//! components that need it, not ambient global state.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const SESSION_FILENAME: &str = "session";

/// Owned session state with its durable storage location.
#[derive(Debug, Clone)]
pub struct Session {
    token: Option<String>,
    data_dir: PathBuf,
}

impl Session {
    /// Restore the session from `<data_dir>/session`, absent when the file
    /// is missing or empty.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = session_path(data_dir);
        let token = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        } else {
            None
        };

        Ok(Self {
            token,
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// The current bearer token, if logged in.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The token, or `NotLoggedIn` for operations that require auth.
    pub fn require_token(&self) -> Result<&str> {
        self.token.as_deref().ok_or(Error::NotLoggedIn)
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Persist a new token (successful login).
    pub fn store(&mut self, token: String) -> Result<()> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(Error::Validation("token cannot be empty".to_string()));
        }
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::write(session_path(&self.data_dir), format!("{token}\n"))?;
        self.token = Some(token);
        Ok(())
    }

    /// Drop the session (logout). Removing an already-absent file is fine.
    pub fn clear(&mut self) -> Result<()> {
        let path = session_path(&self.data_dir);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        self.token = None;
        Ok(())
    }
}

fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILENAME)
}
