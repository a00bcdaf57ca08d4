//! Session storage and lookup.
//!
//! A local session is created with `scoopika login` and persisted in
//! `<data dir>/session.json`. Only the SHA-256 digest of the session token
//! is written to disk; browsers present the token itself in the
//! `scoopika.session-token` cookie.

use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "scoopika.session-token";

/// Errors from session lookup and persistence.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user: String,
    pub created_at: DateTime<Utc>,
}

/// On-disk record: the session plus its token digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    #[serde(flatten)]
    session: Session,
    token_sha256: String,
}

/// Result of reading `session.json`.
enum Stored {
    Missing,
    Valid(StoredSession),
    Malformed(String),
}

/// "Get the current session for this request."
pub trait SessionProvider: Send + Sync {
    fn current_session(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError>;
}

/// File-backed session store.
pub struct SessionStore {
    session_path: PathBuf,
}

impl SessionStore {
    /// Open the store in `data_dir`, creating the directory if needed.
    pub fn new(data_dir: &Path) -> Result<Self, SessionError> {
        std::fs::create_dir_all(data_dir).map_err(|source| SessionError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(Self {
            session_path: data_dir.join("session.json"),
        })
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    pub fn is_logged_in(&self) -> Result<bool, SessionError> {
        Ok(self.get_session()?.is_some())
    }

    /// Read the stored record without touching the file.
    fn read(&self) -> Result<Stored, SessionError> {
        if !self.session_path.exists() {
            return Ok(Stored::Missing);
        }

        let content =
            std::fs::read_to_string(&self.session_path).map_err(|source| SessionError::Io {
                path: self.session_path.clone(),
                source,
            })?;

        Ok(match serde_json::from_str::<StoredSession>(&content) {
            Ok(stored) if !stored.session.user.is_empty() && !stored.token_sha256.is_empty() => {
                Stored::Valid(stored)
            }
            Ok(_) => Stored::Malformed("missing required fields".to_string()),
            Err(e) => Stored::Malformed(e.to_string()),
        })
    }

    /// The stored session, if any. A malformed session file is removed.
    pub fn get_session(&self) -> Result<Option<Session>, SessionError> {
        match self.read()? {
            Stored::Valid(stored) => Ok(Some(stored.session)),
            Stored::Missing => Ok(None),
            Stored::Malformed(reason) => {
                warn!("Session validation failed ({}), removing session file", reason);
                self.remove_session()?;
                Ok(None)
            }
        }
    }

    /// The stored session if `token` is its token.
    ///
    /// Never modifies the session file: an unreadable record just means no
    /// session for this request.
    pub fn session_for_token(&self, token: &str) -> Result<Option<Session>, SessionError> {
        let stored = match self.read()? {
            Stored::Valid(stored) => stored,
            Stored::Missing => return Ok(None),
            Stored::Malformed(reason) => {
                warn!("Ignoring malformed session file: {}", reason);
                return Ok(None);
            }
        };

        let digest = token_digest(token);
        Ok((stored.token_sha256 == digest).then_some(stored.session))
    }

    /// Create a new session for `user`, replacing any existing one.
    ///
    /// Returns the session and its token. The token is not recoverable later.
    /// The record is written to a temporary file and renamed into place, so
    /// readers see either the old session or the new one.
    pub fn create_session(&self, user: &str) -> Result<(Session, String), SessionError> {
        let token = generate_token();
        let session = Session {
            id: Uuid::new_v4(),
            user: user.to_string(),
            created_at: Utc::now(),
        };
        let stored = StoredSession {
            session: session.clone(),
            token_sha256: token_digest(&token),
        };

        let content = serde_json::to_string_pretty(&stored)?;
        let tmp_path = self
            .session_path
            .with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()));
        std::fs::write(&tmp_path, content).map_err(|source| SessionError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        if let Err(source) = std::fs::rename(&tmp_path, &self.session_path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(SessionError::Io {
                path: self.session_path.clone(),
                source,
            });
        }

        info!("Session created for {}", user);
        debug!("Session saved to {:?}", self.session_path);

        Ok((session, token))
    }

    pub fn remove_session(&self) -> Result<(), SessionError> {
        if self.session_path.exists() {
            std::fs::remove_file(&self.session_path).map_err(|source| SessionError::Io {
                path: self.session_path.clone(),
                source,
            })?;
            info!("Session removed successfully");
        }

        Ok(())
    }
}

impl SessionProvider for SessionStore {
    fn current_session(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError> {
        match session_cookie(headers) {
            Some(token) => self.session_for_token(token),
            None => Ok(None),
        }
    }
}

/// Extract the session token from the request's cookies.
pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// 32 random bytes, base64url encoded.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
