//! Session repository: the two locally persisted values (current user and
//! active shift marker) behind a `load` / `save` / `clear` abstraction with a
//! single owner, [`Session`].

pub mod memory;
pub mod sqlite;

pub use memory::MemorySessionStore;
pub use sqlite::SqliteSessionStore;

use crate::errors::AppResult;
use crate::models::{ActiveSession, User};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    CurrentUser,
    ActiveShift,
}

impl SessionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::CurrentUser => "shifttrack_auth_user",
            SessionKey::ActiveShift => "shifttrack_active_session_v1",
        }
    }
}

pub trait SessionRepository {
    fn load(&self, key: SessionKey) -> AppResult<Option<String>>;
    fn save(&mut self, key: SessionKey, value: &str) -> AppResult<()>;
    fn clear(&mut self, key: SessionKey) -> AppResult<()>;

    /// Append a line to the operation log, when the store keeps one.
    fn audit(&mut self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

/// Typed access to the session values.
pub struct Session<R: SessionRepository> {
    repo: R,
}

impl<R: SessionRepository> Session<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn current_user(&self) -> AppResult<Option<User>> {
        self.load_json(SessionKey::CurrentUser)
    }

    pub fn set_current_user(&mut self, user: &User) -> AppResult<()> {
        self.save_json(SessionKey::CurrentUser, user)
    }

    pub fn active_shift(&self) -> AppResult<Option<ActiveSession>> {
        self.load_json(SessionKey::ActiveShift)
    }

    pub fn set_active_shift(&mut self, marker: &ActiveSession) -> AppResult<()> {
        self.save_json(SessionKey::ActiveShift, marker)
    }

    pub fn clear_active_shift(&mut self) -> AppResult<()> {
        self.repo.clear(SessionKey::ActiveShift)
    }

    /// Forget both the user and any active shift marker.
    pub fn logout(&mut self) -> AppResult<()> {
        self.repo.clear(SessionKey::CurrentUser)?;
        self.repo.clear(SessionKey::ActiveShift)
    }

    /// Best-effort operation log line; a failing log never fails the caller.
    pub fn audit(&mut self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.repo.audit(operation, target, message) {
            warn!(operation, error = %e, "failed to write internal log");
        }
    }

    /// Unreadable values count as absent.
    fn load_json<T: DeserializeOwned>(&self, key: SessionKey) -> AppResult<Option<T>> {
        let Some(raw) = self.repo.load(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "ignoring unreadable session value");
                Ok(None)
            }
        }
    }

    fn save_json<T: Serialize>(&mut self, key: SessionKey, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.repo.save(key, &raw)
    }
}
