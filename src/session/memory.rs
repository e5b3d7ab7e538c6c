use crate::errors::AppResult;
use crate::session::{SessionKey, SessionRepository};
use std::collections::HashMap;

/// In-memory session store for tests and one-shot invocations.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    values: HashMap<SessionKey, String>,
    pub audit_log: Vec<(String, String, String)>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for MemorySessionStore {
    fn load(&self, key: SessionKey) -> AppResult<Option<String>> {
        Ok(self.values.get(&key).cloned())
    }

    fn save(&mut self, key: SessionKey, value: &str) -> AppResult<()> {
        self.values.insert(key, value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: SessionKey) -> AppResult<()> {
        self.values.remove(&key);
        Ok(())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.audit_log
            .push((operation.into(), target.into(), message.into()));
        Ok(())
    }
}
