use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::session::{SessionKey, SessionRepository};
use chrono::Local;
use rusqlite::{OptionalExtension, params};

/// Session values kept in the `session_store` table of the local database.
pub struct SqliteSessionStore {
    pool: DbPool,
}

impl SqliteSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self::new(DbPool::open_initialized(path)?))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl SessionRepository for SqliteSessionStore {
    fn load(&self, key: SessionKey) -> AppResult<Option<String>> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("SELECT value FROM session_store WHERE key = ?1")?;
        let value = stmt
            .query_row([key.as_str()], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: SessionKey, value: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO session_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key.as_str(), value, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn clear(&mut self, key: SessionKey) -> AppResult<()> {
        self.pool
            .conn
            .execute("DELETE FROM session_store WHERE key = ?1", [key.as_str()])?;
        Ok(())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.pool.conn, operation, target, message)
    }
}
