//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! Generators never touch it; the caller saves what it wants kept.

use crate::{
    app_state::{AppState, PersistedState},
    error::{SimError, SimResult},
    snapshot::{ResultSet, StoredResultSet},
    types::RunId,
};
use rusqlite::{params, Connection, OptionalExtension};

/// Key under which the dashboard state is saved.
pub const UI_STATE_KEY: &str = "ui";

pub struct SimStore {
    conn: Connection,
}

impl SimStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        // WAL only matters for real files; in-memory databases ignore it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        log::info!("Opened store at {path}");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Key-value ──────────────────────────────────────────────

    pub fn get(&self, key: &str) -> SimResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn put(&self, key: &str, value: &str) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    // ── Application state ──────────────────────────────────────

    /// Load the saved dashboard state. A missing or unreadable record
    /// gives the defaults rather than an error.
    pub fn load_app_state(&self) -> SimResult<AppState> {
        let saved = match self.get(UI_STATE_KEY)? {
            Some(raw) => PersistedState::from_json(&raw),
            None => PersistedState::default(),
        };
        Ok(AppState::from_persisted(saved))
    }

    /// Save the persisted subset of the dashboard state.
    pub fn save_app_state(&self, state: &AppState) -> SimResult<()> {
        let json = serde_json::to_string(state.persisted())?;
        self.put(UI_STATE_KEY, &json)
    }

    // ── Result sets ────────────────────────────────────────────

    /// Persist a result set under a fresh run id. Returns the id.
    pub fn save_result_set(&self, results: &ResultSet) -> SimResult<RunId> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        let payload = serde_json::to_string(results)?;
        self.conn.execute(
            "INSERT INTO result_set (run_id, seed, created_at, payload) VALUES (?1, ?2, ?3, ?4)",
            params![run_id, results.seed.0, created_at, payload],
        )?;
        log::debug!("Saved result set {run_id}");
        Ok(run_id)
    }

    /// The most recently saved result set, if any.
    pub fn latest_result_set(&self) -> SimResult<Option<StoredResultSet>> {
        let row = self
            .conn
            .query_row(
                "SELECT run_id, created_at, payload FROM result_set
                 ORDER BY rowid DESC LIMIT 1",
                [],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)),
            )
            .optional()?;
        row.map(|(run_id, created_at, payload)| -> SimResult<StoredResultSet> {
            Ok(StoredResultSet {
                run_id,
                created_at,
                results: serde_json::from_str(&payload)?,
            })
        })
        .transpose()
    }

    pub fn load_result_set(&self, run_id: &str) -> SimResult<StoredResultSet> {
        let row = self
            .conn
            .query_row(
                "SELECT created_at, payload FROM result_set WHERE run_id = ?1",
                params![run_id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        let (created_at, payload) = row.ok_or_else(|| SimError::RunNotFound {
            run_id: run_id.to_string(),
        })?;
        Ok(StoredResultSet {
            run_id: run_id.to_string(),
            created_at,
            results: serde_json::from_str(&payload)?,
        })
    }

    pub fn result_set_count(&self) -> SimResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM result_set", [], |row| row.get(0))?;
        Ok(count)
    }
}
