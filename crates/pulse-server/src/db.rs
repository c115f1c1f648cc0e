//! SQLite persistence for generated random results.
//!
//! Rows are append-only. The connection sits behind a mutex, which serializes
//! every write.

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use pulse_core::{
    format_timestamp, now_millis, parse_timestamp, HistoryLimit, RandomResult, ResultStore,
    StoreError,
};
use rusqlite::{params, Connection};
use tracing::{debug, info};

/// Opens the database file, creating its directory and tables if needed.
pub fn init_db(path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).context("failed to create db directory")?;
    }
    let conn = Connection::open(path).context("failed to open database")?;
    create_schema(&conn)?;
    info!("Database initialized at {}", path);
    Ok(conn)
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS random_results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            value REAL NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_random_results_created_at
            ON random_results (created_at);",
    )
    .context("failed to create table")?;
    Ok(())
}

/// [`ResultStore`] backed by a single SQLite connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a file-backed store.
    pub fn open(path: &str) -> Result<Self> {
        Ok(Self::from_connection(init_db(path)?))
    }

    /// Creates a throwaway store that lives only as long as this value.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        create_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self { conn: Mutex::new(conn) }
    }

    /// Total number of persisted rows.
    pub fn count(&self) -> Result<i64, StoreError> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM random_results", [], |r| r.get(0))
            .map_err(backend)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Backend(format!("database lock poisoned: {}", e)))
    }
}

impl ResultStore for SqliteStore {
    fn create_random_result(&self, value: f64) -> Result<RandomResult, StoreError> {
        let created_at = now_millis();
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO random_results (value, created_at) VALUES (?1, ?2)",
            params![value, format_timestamp(&created_at)],
        )
        .map_err(backend)?;
        let id = conn.last_insert_rowid();
        debug!("Saved random result {} = {}", id, value);

        Ok(RandomResult { id, value, created_at })
    }

    fn list_recent(&self, limit: HistoryLimit) -> Result<Vec<RandomResult>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, value, created_at FROM random_results
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?1",
            )
            .map_err(backend)?;

        let rows = stmt
            .query_map(params![limit.get()], |row| {
                let id: i64 = row.get(0)?;
                let value: f64 = row.get(1)?;
                let created_at: String = row.get(2)?;
                Ok((id, value, created_at))
            })
            .map_err(backend)?;

        let mut results = Vec::new();
        for row in rows {
            let (id, value, created_at) = row.map_err(backend)?;
            let created_at = parse_timestamp(&created_at)
                .map_err(|e| StoreError::InvalidRow(format!("row {}: {}", id, e)))?;
            results.push(RandomResult { id, value, created_at });
        }
        Ok(results)
    }
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}
