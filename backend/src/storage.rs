//! Round store: persistence of the secret between page render and guess check.
//!
//! Layout: one table, one column.
//!
//! ```sql
//! CREATE TABLE round_secrets (number INTEGER NOT NULL)
//! ```
//!
//! Insertion order comes from SQLite's implicit `rowid`, so `read` returns the
//! newest record. Every operation takes the connection through a scoped lock
//! guard; the guard is dropped on all exit paths, including `?` returns.

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use crate::constants::IN_MEMORY_DB_PATH;
use crate::error::StoreError;
use crate::types::RetentionPolicy;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS round_secrets (number INTEGER NOT NULL);";

/// Persistence boundary for the current round's secret.
///
/// Implementations are shared across request handlers as `Arc<dyn RoundStore>`.
pub trait RoundStore: Send + Sync {
    /// Persist a new secret. Older records are kept or dropped per the
    /// store's [`RetentionPolicy`].
    fn save(&self, secret: i64) -> Result<(), StoreError>;

    /// Most recently saved secret, if any record exists.
    fn read(&self) -> Result<Option<i64>, StoreError>;

    /// Delete every record.
    fn clear(&self) -> Result<(), StoreError>;

    /// Read the newest secret and delete every record under one lock
    /// acquisition. A `save` or `take` from another thread lands either
    /// wholly before or wholly after.
    fn take(&self) -> Result<Option<i64>, StoreError>;

    /// Number of live records.
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

// ── SQLite ──────────────────────────────────────────────────────────

pub struct SqliteRoundStore {
    conn: Mutex<Connection>,
    retention: RetentionPolicy,
}

impl SqliteRoundStore {
    /// Open (or create) the database at `path`. The path `:memory:` opens a
    /// private in-memory database. Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>, retention: RetentionPolicy) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if path == Path::new(IN_MEMORY_DB_PATH) {
            return Self::open_in_memory(retention);
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opening round store");
        Self::with_connection(Connection::open(path)?, retention)
    }

    pub fn open_in_memory(retention: RetentionPolicy) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, retention)
    }

    fn with_connection(conn: Connection, retention: RetentionPolicy) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            retention,
        })
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn newest(conn: &Connection) -> Result<Option<i64>, StoreError> {
    let secret = conn
        .query_row(
            "SELECT number FROM round_secrets ORDER BY rowid DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(secret)
}

fn count_rows(conn: &Connection) -> Result<usize, StoreError> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM round_secrets", [], |row| row.get(0))?;
    Ok(n as usize)
}

impl RoundStore for SqliteRoundStore {
    fn save(&self, secret: i64) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        match self.retention {
            RetentionPolicy::Accumulate => {
                let unread = count_rows(&conn)?;
                if unread > 0 {
                    warn!(unread, "saving secret over unverified rounds");
                }
                conn.execute("INSERT INTO round_secrets (number) VALUES (?1)", params![secret])?;
            }
            RetentionPolicy::Replace => {
                let tx = conn.transaction()?;
                tx.execute("DELETE FROM round_secrets", [])?;
                tx.execute("INSERT INTO round_secrets (number) VALUES (?1)", params![secret])?;
                tx.commit()?;
            }
        }
        Ok(())
    }

    fn read(&self) -> Result<Option<i64>, StoreError> {
        let conn = self.conn()?;
        newest(&conn)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM round_secrets", [])?;
        Ok(())
    }

    fn take(&self) -> Result<Option<i64>, StoreError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let secret = newest(&tx)?;
        tx.execute("DELETE FROM round_secrets", [])?;
        tx.commit()?;
        Ok(secret)
    }

    fn len(&self) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        count_rows(&conn)
    }
}

// ── In-memory ───────────────────────────────────────────────────────

/// Process-local store with the same semantics as [`SqliteRoundStore`].
#[derive(Default)]
pub struct MemoryRoundStore {
    records: Mutex<Vec<i64>>,
    retention: RetentionPolicy,
}

impl MemoryRoundStore {
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            retention,
        }
    }

    fn records(&self) -> Result<MutexGuard<'_, Vec<i64>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl RoundStore for MemoryRoundStore {
    fn save(&self, secret: i64) -> Result<(), StoreError> {
        let mut records = self.records()?;
        match self.retention {
            RetentionPolicy::Accumulate => {
                if !records.is_empty() {
                    warn!(unread = records.len(), "saving secret over unverified rounds");
                }
            }
            RetentionPolicy::Replace => records.clear(),
        }
        records.push(secret);
        Ok(())
    }

    fn read(&self) -> Result<Option<i64>, StoreError> {
        Ok(self.records()?.last().copied())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.records()?.clear();
        Ok(())
    }

    fn take(&self) -> Result<Option<i64>, StoreError> {
        let mut records = self.records()?;
        let secret = records.last().copied();
        records.clear();
        Ok(secret)
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records()?.len())
    }
}
