//! SQLite connection wrapper (one connection per CLI invocation).

use rusqlite::{Connection, Result, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        Self::with_busy_timeout(path, DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Open the database, waiting up to `busy_timeout_ms` for competing
    /// writers instead of failing with `SQLITE_BUSY`.
    pub fn with_busy_timeout(path: &str, busy_timeout_ms: u64) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Start a write transaction that takes the database write lock up
    /// front. Every read-then-append sequence on the ledger goes through
    /// here so two processes cannot interleave between read and append.
    pub fn write_tx(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
    }
}
