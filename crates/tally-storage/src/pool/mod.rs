//! SQLite connection management.
//!
//! One mutex-guarded write connection, a small set of read-only
//! connections served round-robin, and batch-aware routing: while a batch
//! transaction is open its uncommitted rows exist only on the writer, so
//! every read is served there until commit or rollback.

pub mod pragmas;
pub mod write_connection;

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};
use tracing::warn;

use tally_core::TallyResult;

use crate::to_store_err;
use pragmas::{apply_read_pragmas, verify_wal_mode};

pub use write_connection::WriteConnection;

/// Reader count used when the caller has no opinion.
pub const DEFAULT_READERS: usize = 4;

/// Read connections beyond this buy nothing on a single database file.
const MAX_READERS: usize = 8;

pub struct ConnectionPool {
    writer: WriteConnection,
    readers: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
    batch_open: AtomicBool,
}

impl ConnectionPool {
    /// Open a file-backed pool with `reader_count` read-only connections,
    /// clamped to 1..=8.
    pub fn open(path: &Path, reader_count: usize) -> TallyResult<Self> {
        let writer = WriteConnection::open(path)?;
        writer.with_conn(|conn| {
            if !verify_wal_mode(conn)? {
                warn!(path = %path.display(), "journal_mode is not WAL, readers may block");
            }
            Ok(())
        })?;
        let mut readers = Vec::new();
        for _ in 0..reader_count.clamp(1, MAX_READERS) {
            readers.push(Mutex::new(open_reader(path)?));
        }
        Ok(Self {
            writer,
            readers,
            cursor: AtomicUsize::new(0),
            batch_open: AtomicBool::new(false),
        })
    }

    /// In-memory pool for tests. Carries no readers at all: a second
    /// in-memory connection would be a separate database, so reads are
    /// served by the writer.
    pub fn open_in_memory() -> TallyResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory()?,
            readers: Vec::new(),
            cursor: AtomicUsize::new(0),
            batch_open: AtomicBool::new(false),
        })
    }

    /// Run a read closure. Round-robin across the readers, except while a
    /// batch is open or the pool has no readers, when the writer serves it.
    pub fn read<F, T>(&self, f: F) -> TallyResult<T>
    where
        F: FnOnce(&Connection) -> TallyResult<T>,
    {
        if self.readers.is_empty() || self.batch_open.load(Ordering::Acquire) {
            return self.writer.with_conn(f);
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let guard = self.readers[idx]
            .lock()
            .map_err(|e| to_store_err(format!("reader lock poisoned: {e}")))?;
        f(&guard)
    }

    /// Run a write closure on the single write connection.
    pub fn write<F, T>(&self, f: F) -> TallyResult<T>
    where
        F: FnOnce(&Connection) -> TallyResult<T>,
    {
        self.writer.with_conn(f)
    }

    /// Open a batch transaction on the writer. Until the matching commit
    /// or rollback, all reads route to the writer so the batch observes
    /// its own writes.
    pub fn begin_batch(&self) -> TallyResult<()> {
        self.writer.with_conn(|conn| {
            conn.execute_batch("BEGIN IMMEDIATE")
                .map_err(|e| to_store_err(e.to_string()))
        })?;
        self.batch_open.store(true, Ordering::Release);
        Ok(())
    }

    pub fn commit_batch(&self) -> TallyResult<()> {
        self.writer.with_conn(|conn| {
            conn.execute_batch("COMMIT")
                .map_err(|e| to_store_err(e.to_string()))
        })?;
        self.batch_open.store(false, Ordering::Release);
        Ok(())
    }

    pub fn rollback_batch(&self) -> TallyResult<()> {
        let result = self.writer.with_conn(|conn| {
            conn.execute_batch("ROLLBACK")
                .map_err(|e| to_store_err(e.to_string()))
        });
        self.batch_open.store(false, Ordering::Release);
        result
    }

    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }
}

fn open_reader(path: &Path) -> TallyResult<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    apply_read_pragmas(&conn)?;
    Ok(conn)
}
