//! The single write connection. SQLite allows one writer at a time; funneling
//! every mutation through one mutex-guarded connection turns write contention
//! into queueing instead of SQLITE_BUSY churn.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use tally_core::TallyResult;

use super::pragmas::apply_pragmas;
use crate::to_store_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> TallyResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_store_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> TallyResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_store_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure against the write connection.
    pub fn with_conn<F, T>(&self, f: F) -> TallyResult<T>
    where
        F: FnOnce(&Connection) -> TallyResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_store_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
