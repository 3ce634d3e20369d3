//! Database connection management.
//!
//! One SQLite file per data directory holds both the conversation log and
//! the product catalog. The connection lives behind a Mutex and is shared
//! by every request handler.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use tracing::info;

use quickcart_core::error::QuickCartError;

use crate::migrations;

/// File name of the database inside the data directory.
pub const DB_FILE_NAME: &str = "chatbot.db";

/// Thread-safe SQLite database wrapper.
///
/// The connection is wrapped in a Mutex since rusqlite Connection is not Sync.
pub struct Database {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) `chatbot.db` inside `data_dir`.
    pub fn open_in_dir(data_dir: &Path) -> Result<Self, QuickCartError> {
        Self::new(&data_dir.join(DB_FILE_NAME))
    }

    /// Open (or create) a database at the given path.
    ///
    /// Configures WAL mode and a busy timeout, then runs all pending
    /// migrations.
    pub fn new(path: &Path) -> Result<Self, QuickCartError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| QuickCartError::Storage(format!("Failed to open database: {}", e)))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| QuickCartError::Storage(format!("Failed to set pragmas: {}", e)))?;

        // Another process (e.g. a seeding run) may hold the write lock briefly.
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(|e| QuickCartError::Storage(format!("Failed to set busy timeout: {}", e)))?;

        info!("Database opened at {}", path.display());

        Self::with_migrations(conn, Some(path.to_path_buf()))
    }

    /// Open an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, QuickCartError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            QuickCartError::Storage(format!("Failed to open in-memory db: {}", e))
        })?;

        Self::with_migrations(conn, None)
    }

    fn with_migrations(conn: Connection, path: Option<PathBuf>) -> Result<Self, QuickCartError> {
        register_functions(&conn)?;
        let db = Self {
            conn: Mutex::new(conn),
            path,
        };
        db.with_conn(migrations::run_migrations)?;
        Ok(db)
    }

    /// Execute a closure with a reference to the underlying connection.
    ///
    /// The mutex is held for the duration of the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, QuickCartError>
    where
        F: FnOnce(&Connection) -> Result<T, QuickCartError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| QuickCartError::Storage(format!("Database lock poisoned: {}", e)))?;
        f(&conn)
    }

    /// Location of the database file, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// SQL functions the repositories rely on.
///
/// `unicode_lower(text)` lowercases with full Unicode case mapping; the
/// built-in `lower()` only folds ASCII.
fn register_functions(conn: &Connection) -> Result<(), QuickCartError> {
    conn.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: String = ctx.get(0)?;
            Ok(text.to_lowercase())
        },
    )
    .map_err(|e| QuickCartError::Storage(format!("Failed to register SQL functions: {}", e)))
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path)
            .finish()
    }
}
