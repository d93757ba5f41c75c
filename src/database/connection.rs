/*!
 * SQLite connection handle.
 *
 * One connection per process, shared behind a mutex. Statements run on the
 * blocking thread pool so the message loop never waits on disk inside the
 * async runtime.
 */

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{Connection, Transaction};

use super::schema;

const DATA_DIR_NAME: &str = "vocabacov";
const DB_FILE_NAME: &str = "vocabacov.db";
const IN_MEMORY_PATH: &str = ":memory:";

/// Cloneable handle to the phrase database
///
/// Every statement goes through the same mutex, so a status update for a
/// language is never interleaved with a read of that language.
#[derive(Clone)]
pub struct DatabaseConnection {
    path: PathBuf,
    conn: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Open (or create) the database file at `path` and migrate it
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create database directory: {:?}", dir))?;
        }

        info!("Opening database at: {:?}", path);
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database: {:?}", path))?;
        Self::wrap(path, conn)
    }

    /// Private in-memory database, gone when the last handle drops
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory database");
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        Self::wrap(PathBuf::from(IN_MEMORY_PATH), conn)
    }

    fn wrap(path: PathBuf, conn: Connection) -> Result<Self> {
        schema::initialize_schema(&conn)
            .with_context(|| format!("Failed to prepare schema of {:?}", path))?;
        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// `<user data dir>/vocabacov/vocabacov.db`
    pub fn default_database_path() -> Result<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
            .context("Could not determine data directory")?;
        Ok(base.join(DATA_DIR_NAME).join(DB_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against the connection on the blocking pool
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || f(&conn.lock()))
            .await
            .context("Database task panicked")?
    }

    /// Run `f` inside a transaction; any error rolls everything back
    pub async fn run_in_transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock();
            let tx = guard.transaction()?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        })
        .await
        .context("Database transaction task panicked")?
    }

    /// Phrase counts for the startup log
    pub async fn stats(&self) -> Result<DatabaseStats> {
        self.run(|conn| {
            let stats = conn.query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(status = 'ACTIVE'), 0),
                        COUNT(DISTINCT lang)
                 FROM phrases",
                [],
                |row| {
                    Ok(DatabaseStats {
                        total_phrases: row.get(0)?,
                        active_phrases: row.get(1)?,
                        languages: row.get(2)?,
                    })
                },
            )?;
            Ok(stats)
        })
        .await
    }
}

/// Phrase counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseStats {
    pub total_phrases: i64,
    /// Phrases waiting for export
    pub active_phrases: i64,
    pub languages: i64,
}

impl fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} phrases ({} active) in {} languages",
            self.total_phrases, self.active_phrases, self.languages
        )
    }
}
