/*!
 * Versioned SQLite schema.
 *
 * Every schema change is one numbered migration. Opening a database applies
 * the migrations it has not seen yet, in order, inside a single transaction.
 */

use anyhow::{Context, Result, bail};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension};

/// Version a fully migrated database reports
pub const SCHEMA_VERSION: i32 = 1;

/// `(version, sql)` steps; `version` is what the database reports after the step
const MIGRATIONS: &[(i32, &str)] = &[(
    1,
    r#"
    CREATE TABLE phrases (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        lang TEXT NOT NULL,
        phrase TEXT NOT NULL,
        translation TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'ACTIVE' CHECK (status IN ('ACTIVE', 'ARCHIVED')),
        created_at TEXT NOT NULL
    );

    CREATE INDEX idx_phrases_lang_status ON phrases(lang, status);
    "#,
)];

/// Bring the schema of `conn` up to [`SCHEMA_VERSION`]
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    // WAL lets the export and import commands read while the bot writes
    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .context("Failed to set journal mode")?;
    debug!("Database journal mode: {}", mode);
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )?;

    let current = schema_version(conn)?;
    if current > SCHEMA_VERSION {
        bail!(
            "Database schema v{} is newer than this build supports (v{})",
            current,
            SCHEMA_VERSION
        );
    }
    if current == SCHEMA_VERSION {
        debug!("Database schema is up to date (v{})", current);
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        info!("Applying database migration v{}", version);
        tx.execute_batch(sql)
            .with_context(|| format!("Migration v{} failed", version))?;
        tx.execute(
            "INSERT OR REPLACE INTO schema_version (id, version, updated_at)
             VALUES (1, ?1, datetime('now'))",
            [version],
        )?;
    }
    tx.commit()?;

    Ok(())
}

/// Version recorded in the database; 0 for a fresh file
pub fn schema_version(conn: &Connection) -> Result<i32> {
    let version = conn
        .query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| {
            row.get(0)
        })
        .optional()
        .context("Failed to read schema version")?;
    Ok(version.unwrap_or(0))
}
