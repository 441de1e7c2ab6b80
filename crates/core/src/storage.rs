//! SQLite storage setup.
//!
//! Opening a database configures pragmas and makes sure the `patients` table and the
//! `schema_version` marker exist. Both steps are idempotent, so they run on every startup.
//! There is no migration path: a database stamped with a newer version than this build
//! understands is refused rather than guessed at.

use crate::constants::SCHEMA_VERSION;
use crate::{RegistryError, RegistryResult};
use rusqlite::{params, Connection};
use std::path::Path;

const SCHEMA_V1: &str = include_str!("../resources/schema_v1.sql");

/// Open a SQLite connection to the given path and initialise the schema.
pub fn open_database(path: &Path) -> RegistryResult<Connection> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    initialise_schema(&conn)?;
    tracing::info!("opened patient database at {}", path.display());
    Ok(conn)
}

/// Open an in-memory database with the same schema (for tests).
pub fn open_memory_database() -> RegistryResult<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    initialise_schema(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> RegistryResult<()> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Create the schema if absent and stamp the version marker.
///
/// A database created by an older, unversioned build already has a `patients` table; it is
/// left untouched and only gains the marker.
pub fn initialise_schema(conn: &Connection) -> RegistryResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at TEXT NOT NULL
         );",
    )?;

    let current = schema_version(conn)?;
    if let Some(found) = current {
        if found > SCHEMA_VERSION {
            return Err(RegistryError::SchemaVersionMismatch {
                found,
                supported: SCHEMA_VERSION,
            });
        }
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(SCHEMA_V1)?;
    if current.is_none() {
        tracing::info!("initialising patient schema v{SCHEMA_VERSION}");
        tx.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?1, ?2)",
            params![SCHEMA_VERSION, chrono::Utc::now().to_rfc3339()],
        )?;
    }
    tx.commit()?;

    Ok(())
}

/// Current schema version, or `None` if the marker has never been written.
pub fn schema_version(conn: &Connection) -> RegistryResult<Option<i64>> {
    let version = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i64>>(0)
    })?;
    Ok(version)
}
