/// Schema versioning for the SQLite habit store
///
/// The `schema_version` table holds a single row. Each entry in `MIGRATIONS`
/// upgrades the schema by one version and runs at most once per database.

use rusqlite::Connection;
use crate::storage::StorageError;

type Migration = fn(&Connection) -> Result<(), StorageError>;

/// Upgrade steps, index 0 takes a fresh database to version 1
const MIGRATIONS: &[Migration] = &[habits_and_completions];

/// Schema version this build writes
const CURRENT_VERSION: i32 = MIGRATIONS.len() as i32;

/// Bring the database up to `CURRENT_VERSION`
///
/// Fails with `StorageError::Migration` when the file was written by a newer
/// build.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);")?;

    let found = get_current_version(conn)?;
    if found > CURRENT_VERSION {
        return Err(StorageError::Migration(format!(
            "schema version {} is newer than this build understands ({})",
            found, CURRENT_VERSION
        )));
    }

    for (step, migrate) in MIGRATIONS.iter().enumerate().skip(found as usize) {
        migrate(conn)?;
        tracing::info!("Migrated habit store to schema v{}", step + 1);
    }

    if found < CURRENT_VERSION {
        set_version(conn, CURRENT_VERSION)?;
    }

    Ok(())
}

fn get_current_version(conn: &Connection) -> Result<i32, StorageError> {
    match conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
        row.get::<_, i32>(0)
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(StorageError::Query(e)),
    }
}

fn set_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// v1: habit rows in display order, one row per completed day
fn habits_and_completions(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS habits (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            streak INTEGER NOT NULL DEFAULT 0,
            last_completed TEXT,
            reminder TEXT,
            created_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS habit_completions (
            habit_id TEXT NOT NULL,
            completed_on TEXT NOT NULL,
            PRIMARY KEY (habit_id, completed_on),
            FOREIGN KEY (habit_id) REFERENCES habits (id) ON DELETE CASCADE
        );
        CREATE INDEX IF NOT EXISTS idx_habits_position ON habits (position);",
    )?;
    Ok(())
}
