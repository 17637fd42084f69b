//! SQLite schema creation and migration.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database schema version {found} is newer than supported version {expected}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
///
/// Version 1 predates region tracking: versions and parts had no region
/// columns.
pub const CURRENT_VERSION: i32 = 2;

/// Create all tables and indexes if they don't exist.
///
/// Idempotent; safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if get_schema_version(conn)? < CURRENT_VERSION {
        set_schema_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Open or create a catalog database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        migrate(&conn, version)?;
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Run migrations from `from_version` up to `CURRENT_VERSION`.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    let mut version = from_version;
    while version < CURRENT_VERSION {
        if version == 1 {
            conn.execute_batch(
                "ALTER TABLE game_versions ADD COLUMN region TEXT NOT NULL DEFAULT '';
                 ALTER TABLE game_versions ADD COLUMN region_priority INTEGER NOT NULL DEFAULT 0;
                 ALTER TABLE game_parts ADD COLUMN region TEXT NOT NULL DEFAULT '';
                 ALTER TABLE game_parts ADD COLUMN region_priority INTEGER NOT NULL DEFAULT 0;",
            )?;
        }
        version += 1;
        set_schema_version(conn, version)?;
    }

    // Pick up tables and indexes added since the old version.
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Logical games, one per clean name
CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY,
    clean_name TEXT NOT NULL UNIQUE
);

-- One copy of a game per collection/format(/region)
CREATE TABLE IF NOT EXISTS game_versions (
    id INTEGER PRIMARY KEY,
    game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
    collection TEXT NOT NULL,
    format TEXT NOT NULL,
    format_priority INTEGER NOT NULL DEFAULT 0,
    region TEXT NOT NULL DEFAULT '',
    region_priority INTEGER NOT NULL DEFAULT 0
);

-- Individual files
CREATE TABLE IF NOT EXISTS game_parts (
    id INTEGER PRIMARY KEY,
    version_id INTEGER NOT NULL REFERENCES game_versions(id) ON DELETE CASCADE,
    part_number INTEGER NOT NULL DEFAULT 0,
    is_multi_part BOOLEAN NOT NULL DEFAULT 0,
    region TEXT NOT NULL DEFAULT '',
    region_priority INTEGER NOT NULL DEFAULT 0,
    source_path TEXT NOT NULL,
    original_name TEXT NOT NULL
);

-- Import runs
CREATE TABLE IF NOT EXISTS import_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_root TEXT NOT NULL,
    grouping TEXT NOT NULL,
    imported_at TEXT NOT NULL,
    collections INTEGER NOT NULL DEFAULT 0,
    files_processed INTEGER NOT NULL DEFAULT 0,
    files_skipped INTEGER NOT NULL DEFAULT 0,
    files_unidentified INTEGER NOT NULL DEFAULT 0,
    games INTEGER NOT NULL DEFAULT 0,
    multi_part_games INTEGER NOT NULL DEFAULT 0
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_versions_identity
    ON game_versions (game_id, collection, format, region);
CREATE INDEX IF NOT EXISTS idx_versions_format_priority ON game_versions (format_priority);
CREATE INDEX IF NOT EXISTS idx_parts_version_id ON game_parts (version_id);
CREATE INDEX IF NOT EXISTS idx_parts_part_number ON game_parts (part_number);
"#;
