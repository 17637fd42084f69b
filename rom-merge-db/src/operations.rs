//! Write operations: catalog records and import runs.

use rom_merge_catalog::GroupingKey;
use rom_merge_core::ClassifiedRecord;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid stored value in {column}: '{value}'")]
    InvalidValue { column: String, value: String },
}

/// Row ids touched by [`insert_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordIds {
    pub game_id: i64,
    pub version_id: i64,
    pub part_id: i64,
}

/// One import run, as stored in `import_log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLog {
    pub id: Option<i64>,
    pub source_root: String,
    pub grouping: String,
    /// RFC 3339 timestamp.
    pub imported_at: String,
    pub collections: i64,
    pub files_processed: i64,
    pub files_skipped: i64,
    pub files_unidentified: i64,
    pub games: i64,
    pub multi_part_games: i64,
}

// ── Catalog Records ─────────────────────────────────────────────────────────

/// Remove every game, version and part. The import log is kept.
pub fn reset_catalog(conn: &Connection) -> Result<(), OperationError> {
    conn.execute_batch(
        "DELETE FROM game_parts;
         DELETE FROM game_versions;
         DELETE FROM games;",
    )?;
    Ok(())
}

fn upsert_game(conn: &Connection, clean_name: &str) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO games (clean_name) VALUES (?1)
         ON CONFLICT(clean_name) DO NOTHING",
        params![clean_name],
    )?;
    let id = conn.query_row(
        "SELECT id FROM games WHERE clean_name = ?1",
        params![clean_name],
        |row| row.get(0),
    )?;
    Ok(id)
}

fn upsert_version(
    conn: &Connection,
    game_id: i64,
    record: &ClassifiedRecord,
    grouping: GroupingKey,
) -> Result<i64, OperationError> {
    let region_key = if grouping.tracks_region() {
        record.region.as_str()
    } else {
        ""
    };

    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM game_versions
             WHERE game_id = ?1 AND collection = ?2 AND format = ?3 AND region = ?4",
            params![game_id, record.collection, record.format, region_key],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }

    conn.execute(
        "INSERT INTO game_versions (game_id, collection, format, format_priority, region, region_priority)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            game_id,
            record.collection,
            record.format,
            record.format_priority,
            region_key,
            record.region_priority,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert one classified record, creating its game and version if needed.
///
/// The version's region column holds the grouping key's region (empty when
/// the grouping ignores region); each part keeps its own region.
pub fn insert_record(
    conn: &Connection,
    record: &ClassifiedRecord,
    grouping: GroupingKey,
) -> Result<RecordIds, OperationError> {
    let game_id = upsert_game(conn, &record.clean_name)?;
    let version_id = upsert_version(conn, game_id, record, grouping)?;

    conn.execute(
        "INSERT INTO game_parts (version_id, part_number, is_multi_part, region, region_priority,
             source_path, original_name)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            version_id,
            record.part_number,
            record.is_multi_part,
            record.region,
            record.region_priority,
            record.source_path,
            record.original_name,
        ],
    )?;

    Ok(RecordIds {
        game_id,
        version_id,
        part_id: conn.last_insert_rowid(),
    })
}

/// Insert many records in a single transaction. Returns the number inserted.
pub fn insert_records(
    conn: &mut Connection,
    records: &[ClassifiedRecord],
    grouping: GroupingKey,
) -> Result<usize, OperationError> {
    let tx = conn.transaction()?;
    for record in records {
        insert_record(&tx, record, grouping)?;
    }
    tx.commit()?;
    Ok(records.len())
}

// ── Import Log ──────────────────────────────────────────────────────────────

/// Record an import run.
pub fn log_import(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_root, grouping, imported_at, collections,
             files_processed, files_skipped, files_unidentified, games, multi_part_games)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            log.source_root,
            log.grouping,
            log.imported_at,
            log.collections,
            log.files_processed,
            log.files_skipped,
            log.files_unidentified,
            log.games,
            log.multi_part_games,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
