//! Read queries over the catalog tables.

use rom_merge_catalog::GroupingKey;
use rom_merge_core::ClassifiedRecord;
use rusqlite::{Connection, OptionalExtension};

use crate::operations::{ImportLog, OperationError};

// ── Best Versions ───────────────────────────────────────────────────────────

/// A file of a stored version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPart {
    pub part_number: u32,
    pub source_path: String,
    pub original_name: String,
}

/// The top-ranked version of one game according to SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestVersion {
    pub clean_name: String,
    pub collection: String,
    pub format: String,
    pub format_priority: u32,
    pub region: String,
    pub region_priority: u32,
    /// Ascending part number, then insertion order.
    pub parts: Vec<StoredPart>,
}

/// Rank every game's versions in SQL and return the winners.
///
/// Uses the same ordering as the in-memory selector: format priority,
/// region priority (only when `grouping` tracks region), collection, with
/// format and region as final tie-breakers.
pub fn best_versions(
    conn: &Connection,
    grouping: GroupingKey,
) -> Result<Vec<BestVersion>, OperationError> {
    let region_order = if grouping.tracks_region() {
        "v.region_priority DESC,"
    } else {
        ""
    };
    let sql = format!(
        "WITH ranked AS (
             SELECT g.clean_name, v.id AS version_id, v.collection, v.format,
                    v.format_priority, v.region, v.region_priority,
                    ROW_NUMBER() OVER (
                        PARTITION BY g.id
                        ORDER BY v.format_priority DESC, {region_order}
                                 v.collection ASC, v.format ASC, v.region ASC
                    ) AS rn
             FROM games g
             JOIN game_versions v ON v.game_id = g.id
         )
         SELECT r.clean_name, r.collection, r.format, r.format_priority, r.region,
                r.region_priority, p.part_number, p.source_path, p.original_name
         FROM ranked r
         JOIN game_parts p ON p.version_id = r.version_id
         WHERE r.rn = 1
         ORDER BY r.clean_name, p.part_number, p.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            BestVersion {
                clean_name: row.get(0)?,
                collection: row.get(1)?,
                format: row.get(2)?,
                format_priority: row.get(3)?,
                region: row.get(4)?,
                region_priority: row.get(5)?,
                parts: Vec::new(),
            },
            StoredPart {
                part_number: row.get(6)?,
                source_path: row.get(7)?,
                original_name: row.get(8)?,
            },
        ))
    })?;

    let mut best: Vec<BestVersion> = Vec::new();
    for row in rows {
        let (version, part) = row?;
        match best.last_mut() {
            Some(last) if last.clean_name == version.clean_name => last.parts.push(part),
            _ => {
                let mut version = version;
                version.parts.push(part);
                best.push(version);
            }
        }
    }
    Ok(best)
}

// ── Records ─────────────────────────────────────────────────────────────────

/// Every stored file as a classified record, in insertion order.
pub fn load_records(conn: &Connection) -> Result<Vec<ClassifiedRecord>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT p.source_path, p.original_name, g.clean_name, v.format, v.format_priority,
                p.region, p.region_priority, v.collection, p.is_multi_part, p.part_number
         FROM game_parts p
         JOIN game_versions v ON v.id = p.version_id
         JOIN games g ON g.id = v.game_id
         ORDER BY p.id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(ClassifiedRecord {
            source_path: row.get(0)?,
            original_name: row.get(1)?,
            clean_name: row.get(2)?,
            format: row.get(3)?,
            format_priority: row.get(4)?,
            region: row.get(5)?,
            region_priority: row.get(6)?,
            collection: row.get(7)?,
            is_multi_part: row.get(8)?,
            part_number: row.get(9)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Summary statistics for the stored catalog.
#[derive(Debug, Default)]
pub struct CatalogStats {
    pub games: i64,
    pub versions: i64,
    pub parts: i64,
    pub collections: i64,
    pub multi_part_games: i64,
    /// Part count per format, most common first.
    pub by_format: Vec<(String, i64)>,
}

pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let games: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0))?;
    let versions: i64 = conn.query_row("SELECT COUNT(*) FROM game_versions", [], |r| r.get(0))?;
    let parts: i64 = conn.query_row("SELECT COUNT(*) FROM game_parts", [], |r| r.get(0))?;
    let collections: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT collection) FROM game_versions",
        [],
        |r| r.get(0),
    )?;
    let multi_part_games: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT v.game_id)
         FROM game_parts p JOIN game_versions v ON v.id = p.version_id
         WHERE p.is_multi_part = 1",
        [],
        |r| r.get(0),
    )?;

    let mut stmt = conn.prepare(
        "SELECT v.format, COUNT(*) AS n
         FROM game_parts p JOIN game_versions v ON v.id = p.version_id
         GROUP BY v.format ORDER BY n DESC, v.format ASC",
    )?;
    let by_format = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CatalogStats {
        games,
        versions,
        parts,
        collections,
        multi_part_games,
        by_format,
    })
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// Most recent import runs first.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, source_root, grouping, imported_at, collections, files_processed,
                files_skipped, files_unidentified, games, multi_part_games
         FROM import_log ORDER BY id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source_root: row.get(1)?,
            grouping: row.get(2)?,
            imported_at: row.get(3)?,
            collections: row.get(4)?,
            files_processed: row.get(5)?,
            files_skipped: row.get(6)?,
            files_unidentified: row.get(7)?,
            games: row.get(8)?,
            multi_part_games: row.get(9)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Grouping used by the most recent import, if any import was logged.
pub fn last_import_grouping(conn: &Connection) -> Result<Option<GroupingKey>, OperationError> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT grouping FROM import_log ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    stored
        .map(|value| {
            value.parse::<GroupingKey>().map_err(|_| OperationError::InvalidValue {
                column: "import_log.grouping".to_string(),
                value,
            })
        })
        .transpose()
}
