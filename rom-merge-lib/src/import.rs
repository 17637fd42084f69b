//! Import pipeline: discover, classify, store.

use std::collections::BTreeSet;
use std::path::Path;

use rusqlite::Connection;
use serde::Serialize;

use rom_merge_catalog::{Catalog, CatalogBuilder, GroupingKey};
use rom_merge_db::{ImportLog, insert_record, last_import_grouping, load_records, log_import, reset_catalog};

use crate::discovery::{discover, slash_path};
use crate::error::ImportError;
use crate::progress::ImportProgress;
use crate::settings::Settings;

/// Counters for one import run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub collections: usize,
    /// Files accepted by the discovery filter.
    pub processed: usize,
    /// Files rejected by the discovery filter.
    pub skipped: usize,
    /// Accepted files whose name reduced to nothing.
    pub unidentified: usize,
    pub games: usize,
    pub multi_part_games: usize,
}

/// Replace the stored catalog with a fresh scan of `root`.
///
/// The reset, every insert and the import log entry share one transaction,
/// so a failed import leaves the previous catalog intact.
pub fn import_collections(
    conn: &mut Connection,
    root: &Path,
    settings: &Settings,
    progress: &dyn ImportProgress,
) -> Result<ImportStats, ImportError> {
    let filter = settings.discovery_filter()?;
    let classifier = settings.classifier()?;
    let grouping = settings.catalog.grouping;

    let discovery = discover(root, &filter, progress)?;

    let mut stats = ImportStats {
        collections: discovery.collections.len(),
        processed: discovery.records.len(),
        skipped: discovery.skipped,
        ..Default::default()
    };
    let mut games = BTreeSet::new();
    let mut multi_part_games = BTreeSet::new();

    let tx = conn.transaction()?;
    reset_catalog(&tx)?;

    for raw in &discovery.records {
        let Some(record) = classifier.classify(raw) else {
            log::debug!("No identity for {}", raw.path);
            progress.on_unidentified(&raw.path);
            stats.unidentified += 1;
            continue;
        };
        if record.is_multi_part {
            multi_part_games.insert(record.clean_name.clone());
        }
        games.insert(record.clean_name.clone());
        insert_record(&tx, &record, grouping)?;
    }

    stats.games = games.len();
    stats.multi_part_games = multi_part_games.len();

    log_import(
        &tx,
        &ImportLog {
            id: None,
            source_root: slash_path(root),
            grouping: grouping.name().to_string(),
            imported_at: chrono::Utc::now().to_rfc3339(),
            collections: stats.collections as i64,
            files_processed: stats.processed as i64,
            files_skipped: stats.skipped as i64,
            files_unidentified: stats.unidentified as i64,
            games: stats.games as i64,
            multi_part_games: stats.multi_part_games as i64,
        },
    )?;
    tx.commit()?;

    progress.on_complete(&stats);
    Ok(stats)
}

/// Grouping to rebuild the catalog with: the one the store was imported
/// with, falling back to the configured one.
pub fn stored_grouping(conn: &Connection, settings: &Settings) -> Result<GroupingKey, ImportError> {
    let configured = settings.catalog.grouping;
    match last_import_grouping(conn)? {
        Some(stored) if stored != configured => {
            log::warn!(
                "Catalog was imported with grouping '{stored}' but settings say '{configured}'; using '{stored}'. Re-run import to apply the new grouping."
            );
            Ok(stored)
        }
        Some(stored) => Ok(stored),
        None => Ok(configured),
    }
}

/// Rebuild the in-memory catalog from the store.
///
/// Records keep the priorities computed at import time.
pub fn load_catalog(conn: &Connection, settings: &Settings) -> Result<Catalog, ImportError> {
    let grouping = stored_grouping(conn, settings)?;
    let mut builder = CatalogBuilder::new(grouping, settings.classifier()?);
    for record in load_records(conn)? {
        builder.add_classified(record);
    }
    Ok(builder.build())
}

#[cfg(test)]
#[path = "tests/import_tests.rs"]
mod tests;
