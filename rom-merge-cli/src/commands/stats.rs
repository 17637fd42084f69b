use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_merge_lib::Settings;

use super::{db_path, open_existing_catalog};
use crate::CliError;

pub(crate) fn run_stats(settings: &Settings, db: Option<PathBuf>) -> Result<(), CliError> {
    let db_path = db_path(settings, db);
    let Some(conn) = open_existing_catalog(&db_path)? else {
        return Ok(());
    };

    let stats = rom_merge_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Games:            {:>8}", stats.games);
    log::info!("  Versions:         {:>8}", stats.versions);
    log::info!("  Files:            {:>8}", stats.parts);
    log::info!("  Collections:      {:>8}", stats.collections);
    log::info!("  Multi-part games: {:>8}", stats.multi_part_games);

    if !stats.by_format.is_empty() {
        crate::log_blank();
        log::info!("  {}", "By format".if_supports_color(Stdout, |t| t.bold()));
        for (format, count) in &stats.by_format {
            log::info!("    {:<14}  {:>8}", format, count);
        }
    }

    let logs = rom_merge_db::list_import_logs(&conn, Some(1))
        .map_err(|e| CliError::database(format!("Failed to read import log: {}", e)))?;
    if let Some(last) = logs.first() {
        crate::log_blank();
        log::info!(
            "  Last import: {} from {} ({} grouping, {} skipped, {} without a name)",
            last.imported_at,
            last.source_root,
            last.grouping,
            last.files_skipped,
            last.files_unidentified,
        );
    }

    Ok(())
}
