pub(crate) mod config;
pub(crate) mod generate;
pub(crate) mod import;
pub(crate) mod merge;
pub(crate) mod plan;
pub(crate) mod reset;
pub(crate) mod stats;
pub(crate) mod verify;

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use rom_merge_catalog::{Catalog, ExportPlan, Selection};
use rom_merge_lib::Settings;

use crate::CliError;

pub(crate) fn db_path(settings: &Settings, db: Option<PathBuf>) -> PathBuf {
    db.unwrap_or_else(|| settings.paths.database.clone())
}

pub(crate) fn target_path(settings: &Settings, target: Option<PathBuf>) -> PathBuf {
    target.unwrap_or_else(|| settings.paths.target_dir.clone())
}

/// Open or create the catalog database, creating its parent directory.
pub(crate) fn open_catalog(path: &Path) -> Result<Connection, CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    rom_merge_db::open_database(path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Open the catalog database if it exists; otherwise explain how to make one.
pub(crate) fn open_existing_catalog(path: &Path) -> Result<Option<Connection>, CliError> {
    if !path.exists() {
        log::warn!("No catalog database found at {}", path.display());
        log::info!("Run 'rom-merge import' to create one.");
        return Ok(None);
    }
    open_catalog(path).map(Some)
}

pub(crate) fn load_catalog(conn: &Connection, settings: &Settings) -> Result<Catalog, CliError> {
    let catalog = rom_merge_lib::load_catalog(conn, settings)
        .map_err(|e| CliError::database(format!("Failed to load catalog: {}", e)))?;
    if catalog.is_empty() {
        log::warn!("The catalog is empty. Run 'rom-merge import' first.");
    }
    Ok(catalog)
}

/// Warn about selections that were decided by a tie-break.
pub(crate) fn report_ties(selections: &[Selection<'_>]) {
    for tie in selections.iter().filter_map(|s| s.tie.as_ref()) {
        let others: Vec<String> = tie.tied_with.iter().map(ToString::to_string).collect();
        log::warn!(
            "  {} {}: {} tied with {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            tie.game.if_supports_color(Stdout, |t| t.bold()),
            tie.chosen,
            others.join(", "),
        );
    }
}

/// Warn about export targets claimed by more than one game.
pub(crate) fn report_conflicts(plan: &ExportPlan) {
    for conflict in &plan.conflicts {
        log::warn!(
            "  {} {} is claimed by {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            conflict.target,
            conflict.games.join(", "),
        );
    }
}
