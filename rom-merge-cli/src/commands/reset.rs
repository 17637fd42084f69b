use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_merge_lib::Settings;

use super::db_path;
use crate::CliError;

/// Delete the catalog database and its WAL side files.
pub(crate) fn run_reset(
    settings: &Settings,
    db: Option<PathBuf>,
    confirm: bool,
) -> Result<(), CliError> {
    let db_path = db_path(settings, db);

    if !confirm {
        log::warn!(
            "This will permanently delete the catalog database at:\n  {}",
            db_path.display(),
        );
        log::info!("Re-run with --confirm to proceed:");
        log::info!("  rom-merge reset --confirm");
        return Ok(());
    }

    if !db_path.exists() {
        log::info!("No catalog database found at {}", db_path.display());
        log::info!("Nothing to reset.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);
    std::fs::remove_file(&db_path).map_err(|e| {
        CliError::database(format!("Failed to delete {}: {}", db_path.display(), e))
    })?;
    for suffix in ["-wal", "-shm"] {
        let mut side = db_path.clone().into_os_string();
        side.push(suffix);
        let side = PathBuf::from(side);
        if side.exists() {
            std::fs::remove_file(&side)?;
        }
    }

    log::info!(
        "{}",
        "Catalog database deleted.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path: {}", db_path.display());
    log::info!("  Freed: {:.1} KB", file_size as f64 / 1024.0);
    crate::log_blank();
    log::info!("Run 'rom-merge import' to rebuild.");

    Ok(())
}
