use std::path::PathBuf;

use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_merge_lib::{ImportProgress, ImportStats, Settings, import_collections};

use super::{db_path, open_catalog};
use crate::CliError;
use crate::spinner::spinner;

/// Scan the ROM root and replace the catalog database contents.
pub(crate) fn run_import(
    settings: &Settings,
    src: Option<PathBuf>,
    db: Option<PathBuf>,
    quiet: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let src = src.unwrap_or_else(|| settings.paths.roms_dir.clone());
    let db_path = db_path(settings, db);
    let mut conn = open_catalog(&db_path)?;

    log::info!(
        "{}",
        format!("Importing ROM collections from {}", src.display())
            .if_supports_color(Stdout, |t| t.bold()),
    );

    let progress = CliImportProgress::new(quiet, verbose);
    let stats = import_collections(&mut conn, &src, settings, &progress).map_err(|e| {
        progress.pb.finish_and_clear();
        CliError::import(e.to_string())
    })?;

    crate::log_blank();
    log::info!(
        "{}",
        "Import complete".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Collections:      {:>6}", stats.collections);
    log::info!("  Files processed:  {:>6}", stats.processed);
    log::info!("  Files skipped:    {:>6}", stats.skipped);
    if stats.unidentified > 0 {
        log::info!("  No game name:     {:>6}", stats.unidentified);
    }
    log::info!("  Unique games:     {:>6}", stats.games);
    log::info!("  Multi-part games: {:>6}", stats.multi_part_games);
    log::info!("  Database: {}", db_path.display());

    Ok(())
}

/// CLI progress reporter for collection imports.
struct CliImportProgress {
    pb: ProgressBar,
}

impl CliImportProgress {
    fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            pb: spinner(quiet, verbose),
        }
    }
}

impl ImportProgress for CliImportProgress {
    fn on_collection(&self, current: usize, total: usize, name: &str) {
        self.pb.suspend(|| {
            log::info!(
                "  {} {}",
                format!("[{current}/{total}]").if_supports_color(Stdout, |t| t.dimmed()),
                name.if_supports_color(Stdout, |t| t.cyan()),
            );
        });
        self.pb.set_message(format!("Scanning {name}"));
    }

    fn on_file(&self, path: &str) {
        self.pb.set_message(path.to_string());
    }

    fn on_skip(&self, path: &str) {
        log::debug!("Skipped {path}");
    }

    fn on_unidentified(&self, path: &str) {
        self.pb.suspend(|| {
            log::warn!(
                "  {} No game name left in {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                path,
            );
        });
    }

    fn on_complete(&self, stats: &ImportStats) {
        self.pb.finish_and_clear();
        log::info!(
            "  {} {} games from {} files",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            stats.games,
            stats.processed,
        );
    }
}
