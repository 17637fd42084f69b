use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_merge_catalog::{plan_all, select_all};
use rom_merge_lib::{Settings, clean_directory, execute_plan};

use super::{
    db_path, load_catalog, open_existing_catalog, report_conflicts, report_ties, target_path,
};
use crate::CliError;
use crate::spinner::spinner;

/// Empty the target directory and copy the best version of every game into it.
pub(crate) fn run_merge(
    settings: &Settings,
    db: Option<PathBuf>,
    target: Option<PathBuf>,
    dry_run: bool,
    quiet: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(&db_path(settings, db))? else {
        return Ok(());
    };
    let catalog = load_catalog(&conn, settings)?;
    let selections = select_all(&catalog);
    let plan = plan_all(&selections);
    let target = target_path(settings, target);
    report_ties(&selections);
    report_conflicts(&plan);

    if dry_run {
        for spec in &plan.specs {
            for file in &spec.files {
                log::info!(
                    "  {} {} {}",
                    file.source_path.if_supports_color(Stdout, |t| t.dimmed()),
                    "->".if_supports_color(Stdout, |t| t.dimmed()),
                    file.target,
                );
            }
            if let Some(playlist) = &spec.playlist {
                log::info!(
                    "  {} {}",
                    "playlist".if_supports_color(Stdout, |t| t.dimmed()),
                    playlist.path,
                );
            }
        }
        crate::log_blank();
        log::info!(
            "Dry run: would copy {} files and write {} playlists into {}",
            plan.file_count(),
            plan.playlist_count(),
            target.display(),
        );
        return Ok(());
    }

    log::info!(
        "{}",
        format!("Merging {} games into {}", plan.specs.len(), target.display())
            .if_supports_color(Stdout, |t| t.bold()),
    );
    clean_directory(&target).map_err(|e| {
        CliError::export(format!("Failed to clean {}: {}", target.display(), e))
    })?;

    let pb = spinner(quiet, verbose);
    pb.set_message(format!("Copying {} files", plan.file_count()));
    let summary = execute_plan(&plan, &target);
    pb.finish_and_clear();

    for error in &summary.errors {
        log::warn!(
            "  {} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            error,
        );
    }

    crate::log_blank();
    log::info!("{}", "Merge complete".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Files copied:     {:>6}", summary.copied);
    log::info!("  Directories:      {:>6}", summary.directories_created);
    log::info!("  Playlists:        {:>6}", summary.playlists_written);
    if !summary.is_success() {
        log::info!("  Errors:           {:>6}", summary.errors.len());
        return Err(CliError::export(format!(
            "{} step(s) failed",
            summary.errors.len()
        )));
    }
    Ok(())
}
