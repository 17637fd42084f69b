use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_merge_catalog::{plan_all, select_all};
use rom_merge_lib::Settings;

use super::{db_path, load_catalog, open_existing_catalog, report_conflicts, report_ties};
use crate::CliError;

/// Print the winning version of every game, or the export plan as JSON.
pub(crate) fn run_plan(settings: &Settings, db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(&db_path(settings, db))? else {
        return Ok(());
    };
    let catalog = load_catalog(&conn, settings)?;
    let selections = select_all(&catalog);
    let plan = plan_all(&selections);

    if json {
        let out = serde_json::to_string_pretty(&plan)
            .map_err(|e| CliError::export(format!("Failed to serialize plan: {}", e)))?;
        println!("{out}");
        return Ok(());
    }

    for selection in &selections {
        let version = selection.version;
        let label = if selection.is_multi_part() {
            format!("{} parts", selection.parts.len())
        } else {
            "1 file".to_string()
        };
        log::info!(
            "{} {} {}",
            selection.clean_name().if_supports_color(Stdout, |t| t.bold()),
            format!("[{}]", version.key).if_supports_color(Stdout, |t| t.cyan()),
            format!("({label}, {} candidate versions)", selection.game.versions.len())
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        if selection.is_multi_part() {
            for part in &selection.parts {
                log::info!("    {:>2}  {}", part.part_number, part.original_name);
            }
        }
    }

    report_ties(&selections);
    report_conflicts(&plan);

    crate::log_blank();
    log::info!(
        "{} games, {} files, {} playlists (grouping: {})",
        plan.specs.len(),
        plan.file_count(),
        plan.playlist_count(),
        catalog.grouping(),
    );
    Ok(())
}
