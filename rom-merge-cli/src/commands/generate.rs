use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_merge_catalog::{plan_all, select_all};
use rom_merge_lib::{ScriptKind, Settings, render_script, write_script};

use super::{
    db_path, load_catalog, open_existing_catalog, report_conflicts, report_ties, target_path,
};
use crate::CliError;

/// Write a shell or batch script that builds the merged collection.
pub(crate) fn run_generate(
    settings: &Settings,
    db: Option<PathBuf>,
    target: Option<PathBuf>,
    output: Option<PathBuf>,
    batch: bool,
) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(&db_path(settings, db))? else {
        return Ok(());
    };
    let catalog = load_catalog(&conn, settings)?;
    let selections = select_all(&catalog);
    let plan = plan_all(&selections);
    report_ties(&selections);
    report_conflicts(&plan);

    let kind = if batch {
        ScriptKind::Batch
    } else {
        ScriptKind::Shell
    };
    let output = output.unwrap_or_else(|| settings.paths.script.with_extension(kind.extension()));
    let target = target_path(settings, target);

    let script = render_script(&plan, &target.to_string_lossy(), kind);
    write_script(&output, &script, kind).map_err(|e| {
        CliError::export(format!("Failed to write {}: {}", output.display(), e))
    })?;

    log::info!(
        "{} Wrote {} ({} files, {} playlists)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        output.display().if_supports_color(Stdout, |t| t.cyan()),
        plan.file_count(),
        plan.playlist_count(),
    );
    Ok(())
}
