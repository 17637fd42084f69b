use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_merge_catalog::{VersionKey, plan_all, select_all, verify_catalog};
use rom_merge_lib::{Settings, check_target, compare_rankings};

use super::{db_path, load_catalog, open_existing_catalog, target_path};
use crate::CliError;

fn describe(winner: &Option<(VersionKey, Vec<String>)>) -> String {
    match winner {
        Some((key, parts)) => format!("{key} ({} files)", parts.len()),
        None => "nothing".to_string(),
    }
}

/// Check catalog consistency, SQL/selector agreement and the export target.
///
/// Any problem makes the command fail so scripts can act on the exit status.
pub(crate) fn run_verify(
    settings: &Settings,
    db: Option<PathBuf>,
    target: Option<PathBuf>,
) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(&db_path(settings, db))? else {
        return Ok(());
    };
    let catalog = load_catalog(&conn, settings)?;
    let selections = select_all(&catalog);

    log::info!(
        "{}",
        format!("Verifying {} games", catalog.len()).if_supports_color(Stdout, |t| t.bold()),
    );

    let issues = verify_catalog(&catalog);
    for issue in &issues {
        log::warn!(
            "  {} {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            issue,
        );
    }

    let stored = rom_merge_db::best_versions(&conn, catalog.grouping())
        .map_err(|e| CliError::database(format!("Failed to rank stored versions: {}", e)))?;
    let mismatches = compare_rankings(&selections, &stored);
    for mismatch in &mismatches {
        log::warn!(
            "  {} {}: selector chose {}, database chose {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            mismatch.game.if_supports_color(Stdout, |t| t.bold()),
            describe(&mismatch.engine),
            describe(&mismatch.store),
        );
    }

    let target = target_path(settings, target);
    let report = if target.is_dir() {
        let plan = plan_all(&selections);
        let report = check_target(&plan, &target)
            .map_err(|e| CliError::export(format!("Failed to read {}: {}", target.display(), e)))?;
        for missing in &report.missing {
            log::warn!(
                "  {} missing {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                missing,
            );
        }
        Some(report)
    } else {
        log::info!(
            "  Target {} does not exist; skipping file check",
            target.display()
        );
        None
    };

    crate::log_blank();
    log::info!(
        "{}",
        "Verification complete".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Games:            {:>6}", catalog.len());
    log::info!("  Catalog issues:   {:>6}", issues.len());
    log::info!("  Ranking mismatch: {:>6}", mismatches.len());
    if let Some(report) = &report {
        log::info!("  Target expected:  {:>6}", report.expected);
        log::info!("  Target present:   {:>6}", report.present);
        log::info!("  Target missing:   {:>6}", report.missing.len());
        log::info!("  Untracked files:  {:>6}", report.extra);
    }

    let problems =
        issues.len() + mismatches.len() + report.as_ref().map_or(0, |r| r.missing.len());
    if problems > 0 {
        return Err(CliError::inconsistent(format!(
            "Verification found {problems} problem(s)"
        )));
    }

    log::info!(
        "{} Catalog and target are consistent",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}
