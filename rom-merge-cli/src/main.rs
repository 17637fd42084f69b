//! rom-merge CLI
//!
//! Catalogs several ROM collections, picks the best version of every game
//! and exports one merged collection.

mod cli_types;
mod commands;
mod error;
mod logging;
mod spinner;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;
pub(crate) use logging::log_blank;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(rom_merge_lib::settings_path);

    if let Err(e) = run(cli, &settings_path) {
        log::error!("{e}");
        log::logger().flush();
        std::process::exit(1);
    }
    log::logger().flush();
}

fn run(cli: Cli, settings_path: &std::path::Path) -> Result<(), CliError> {
    if let Commands::Config {
        action: ConfigAction::Path,
    } = cli.command
    {
        commands::config::run_config_path(settings_path);
        return Ok(());
    }

    let settings = rom_merge_lib::load_settings(settings_path)
        .map_err(|e| CliError::config(e.to_string()))?;

    match cli.command {
        Commands::Import { src, db } => {
            commands::import::run_import(&settings, src, db.db, cli.quiet, cli.verbose)
        }
        Commands::Plan { db, json } => commands::plan::run_plan(&settings, db.db, json),
        Commands::Generate {
            db,
            target,
            output,
            batch,
        } => commands::generate::run_generate(&settings, db.db, target.target, output, batch),
        Commands::Merge {
            db,
            target,
            dry_run,
        } => commands::merge::run_merge(
            &settings,
            db.db,
            target.target,
            dry_run,
            cli.quiet,
            cli.verbose,
        ),
        Commands::Verify { db, target } => {
            commands::verify::run_verify(&settings, db.db, target.target)
        }
        Commands::Stats { db } => commands::stats::run_stats(&settings, db.db),
        Commands::Reset { db, confirm } => commands::reset::run_reset(&settings, db.db, confirm),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings, settings_path),
            ConfigAction::Path => {
                commands::config::run_config_path(settings_path);
                Ok(())
            }
        },
    }
}
