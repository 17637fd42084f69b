use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_merge_lib::Settings;

use crate::CliError;

/// Print the effective settings, with every priority table filled in.
pub(crate) fn run_config_show(settings: &Settings, path: &Path) -> Result<(), CliError> {
    let status = if path.exists() {
        "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "(not found, using defaults)"
            .if_supports_color(Stdout, |t| t.dimmed())
            .to_string()
    };
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status,
    );
    crate::log_blank();

    let effective = settings
        .effective()
        .and_then(|s| s.to_toml_string())
        .map_err(|e| CliError::config(e.to_string()))?;
    println!("{effective}");
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path(path: &Path) {
    println!("{}", path.display());
}
