//! Application settings (`settings.toml`).
//!
//! The file lives at `~/.config/rom-merge/settings.toml` unless a path is
//! given explicitly. Every section is optional; missing values fall back to
//! the built-in defaults, so an empty or absent file is a valid
//! configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use rom_merge_catalog::GroupingKey;
use rom_merge_core::{Classifier, PriorityConfig, PriorityTable};

use crate::discovery::{DEFAULT_SKIP_DIRECTORIES, DEFAULT_SKIP_PATTERNS, DiscoveryFilter};
use crate::error::SettingsError;

/// Canonical path to the settings file: `~/.config/rom-merge/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("rom-merge").join("settings.toml")
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub roms_dir: PathBuf,
    pub database: PathBuf,
    pub target_dir: PathBuf,
    pub script: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            roms_dir: PathBuf::from("roms"),
            database: PathBuf::from("build/rom_merge.db"),
            target_dir: PathBuf::from("target"),
            script: PathBuf::from("build/merge_collection.sh"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub grouping: GroupingKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Substrings of a path or filename that exclude the file.
    pub skip_patterns: Vec<String>,
    /// Directory names whose contents are never imported.
    pub skip_directories: Vec<String>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            skip_patterns: DEFAULT_SKIP_PATTERNS.iter().map(|s| s.to_string()).collect(),
            skip_directories: DEFAULT_SKIP_DIRECTORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Everything in `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub catalog: CatalogSettings,
    /// Extension to format tier overrides.
    pub formats: BTreeMap<String, String>,
    /// Format tier priority overrides.
    pub format_priority: BTreeMap<String, u32>,
    /// Region priority overrides.
    pub region_priority: BTreeMap<String, u32>,
    pub discovery: DiscoverySettings,
}

impl Settings {
    pub fn priority_config(&self) -> PriorityConfig {
        PriorityConfig {
            formats: self.formats.clone(),
            format_priority: self.format_priority.clone(),
            region_priority: self.region_priority.clone(),
        }
    }

    /// The validated priority table these settings describe.
    pub fn priority_table(&self) -> Result<PriorityTable, SettingsError> {
        Ok(PriorityTable::from_config(&self.priority_config())?)
    }

    pub fn classifier(&self) -> Result<Classifier, SettingsError> {
        Ok(Classifier::new(self.priority_table()?))
    }

    pub fn discovery_filter(&self) -> Result<DiscoveryFilter, SettingsError> {
        Ok(DiscoveryFilter::new(
            self.discovery.skip_patterns.clone(),
            self.discovery.skip_directories.clone(),
            self.priority_table()?,
        ))
    }

    /// Settings with the priority tables expanded to their effective values.
    pub fn effective(&self) -> Result<Settings, SettingsError> {
        let table = self.priority_table()?.to_config();
        Ok(Settings {
            formats: table.formats,
            format_priority: table.format_priority,
            region_priority: table.region_priority,
            ..self.clone()
        })
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Load settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(e.into()),
    };
    let settings: Settings = toml::from_str(&contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    // Priority tables are validated here, not at first use.
    settings.priority_table()?;
    Ok(settings)
}

/// Write settings to `path` atomically, creating parent directories.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = settings.to_toml_string()?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
