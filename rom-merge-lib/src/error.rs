use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while walking a ROM directory tree.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("ROM directory not found: {0}")]
    MissingRoot(PathBuf),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl DiscoveryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading or saving `settings.toml`.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid priority settings: {0}")]
    Priority(#[from] rom_merge_core::ConfigError),
}

/// Errors raised by the import pipeline.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Database error: {0}")]
    Database(#[from] rom_merge_db::OperationError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
