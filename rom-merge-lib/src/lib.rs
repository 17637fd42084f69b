//! Application layer for rom-merge: discovery, settings, the import
//! pipeline, export execution, script generation and verification.
//!
//! The CLI is a thin shell over this crate.

pub mod discovery;
pub mod error;
pub mod execute;
pub mod import;
pub mod progress;
pub mod script;
pub mod settings;
pub mod verify;

pub use discovery::{
    Discovery, DiscoveryFilter, ScanResult, discover, list_collections, scan_collection,
    should_skip_file,
};
pub use error::{DiscoveryError, ImportError, SettingsError};
pub use execute::{ExportSummary, clean_directory, execute_plan};
pub use import::{ImportStats, import_collections, load_catalog, stored_grouping};
pub use progress::{ImportProgress, SilentProgress};
pub use script::{ScriptKind, render_script, write_script};
pub use settings::{Settings, load_settings, save_settings, settings_path};
pub use verify::{RankingMismatch, TargetReport, check_target, compare_rankings};
