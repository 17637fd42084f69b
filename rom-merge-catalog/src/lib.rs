//! Game catalog: grouping classified files into games and versions,
//! choosing one version per game, and laying out the export.
//!
//! The crate has no I/O. [`CatalogBuilder`] produces an immutable
//! [`Catalog`]; [`select_all`] ranks it; [`plan_all`] turns the selections
//! into target paths that `rom-merge-lib` executes or scripts.

pub mod builder;
pub mod export;
pub mod select;
pub mod types;
pub mod verify;

pub use builder::{AddOutcome, BuildStats, CatalogBuilder};
pub use export::{
    ExportFile, ExportPlan, ExportSpec, Playlist, PlaylistEntry, TargetConflict, plan, plan_all,
    sanitize_name,
};
pub use select::{RankingTie, Selection, compare_versions, rank_versions, select_all, select_best};
pub use types::*;
pub use verify::{CatalogIssue, verify_catalog};
