//! SQLite persistence for the ROM catalog.
//!
//! Stores classified records as games, versions and parts, and reproduces
//! the version ranking with a window function so the stored catalog can be
//! cross-checked against the in-memory selector.

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    ImportLog, OperationError, RecordIds, insert_record, insert_records, log_import,
    reset_catalog,
};
pub use queries::{
    BestVersion, CatalogStats, StoredPart, best_versions, catalog_stats, last_import_grouping,
    list_import_logs, load_records,
};
pub use schema::{SchemaError, open_database, open_memory};
