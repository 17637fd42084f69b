//! ROM collection discovery.
//!
//! A ROM root holds one directory per collection. Each collection is walked
//! recursively; files are kept when their extension is a known format and
//! nothing in their path marks them as a utility, BIOS or original dump.

use std::path::Path;

use walkdir::WalkDir;

use rom_merge_core::name::extension;
use rom_merge_core::{PriorityTable, RawFileRecord};

use crate::error::DiscoveryError;
use crate::progress::ImportProgress;

/// Path or filename substrings that mark non-game content.
pub const DEFAULT_SKIP_PATTERNS: &[&str] = &[
    "BIOS",
    "Action Replay",
    "EPROM-System",
    "Quickload",
    "64 Doctor",
    "64MON",
    "Construction Kit",
    "Monitor",
    "Compiler",
    "Editor",
    "Utility",
    "Demo Disk",
    "Program",
    "System",
    "Cartridge Plus",
];

/// Directories whose contents are never imported.
pub const DEFAULT_SKIP_DIRECTORIES: &[&str] = &["Originals"];

/// Decides which discovered files are imported.
#[derive(Debug, Clone)]
pub struct DiscoveryFilter {
    skip_patterns: Vec<String>,
    skip_directories: Vec<String>,
    table: PriorityTable,
}

impl Default for DiscoveryFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_SKIP_PATTERNS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_SKIP_DIRECTORIES.iter().map(|s| s.to_string()).collect(),
            PriorityTable::standard().clone(),
        )
    }
}

impl DiscoveryFilter {
    pub fn new(
        skip_patterns: Vec<String>,
        skip_directories: Vec<String>,
        table: PriorityTable,
    ) -> Self {
        Self {
            skip_patterns,
            skip_directories,
            table,
        }
    }
}

/// Whether a file should be left out of the catalog.
///
/// `path` is the containing directory relative to the ROM root
/// (`Collection/sub/dir`), `/`-separated. Pattern matching is
/// case-sensitive.
pub fn should_skip_file(path: &str, filename: &str, filter: &DiscoveryFilter) -> bool {
    if path
        .split('/')
        .any(|segment| filter.skip_directories.iter().any(|d| d == segment))
    {
        return true;
    }

    if filter
        .skip_patterns
        .iter()
        .any(|p| path.contains(p.as_str()) || filename.contains(p.as_str()))
    {
        return true;
    }

    !filter.table.is_known_format(&extension(filename))
}

/// Top-level directory names under `root`, sorted.
pub fn list_collections(root: &Path) -> Result<Vec<String>, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::MissingRoot(root.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(root).map_err(|e| DiscoveryError::io(root, e))? {
        let entry = entry.map_err(|e| DiscoveryError::io(root, e))?;
        let is_dir = entry
            .file_type()
            .map_err(|e| DiscoveryError::io(entry.path(), e))?
            .is_dir();
        if is_dir {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Files found in one collection.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub records: Vec<RawFileRecord>,
    pub skipped: usize,
}

/// Everything found under a ROM root.
#[derive(Debug, Default)]
pub struct Discovery {
    pub collections: Vec<String>,
    pub records: Vec<RawFileRecord>,
    pub skipped: usize,
}

/// Render a path with `/` separators.
pub fn slash_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    if cfg!(windows) {
        s.replace('\\', "/")
    } else {
        s.into_owned()
    }
}

/// Walk one collection in file-name order.
pub fn scan_collection(
    root: &Path,
    collection: &str,
    filter: &DiscoveryFilter,
    progress: &dyn ImportProgress,
) -> Result<ScanResult, DiscoveryError> {
    let mut result = ScanResult::default();

    let walker = WalkDir::new(root.join(collection))
        .follow_links(false)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let filename = entry.file_name().to_string_lossy().into_owned();
        let full_path = slash_path(path);
        let relative_dir = path
            .parent()
            .and_then(|p| p.strip_prefix(root).ok())
            .map(slash_path)
            .unwrap_or_default();

        if should_skip_file(&relative_dir, &filename, filter) {
            log::debug!("Skipping {full_path}");
            progress.on_skip(&full_path);
            result.skipped += 1;
            continue;
        }

        progress.on_file(&full_path);
        result
            .records
            .push(RawFileRecord::new(full_path, filename, collection));
    }

    Ok(result)
}

/// Scan every collection under `root`.
pub fn discover(
    root: &Path,
    filter: &DiscoveryFilter,
    progress: &dyn ImportProgress,
) -> Result<Discovery, DiscoveryError> {
    let collections = list_collections(root)?;
    let mut discovery = Discovery::default();

    for (i, collection) in collections.iter().enumerate() {
        progress.on_collection(i + 1, collections.len(), collection);
        let scan = scan_collection(root, collection, filter, progress)?;
        log::debug!(
            "{collection}: {} files, {} skipped",
            scan.records.len(),
            scan.skipped
        );
        discovery.records.extend(scan.records);
        discovery.skipped += scan.skipped;
    }

    discovery.collections = collections;
    Ok(discovery)
}

#[cfg(test)]
#[path = "tests/discovery_tests.rs"]
mod tests;
