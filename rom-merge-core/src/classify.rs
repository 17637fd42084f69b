//! Per-file classification.
//!
//! Turns a discovered file into a [`ClassifiedRecord`]: canonical game name,
//! format and region priorities, and multi-part membership. Nothing here
//! touches the filesystem; the record depends only on its filename and the
//! directory it was found in.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::multipart::{is_multi_part, multi_part_number};
use crate::name::{extension, normalize};
use crate::priority::PriorityTable;
use crate::region::extract_region;

/// A file as produced by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFileRecord {
    /// Full path, `/`-separated.
    pub path: String,
    pub filename: String,
    pub collection: String,
}

impl RawFileRecord {
    pub fn new(
        path: impl Into<String>,
        filename: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
            collection: collection.into(),
        }
    }

    /// The containing directory with a trailing `/`, or `""` for a bare name.
    pub fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(pos) => &self.path[..=pos],
            None => "",
        }
    }
}

/// A file with its identity and ranking attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub source_path: String,
    pub original_name: String,
    /// Canonical game identity. Never empty.
    pub clean_name: String,
    /// Lowercase extension without the dot.
    pub format: String,
    pub format_priority: u32,
    /// Region text as extracted from the filename; empty when unspecified.
    pub region: String,
    pub region_priority: u32,
    pub collection: String,
    pub is_multi_part: bool,
    /// 0 whenever `is_multi_part` is false.
    pub part_number: u32,
}

/// Classifies files against a priority table.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: PriorityTable,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(PriorityTable::standard().clone())
    }
}

impl Classifier {
    pub fn new(table: PriorityTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PriorityTable {
        &self.table
    }

    /// Classify one file. Returns `None` when the filename normalizes to an
    /// empty identity.
    pub fn classify(&self, raw: &RawFileRecord) -> Option<ClassifiedRecord> {
        let clean_name = normalize(&raw.filename)?;
        let format = extension(&raw.filename);
        let format_priority = self.table.format_priority(&format);
        let region = extract_region(&raw.filename);
        let region_priority = self.table.region_priority(&region);

        let directory = raw.directory();
        let is_multi_part = is_multi_part(directory, &raw.filename);
        let part_number = if is_multi_part {
            multi_part_number(directory, &raw.filename)
        } else {
            0
        };

        Some(ClassifiedRecord {
            source_path: raw.path.clone(),
            original_name: raw.filename.clone(),
            clean_name,
            format,
            format_priority,
            region,
            region_priority,
            collection: raw.collection.clone(),
            is_multi_part,
            part_number,
        })
    }
}

static STANDARD: LazyLock<Classifier> = LazyLock::new(Classifier::default);

/// Classify with the built-in priority table.
///
/// ```
/// use rom_merge_core::classify::{classify, RawFileRecord};
///
/// let raw = RawFileRecord::new("roms/C64/Ultima IV (Disk 2).d64", "Ultima IV (Disk 2).d64", "C64");
/// let record = classify(&raw).unwrap();
/// assert_eq!(record.clean_name, "Ultima 4");
/// assert_eq!(record.part_number, 2);
/// ```
pub fn classify(raw: &RawFileRecord) -> Option<ClassifiedRecord> {
    STANDARD.classify(raw)
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;
