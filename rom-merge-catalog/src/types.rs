//! Data model for the in-memory catalog.
//!
//! A [`Catalog`] holds games keyed by clean name; each [`Game`] holds its
//! versions keyed by [`VersionKey`]; each [`Version`] holds the parts that
//! make up one copy of the game. All maps are ordered so iteration is the
//! same on every run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rom_merge_core::ClassifiedRecord;

use crate::builder::BuildStats;

// ── Grouping ────────────────────────────────────────────────────────────────

/// Which record attributes separate one version of a game from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingKey {
    /// `(game, collection, format, region)`; region takes part in ranking.
    #[default]
    CollectionFormatRegion,
    /// `(game, collection, format)`; region is ignored for ranking.
    CollectionFormat,
}

impl GroupingKey {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CollectionFormatRegion => "collection-format-region",
            Self::CollectionFormat => "collection-format",
        }
    }

    pub fn all() -> &'static [GroupingKey] {
        &[Self::CollectionFormatRegion, Self::CollectionFormat]
    }

    /// Whether region separates versions and participates in ranking.
    pub fn tracks_region(&self) -> bool {
        matches!(self, Self::CollectionFormatRegion)
    }
}

impl std::fmt::Display for GroupingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a string is not a known grouping key.
#[derive(Debug, Clone)]
pub struct GroupingKeyParseError(pub String);

impl std::fmt::Display for GroupingKeyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown grouping '{}' (expected collection-format-region or collection-format)",
            self.0
        )
    }
}

impl std::error::Error for GroupingKeyParseError {}

impl std::str::FromStr for GroupingKey {
    type Err = GroupingKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|g| g.name() == lower)
            .ok_or_else(|| GroupingKeyParseError(s.to_string()))
    }
}

// ── Versions ────────────────────────────────────────────────────────────────

/// Identity of a version within its game.
///
/// `region` is always empty under [`GroupingKey::CollectionFormat`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionKey {
    pub collection: String,
    pub format: String,
    pub region: String,
}

impl VersionKey {
    pub fn for_record(record: &ClassifiedRecord, grouping: GroupingKey) -> Self {
        Self {
            collection: record.collection.clone(),
            format: record.format.clone(),
            region: if grouping.tracks_region() {
                record.region.clone()
            } else {
                String::new()
            },
        }
    }
}

impl std::fmt::Display for VersionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.collection, self.format)?;
        if !self.region.is_empty() {
            write!(f, " ({})", self.region)?;
        }
        Ok(())
    }
}

/// One file of a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// 0 for single-part files.
    pub part_number: u32,
    pub source_path: String,
    pub original_name: String,
}

/// One copy of a game in one collection and format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub key: VersionKey,
    pub format_priority: u32,
    /// Region of the first record absorbed; equal to `key.region` when the
    /// grouping tracks region.
    pub region: String,
    pub region_priority: u32,
    /// Parts in the order they were added.
    pub parts: Vec<Part>,
}

impl Version {
    pub fn collection(&self) -> &str {
        &self.key.collection
    }

    pub fn format(&self) -> &str {
        &self.key.format
    }

    /// More than one part, or a single part that carries a part number.
    pub fn is_multi_part(&self) -> bool {
        self.parts.len() > 1 || self.parts.first().is_some_and(|p| p.part_number > 0)
    }

    /// Parts sorted by ascending part number. Equal numbers keep insertion
    /// order.
    pub fn ordered_parts(&self) -> Vec<&Part> {
        let mut parts: Vec<&Part> = self.parts.iter().collect();
        parts.sort_by_key(|p| p.part_number);
        parts
    }

    /// Part numbers used by more than one part, ascending.
    pub fn part_collisions(&self) -> Vec<u32> {
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for part in &self.parts {
            *counts.entry(part.part_number).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(number, _)| number)
            .collect()
    }
}

// ── Games ───────────────────────────────────────────────────────────────────

/// A logical game and every version of it found across collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub clean_name: String,
    pub versions: BTreeMap<VersionKey, Version>,
}

impl Game {
    pub fn new(clean_name: impl Into<String>) -> Self {
        Self {
            clean_name: clean_name.into(),
            versions: BTreeMap::new(),
        }
    }

    pub fn part_count(&self) -> usize {
        self.versions.values().map(|v| v.parts.len()).sum()
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────────

/// Immutable result of a catalog build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub(crate) grouping: GroupingKey,
    pub(crate) games: BTreeMap<String, Game>,
    pub(crate) stats: BuildStats,
}

impl Catalog {
    /// The grouping the catalog was built with. The selector ranks by it.
    pub fn grouping(&self) -> GroupingKey {
        self.grouping
    }

    pub fn game(&self, clean_name: &str) -> Option<&Game> {
        self.games.get(clean_name)
    }

    /// Games in clean-name order.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn version_count(&self) -> usize {
        self.games.values().map(|g| g.versions.len()).sum()
    }

    pub fn part_count(&self) -> usize {
        self.games.values().map(Game::part_count).sum()
    }
}
