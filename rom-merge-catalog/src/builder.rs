//! Incremental catalog construction.

use std::collections::BTreeMap;

use serde::Serialize;

use rom_merge_core::{ClassifiedRecord, Classifier, RawFileRecord};

use crate::types::{Catalog, Game, GroupingKey, Part, Version, VersionKey};

/// What happened to a record passed to [`CatalogBuilder::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The record became a part of a version.
    Added {
        new_game: bool,
        new_version: bool,
    },
    /// The filename normalized to an empty name; the record was dropped.
    Unidentified,
}

/// Counters collected while building.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Records absorbed as parts.
    pub records: usize,
    /// Records dropped because they had no identity.
    pub unidentified: usize,
}

/// Accumulates records into games and versions.
///
/// Adding the same game or version twice is harmless: each record only ever
/// appends one part. Part-number collisions are kept as-is and reported by
/// [`verify_catalog`](crate::verify::verify_catalog).
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    grouping: GroupingKey,
    classifier: Classifier,
    games: BTreeMap<String, Game>,
    stats: BuildStats,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new(GroupingKey::default(), Classifier::default())
    }
}

impl CatalogBuilder {
    pub fn new(grouping: GroupingKey, classifier: Classifier) -> Self {
        Self {
            grouping,
            classifier,
            games: BTreeMap::new(),
            stats: BuildStats::default(),
        }
    }

    pub fn grouping(&self) -> GroupingKey {
        self.grouping
    }

    /// Classify and absorb a discovered file.
    pub fn add(&mut self, raw: &RawFileRecord) -> AddOutcome {
        match self.classifier.classify(raw) {
            Some(record) => self.add_classified(record),
            None => {
                log::debug!("No identity for '{}', dropping", raw.path);
                self.stats.unidentified += 1;
                AddOutcome::Unidentified
            }
        }
    }

    /// Absorb an already classified record.
    pub fn add_classified(&mut self, record: ClassifiedRecord) -> AddOutcome {
        let key = VersionKey::for_record(&record, self.grouping);

        let new_game = !self.games.contains_key(&record.clean_name);
        let game = self
            .games
            .entry(record.clean_name.clone())
            .or_insert_with(|| Game::new(record.clean_name.clone()));

        let new_version = !game.versions.contains_key(&key);
        let version = game.versions.entry(key.clone()).or_insert_with(|| Version {
            key,
            format_priority: record.format_priority,
            region: record.region.clone(),
            region_priority: record.region_priority,
            parts: Vec::new(),
        });

        version.parts.push(Part {
            part_number: record.part_number,
            source_path: record.source_path,
            original_name: record.original_name,
        });
        self.stats.records += 1;

        AddOutcome::Added {
            new_game,
            new_version,
        }
    }

    /// Add every record of an iterator, returning how many were dropped.
    pub fn extend<'a>(&mut self, raws: impl IntoIterator<Item = &'a RawFileRecord>) -> usize {
        raws.into_iter()
            .filter(|raw| self.add(raw) == AddOutcome::Unidentified)
            .count()
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn build(self) -> Catalog {
        Catalog {
            grouping: self.grouping,
            games: self.games,
            stats: self.stats,
        }
    }
}
