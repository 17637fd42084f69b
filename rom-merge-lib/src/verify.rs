//! Checks against the outside world: the export target on disk and the
//! SQL ranking in the store.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use walkdir::WalkDir;

use rom_merge_catalog::{ExportPlan, Selection, VersionKey};
use rom_merge_db::BestVersion;

use crate::discovery::slash_path;
use crate::error::DiscoveryError;

/// Expected versus actual contents of an export target.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TargetReport {
    /// Files and playlists the plan writes.
    pub expected: usize,
    /// Of those, how many exist.
    pub present: usize,
    /// Expected paths that do not exist, relative to the target root.
    pub missing: Vec<String>,
    /// Files in the target that the plan does not account for.
    pub extra: usize,
}

impl TargetReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Compare a plan with what is actually under `target_root`.
pub fn check_target(plan: &ExportPlan, target_root: &Path) -> Result<TargetReport, DiscoveryError> {
    let expected: BTreeSet<&str> = plan.targets().collect();
    let mut report = TargetReport {
        expected: expected.len(),
        ..Default::default()
    };

    for target in &expected {
        if target_root.join(target).is_file() {
            report.present += 1;
        } else {
            report.missing.push(target.to_string());
        }
    }

    if target_root.is_dir() {
        for entry in WalkDir::new(target_root).follow_links(false) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(target_root)
                .map(slash_path)
                .unwrap_or_default();
            if !expected.contains(relative.as_str()) {
                report.extra += 1;
            }
        }
    }

    Ok(report)
}

/// A game the store and the in-memory selector rank differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingMismatch {
    pub game: String,
    /// Winner according to the selector, with its part paths.
    pub engine: Option<(VersionKey, Vec<String>)>,
    /// Winner according to SQL, with its part paths.
    pub store: Option<(VersionKey, Vec<String>)>,
}

/// Cross-check selector output against [`best_versions`](rom_merge_db::best_versions).
pub fn compare_rankings(selections: &[Selection<'_>], stored: &[BestVersion]) -> Vec<RankingMismatch> {
    let mut engine: BTreeMap<&str, (VersionKey, Vec<String>)> = BTreeMap::new();
    for sel in selections {
        let paths = sel.parts.iter().map(|p| p.source_path.clone()).collect();
        engine.insert(sel.clean_name(), (sel.version.key.clone(), paths));
    }

    let mut store: BTreeMap<&str, (VersionKey, Vec<String>)> = BTreeMap::new();
    for best in stored {
        let key = VersionKey {
            collection: best.collection.clone(),
            format: best.format.clone(),
            region: best.region.clone(),
        };
        let paths = best.parts.iter().map(|p| p.source_path.clone()).collect();
        store.insert(best.clean_name.as_str(), (key, paths));
    }

    let games: BTreeSet<&str> = engine.keys().chain(store.keys()).copied().collect();
    games
        .into_iter()
        .filter_map(|game| {
            let e = engine.get(game);
            let s = store.get(game);
            if e == s {
                return None;
            }
            Some(RankingMismatch {
                game: game.to_string(),
                engine: e.cloned(),
                store: s.cloned(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/verify_tests.rs"]
mod tests;
