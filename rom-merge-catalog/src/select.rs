//! Best-version selection.
//!
//! Versions are ranked by format priority, then region priority (only when
//! the catalog's grouping tracks region), then collection name ascending.
//! Versions that tie on the whole ranking are ordered by their key (format,
//! then region, ascending) so the winner never depends on insertion order.
//! Such ties are reported alongside the selection.

use std::cmp::Ordering;

use serde::Serialize;

use crate::types::{Catalog, Game, GroupingKey, Part, Version, VersionKey};

/// Two or more versions with an identical ranking key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingTie {
    pub game: String,
    pub chosen: VersionKey,
    pub tied_with: Vec<VersionKey>,
}

/// The winning version of a game and its parts in play order.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub game: &'a Game,
    pub version: &'a Version,
    /// Ascending part number.
    pub parts: Vec<&'a Part>,
    pub tie: Option<RankingTie>,
}

impl<'a> Selection<'a> {
    pub fn clean_name(&self) -> &'a str {
        &self.game.clean_name
    }

    pub fn is_multi_part(&self) -> bool {
        self.version.is_multi_part()
    }
}

/// Compare two versions on the ranking key alone. `Equal` is a tie.
fn compare_rank(grouping: GroupingKey, a: &Version, b: &Version) -> Ordering {
    let by_format = b.format_priority.cmp(&a.format_priority);
    let by_region = if grouping.tracks_region() {
        b.region_priority.cmp(&a.region_priority)
    } else {
        Ordering::Equal
    };
    by_format
        .then(by_region)
        .then_with(|| a.collection().cmp(b.collection()))
}

/// Compare two versions by rank; `Less` means `a` is preferred.
///
/// Ranking ties are broken by the version key, so this is a total order.
pub fn compare_versions(grouping: GroupingKey, a: &Version, b: &Version) -> Ordering {
    compare_rank(grouping, a, b).then_with(|| a.key.cmp(&b.key))
}

/// Versions of a game, best first.
pub fn rank_versions(grouping: GroupingKey, game: &Game) -> Vec<&Version> {
    let mut versions: Vec<&Version> = game.versions.values().collect();
    versions.sort_by(|a, b| compare_versions(grouping, a, b));
    versions
}

fn select_game<'a>(grouping: GroupingKey, game: &'a Game) -> Option<Selection<'a>> {
    let ranked = rank_versions(grouping, game);
    let (&best, rest) = ranked.split_first()?;

    let tied_with: Vec<VersionKey> = rest
        .iter()
        .take_while(|v| compare_rank(grouping, best, v) == Ordering::Equal)
        .map(|v| v.key.clone())
        .collect();
    let tie = if tied_with.is_empty() {
        None
    } else {
        log::debug!(
            "Ranking tie in '{}': {} chosen over {} equal version(s)",
            game.clean_name,
            best.key,
            tied_with.len()
        );
        Some(RankingTie {
            game: game.clean_name.clone(),
            chosen: best.key.clone(),
            tied_with,
        })
    };

    Some(Selection {
        game,
        version: best,
        parts: best.ordered_parts(),
        tie,
    })
}

/// Select the best version of one game.
pub fn select_best<'a>(catalog: &'a Catalog, clean_name: &str) -> Option<Selection<'a>> {
    select_game(catalog.grouping(), catalog.game(clean_name)?)
}

/// Select the best version of every game, in clean-name order.
pub fn select_all(catalog: &Catalog) -> Vec<Selection<'_>> {
    catalog
        .games()
        .filter_map(|game| select_game(catalog.grouping(), game))
        .collect()
}
