//! Consistency checks over a built catalog.

use serde::Serialize;

use crate::select::{RankingTie, select_all};
use crate::types::{Catalog, VersionKey};

/// A problem that does not stop selection but deserves a look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CatalogIssue {
    /// The winning version tied with others on the full ranking key.
    RankingTie(RankingTie),
    /// Several parts of one version share a part number.
    PartCollision {
        game: String,
        version: VersionKey,
        part_number: u32,
        sources: Vec<String>,
    },
    /// A numbered multi-part version also contains a part without a number.
    UnnumberedPart {
        game: String,
        version: VersionKey,
        source: String,
    },
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RankingTie(tie) => {
                write!(f, "{}: ranking tie, chose {} over", tie.game, tie.chosen)?;
                for (i, key) in tie.tied_with.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{key}")?;
                }
                Ok(())
            }
            Self::PartCollision {
                game,
                version,
                part_number,
                sources,
            } => write!(
                f,
                "{game}: {version} has {} files for part {part_number}",
                sources.len()
            ),
            Self::UnnumberedPart {
                game,
                version,
                source,
            } => write!(f, "{game}: {version} has unnumbered part '{source}'"),
        }
    }
}

/// Collect every issue in catalog order.
pub fn verify_catalog(catalog: &Catalog) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    for game in catalog.games() {
        for version in game.versions.values() {
            for number in version.part_collisions() {
                issues.push(CatalogIssue::PartCollision {
                    game: game.clean_name.clone(),
                    version: version.key.clone(),
                    part_number: number,
                    sources: version
                        .parts
                        .iter()
                        .filter(|p| p.part_number == number)
                        .map(|p| p.source_path.clone())
                        .collect(),
                });
            }
            if version.parts.iter().any(|p| p.part_number > 0) {
                for part in version.parts.iter().filter(|p| p.part_number == 0) {
                    issues.push(CatalogIssue::UnnumberedPart {
                        game: game.clean_name.clone(),
                        version: version.key.clone(),
                        source: part.source_path.clone(),
                    });
                }
            }
        }
    }

    issues.extend(
        select_all(catalog)
            .into_iter()
            .filter_map(|selection| selection.tie)
            .map(CatalogIssue::RankingTie),
    );

    issues
}
