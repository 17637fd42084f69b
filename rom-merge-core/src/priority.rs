//! Format and region priority tables.
//!
//! The built-in table covers the common C64 image formats. A
//! [`PriorityConfig`] loaded from settings can remap extensions, renumber
//! tiers and reorder regions; [`PriorityTable::from_config`] rejects unknown
//! names and orderings that would break the ranking rules, so a bad table
//! fails at load time instead of quietly ranking everything as 0.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::format::{DEFAULT_FORMATS, FormatTier};
use crate::region::RegionTag;

/// Raw priority settings as written in a settings file.
///
/// Every map is an overlay on the built-in table: absent entries keep their
/// default values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityConfig {
    /// Extension (without dot) to tier name, e.g. `crt = "cartridge"`.
    pub formats: BTreeMap<String, String>,
    /// Tier name to priority.
    pub format_priority: BTreeMap<String, u32>,
    /// Region name (`Europe`, `PAL`, ..., `unspecified`) to priority.
    pub region_priority: BTreeMap<String, u32>,
}

/// Validated priority lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityTable {
    formats: BTreeMap<String, FormatTier>,
    tiers: BTreeMap<FormatTier, u32>,
    /// Highest priority first.
    regions: Vec<(RegionTag, u32)>,
}

static STANDARD: LazyLock<PriorityTable> = LazyLock::new(PriorityTable::default);

impl Default for PriorityTable {
    fn default() -> Self {
        Self {
            formats: DEFAULT_FORMATS
                .iter()
                .map(|&(ext, tier)| (ext.to_string(), tier))
                .collect(),
            tiers: FormatTier::all()
                .iter()
                .map(|&tier| (tier, tier.default_priority()))
                .collect(),
            regions: RegionTag::all()
                .iter()
                .map(|&region| (region, region.default_priority()))
                .collect(),
        }
    }
}

impl PriorityTable {
    /// The built-in table.
    pub fn standard() -> &'static PriorityTable {
        &STANDARD
    }

    /// Build a table from settings, validating names and ordering.
    pub fn from_config(config: &PriorityConfig) -> Result<Self, ConfigError> {
        let mut table = Self::default();

        for (ext, tier) in &config.formats {
            let ext = normalize_extension(ext)?;
            let tier: FormatTier = tier.parse().map_err(|_| ConfigError::UnknownFormatTier {
                extension: ext.clone(),
                tier: tier.clone(),
            })?;
            table.formats.insert(ext, tier);
        }

        for (name, &priority) in &config.format_priority {
            let tier: FormatTier = name
                .parse()
                .map_err(|_| ConfigError::UnknownTierPriority(name.clone()))?;
            table.tiers.insert(tier, priority);
        }

        for (name, &priority) in &config.region_priority {
            let region: RegionTag = name
                .parse()
                .map_err(|_| ConfigError::UnknownRegion(name.clone()))?;
            match table.regions.iter_mut().find(|(r, _)| *r == region) {
                Some(entry) => entry.1 = priority,
                None => table.regions.push((region, priority)),
            }
        }
        table.regions.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for &tier in FormatTier::all() {
            if self.tier_priority(tier) == 0 {
                return Err(ConfigError::ZeroTierPriority(tier));
            }
        }
        for pair in FormatTier::all().windows(2) {
            let (higher, lower) = (pair[0], pair[1]);
            let (hp, lp) = (self.tier_priority(higher), self.tier_priority(lower));
            if hp <= lp {
                return Err(ConfigError::TierOrder {
                    higher,
                    lower,
                    higher_priority: hp,
                    lower_priority: lp,
                });
            }
        }

        for pair in self.regions.windows(2) {
            if pair[0].1 == pair[1].1 {
                return Err(ConfigError::DuplicateRegionPriority {
                    a: pair[0].0,
                    b: pair[1].0,
                    priority: pair[0].1,
                });
            }
        }
        if let Some(&(region, priority)) = self.regions.last() {
            if region != RegionTag::Unspecified {
                return Err(ConfigError::UnspecifiedNotLowest { region, priority });
            }
        }

        Ok(())
    }

    /// Convert back into the settings representation.
    pub fn to_config(&self) -> PriorityConfig {
        PriorityConfig {
            formats: self
                .formats
                .iter()
                .map(|(ext, tier)| (ext.clone(), tier.name().to_string()))
                .collect(),
            format_priority: self
                .tiers
                .iter()
                .map(|(tier, &p)| (tier.name().to_string(), p))
                .collect(),
            region_priority: self
                .regions
                .iter()
                .map(|&(region, p)| (region.config_name().to_string(), p))
                .collect(),
        }
    }

    /// Tier of an extension, if it is a known format.
    pub fn format_tier(&self, extension: &str) -> Option<FormatTier> {
        self.formats.get(&extension.to_lowercase()).copied()
    }

    /// Priority of an extension; 0 for unknown formats.
    pub fn format_priority(&self, extension: &str) -> u32 {
        self.format_tier(extension)
            .map_or(0, |tier| self.tier_priority(tier))
    }

    pub fn is_known_format(&self, extension: &str) -> bool {
        self.format_tier(extension).is_some()
    }

    /// Known extensions in alphabetical order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }

    pub fn tier_priority(&self, tier: FormatTier) -> u32 {
        self.tiers.get(&tier).copied().unwrap_or(0)
    }

    pub fn region_tag_priority(&self, region: RegionTag) -> u32 {
        self.regions
            .iter()
            .find(|(r, _)| *r == region)
            .map_or(0, |&(_, p)| p)
    }

    /// Priority of an extracted region string.
    ///
    /// Exact token matches first; otherwise the highest-priority token
    /// contained in the string (`"USA, Europe"` ranks as Europe); otherwise
    /// the unspecified priority.
    pub fn region_priority(&self, region: &str) -> u32 {
        if let Some(tag) = RegionTag::from_token(region) {
            return self.region_tag_priority(tag);
        }
        self.regions
            .iter()
            .find(|(tag, _)| *tag != RegionTag::Unspecified && region.contains(tag.token()))
            .map_or_else(
                || self.region_tag_priority(RegionTag::Unspecified),
                |&(_, p)| p,
            )
    }
}

fn normalize_extension(ext: &str) -> Result<String, ConfigError> {
    let cleaned = ext.trim().trim_start_matches('.').to_lowercase();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::InvalidExtension(ext.to_string()));
    }
    Ok(cleaned)
}

#[cfg(test)]
#[path = "tests/priority_tests.rs"]
mod tests;
