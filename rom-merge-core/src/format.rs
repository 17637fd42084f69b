//! File format tiers.
//!
//! A format's tier decides how trustworthy a dump is as a representative of
//! its game. Cartridge images beat complete disk images, which beat raw
//! program dumps, which beat tape images. Several extensions share a tier.

use serde::{Deserialize, Serialize};

use crate::name::extension;
use crate::priority::PriorityTable;

/// Media tier of a ROM file format, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTier {
    /// Cartridge images (`.crt`)
    Cartridge,
    /// Complete disk images, including copy protection (`.d64`, `.g64`, `.nib`)
    Disk,
    /// Raw program dumps that may miss custom loaders (`.prg`)
    Program,
    /// Tape images (`.tap`, `.t64`)
    Tape,
}

const ALL_TIERS: &[FormatTier] = &[
    FormatTier::Cartridge,
    FormatTier::Disk,
    FormatTier::Program,
    FormatTier::Tape,
];

/// Built-in extension table.
pub const DEFAULT_FORMATS: &[(&str, FormatTier)] = &[
    ("crt", FormatTier::Cartridge),
    ("d64", FormatTier::Disk),
    ("g64", FormatTier::Disk),
    ("nib", FormatTier::Disk),
    ("prg", FormatTier::Program),
    ("tap", FormatTier::Tape),
    ("t64", FormatTier::Tape),
];

impl FormatTier {
    /// Lowercase name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cartridge => "cartridge",
            Self::Disk => "disk",
            Self::Program => "program",
            Self::Tape => "tape",
        }
    }

    /// Built-in priority. Higher is better; 0 is reserved for unknown formats.
    pub fn default_priority(&self) -> u32 {
        match self {
            Self::Cartridge => 4,
            Self::Disk => 3,
            Self::Program => 2,
            Self::Tape => 1,
        }
    }

    /// All tiers, best first.
    pub fn all() -> &'static [FormatTier] {
        ALL_TIERS
    }
}

impl std::fmt::Display for FormatTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a string is not a known format tier.
#[derive(Debug, Clone)]
pub struct FormatTierParseError(pub String);

impl std::fmt::Display for FormatTierParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown format tier: '{}'", self.0)
    }
}

impl std::error::Error for FormatTierParseError {}

impl std::str::FromStr for FormatTier {
    type Err = FormatTierParseError;

    /// Parse a tier name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_TIERS
            .iter()
            .copied()
            .find(|tier| tier.name() == lower)
            .ok_or_else(|| FormatTierParseError(s.to_string()))
    }
}

/// Priority of a file's format under the built-in table.
///
/// Unknown extensions return 0.
pub fn format_priority(filename: &str) -> u32 {
    PriorityTable::standard().format_priority(&extension(filename))
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
