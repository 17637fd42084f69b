//! Region tags extracted from filenames and their preference order.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::multipart::NUMBERED_PART;
use crate::priority::PriorityTable;

/// Region tags recognized in ROM filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegionTag {
    /// Europe
    Europe,
    /// PAL-specific release
    Pal,
    /// World / region-free
    World,
    /// USA / North America
    Usa,
    /// Japan
    Japan,
    /// NTSC-specific release
    Ntsc,
    /// No region in the filename
    Unspecified,
}

const ALL_REGIONS: &[RegionTag] = &[
    RegionTag::Europe,
    RegionTag::Pal,
    RegionTag::World,
    RegionTag::Usa,
    RegionTag::Japan,
    RegionTag::Ntsc,
    RegionTag::Unspecified,
];

impl RegionTag {
    /// The token as it appears in filenames. Empty for `Unspecified`.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Europe => "Europe",
            Self::Pal => "PAL",
            Self::World => "World",
            Self::Usa => "USA",
            Self::Japan => "Japan",
            Self::Ntsc => "NTSC",
            Self::Unspecified => "",
        }
    }

    /// Name used in configuration files.
    pub fn config_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            other => other.token(),
        }
    }

    /// Built-in priority. Higher is preferred.
    pub fn default_priority(&self) -> u32 {
        match self {
            Self::Europe => 6,
            Self::Pal => 5,
            Self::World => 4,
            Self::Usa => 3,
            Self::Japan => 2,
            Self::Ntsc => 1,
            Self::Unspecified => 0,
        }
    }

    /// All tags in built-in priority order, `Unspecified` last.
    pub fn all() -> &'static [RegionTag] {
        ALL_REGIONS
    }

    /// Exact, case-sensitive token match (`""` is `Unspecified`).
    pub fn from_token(token: &str) -> Option<Self> {
        ALL_REGIONS.iter().copied().find(|r| r.token() == token)
    }
}

impl std::fmt::Display for RegionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.config_name())
    }
}

/// Error returned when a string is not a known region tag.
#[derive(Debug, Clone)]
pub struct RegionParseError(pub String);

impl std::fmt::Display for RegionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown region: '{}'", self.0)
    }
}

impl std::error::Error for RegionParseError {}

impl std::str::FromStr for RegionTag {
    type Err = RegionParseError;

    /// Parse a configuration name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ALL_REGIONS
            .iter()
            .copied()
            .find(|r| r.config_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RegionParseError(s.to_string()))
    }
}

static REGION_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(([^)]*(?:USA|Europe|World|Japan|Eur|Jp|En|PAL|NTSC)[^)]*)\)")
        .expect("static pattern")
});

static ABBREVIATIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [("Eur", "Europe"), ("Jp", "Japan"), ("En", "English")]
        .iter()
        .map(|&(short, long)| {
            let re = Regex::new(&format!(r"(?i)\b{short}\b")).expect("static pattern");
            (re, long)
        })
        .collect()
});

/// Extract the region group from a filename.
///
/// Returns the full contents of the first parenthesized group mentioning a
/// region, so `"Game (Europe, USA).d64"` yields `"Europe, USA"`. Known
/// abbreviations are expanded (`Eur`, `Jp`, `En`).
///
/// Files carrying a disk/side/part number never have a region: markers like
/// `(Disk 1 PAL NTSC)` describe the medium, not the release.
pub fn extract_region(name: &str) -> String {
    if NUMBERED_PART.is_match(name) {
        return String::new();
    }

    let Some(caps) = REGION_GROUP.captures(name) else {
        return String::new();
    };

    let mut region = caps[1].trim().to_string();
    for (re, long) in ABBREVIATIONS.iter() {
        region = re.replace_all(&region, *long).into_owned();
    }
    region
}

/// Priority of a region string under the built-in table.
pub fn region_priority(region: &str) -> u32 {
    PriorityTable::standard().region_priority(region)
}

#[cfg(test)]
#[path = "tests/region_tests.rs"]
mod tests;
