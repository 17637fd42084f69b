use crate::format::FormatTier;
use crate::region::RegionTag;

/// Errors raised while loading a priority configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown format tier '{tier}' for extension '{extension}'")]
    UnknownFormatTier { extension: String, tier: String },

    #[error("unknown format tier '{0}' in format priorities")]
    UnknownTierPriority(String),

    #[error("invalid extension '{0}': expected letters and digits only")]
    InvalidExtension(String),

    #[error("format tier {higher} must rank above {lower} ({higher_priority} <= {lower_priority})")]
    TierOrder {
        higher: FormatTier,
        lower: FormatTier,
        higher_priority: u32,
        lower_priority: u32,
    },

    #[error("format tier {0} has priority 0, which is reserved for unknown formats")]
    ZeroTierPriority(FormatTier),

    #[error("unknown region '{0}' in region priorities")]
    UnknownRegion(String),

    #[error("regions {a} and {b} share priority {priority}")]
    DuplicateRegionPriority {
        a: RegionTag,
        b: RegionTag,
        priority: u32,
    },

    #[error("unspecified region must have the lowest priority (found {region} at {priority})")]
    UnspecifiedNotLowest { region: RegionTag, priority: u32 },
}
