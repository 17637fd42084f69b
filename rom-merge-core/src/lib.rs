//! Game identity and file classification for ROM collections.
//!
//! Everything in this crate is pure: filenames in, names and priorities out.
//! The catalog, persistence and export layers build on these primitives.

pub mod classify;
pub mod error;
pub mod format;
pub mod multipart;
pub mod name;
pub mod priority;
pub mod region;

pub use classify::{ClassifiedRecord, Classifier, RawFileRecord, classify};
pub use error::ConfigError;
pub use format::{FormatTier, FormatTierParseError, format_priority};
pub use multipart::{is_multi_part, multi_part_number};
pub use name::normalize;
pub use priority::{PriorityConfig, PriorityTable};
pub use region::{RegionParseError, RegionTag, extract_region, region_priority};
