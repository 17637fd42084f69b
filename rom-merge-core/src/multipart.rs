//! Multi-part (multi-disk, multi-side) detection.
//!
//! Detection runs on the directory path and filename together, because some
//! collections keep each disk of a game in its own folder (`Game/Disk 1/`).

use std::sync::LazyLock;

use regex::Regex;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern")
}

/// Numbered side/part/disk marker, e.g. `Disk 2`, `side1`, `Part 3`.
pub(crate) static NUMBERED_PART: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)(Side|Part|Disk)\s*([0-9]+)"));

static SIDE_LETTER: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Side\s*([A-B])"));

static LEVEL_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)Levels?\s*([0-9]+)(?:\s*(?:and|&|\+|-)\s*([0-9]+))?")
});

/// Substrings that look like part markers but are not.
const DENY_LIST: &[&str] = &[
    "Tape Port Dongle",
    "Savedisk",
    "Special Edition",
    "(v2)",
    "Re-release",
];

static MULTI_PART_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(Side|Part|Disk)\s*[0-9]+",
        r"(?i)Side\s*[A-B]",
        r"(?i)Part\s*[0-9]+\s*-",
        r"(?i)Levels?\s*[0-9][\s\-]*(?:and|&|\+)[\s\-]*[0-9]",
        r"(?i)Disk\s*[0-9]+/",
        r"(?i)Side\s*[A-B]/",
        r"(?i)Part\s*[0-9]+/",
    ]
    .iter()
    .map(|re| pattern(re))
    .collect()
});

fn is_denied(full_path: &str) -> bool {
    DENY_LIST.iter().any(|phrase| full_path.contains(phrase))
}

/// Whether a file is one part of a multi-part game.
///
/// `path` is the containing directory (with trailing separator) or empty.
///
/// ```
/// use rom_merge_core::multipart::is_multi_part;
///
/// assert!(is_multi_part("", "Ultima IV (Disk 2).d64"));
/// assert!(!is_multi_part("", "10th Frame (USA) (Tape Port Dongle).nib"));
/// ```
pub fn is_multi_part(path: &str, name: &str) -> bool {
    let full_path = format!("{path}{name}");
    if is_denied(&full_path) {
        return false;
    }
    MULTI_PART_PATTERNS.iter().any(|re| re.is_match(&full_path))
}

/// Part number of a file, or 0 when none can be determined.
///
/// Precedence: a numeric side/part/disk marker, then `Side A`/`Side B`
/// (1/2), then a level range mapped to its disk index (`Levels 3 and 4`
/// is disk 2).
pub fn multi_part_number(path: &str, name: &str) -> u32 {
    let full_path = format!("{path}{name}");
    if is_denied(&full_path) {
        return 0;
    }

    if let Some(caps) = NUMBERED_PART.captures(&full_path) {
        if let Ok(n) = caps[2].parse::<u32>() {
            return n;
        }
    }

    if let Some(caps) = SIDE_LETTER.captures(&full_path) {
        return match caps[1].to_ascii_uppercase().as_str() {
            "A" => 1,
            _ => 2,
        };
    }

    if let Some(caps) = LEVEL_RANGE.captures(&full_path) {
        if let Ok(first) = caps[1].parse::<u32>() {
            return first.div_ceil(2);
        }
    }

    0
}

#[cfg(test)]
#[path = "tests/multipart_tests.rs"]
mod tests;
