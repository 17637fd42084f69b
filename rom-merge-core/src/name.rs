//! Filename normalization into canonical game names.
//!
//! Collections name the same game differently:
//! ```text
//! Ultima IV (Disk 1).d64
//! Ultima IV (Europe) [Budget].g64
//! Ultima IV v1.1 (Tape Port Dongle).crt
//! ```
//! All of these reduce to the clean name `Ultima 4`, which is the identity
//! key for a game. Two files belong to the same game exactly when their
//! clean names are byte-for-byte equal.

use std::sync::LazyLock;

use regex::Regex;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern")
}

/// `(Disk 2)`, `Side 1 ...`, `[Part 3] - Finale` and everything after it.
static MULTI_PART_TAIL: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\s*[(\[]?(Side|Part|Disk)\s*[0-9]+[)\]]?.*$"));

static REGION_TAG: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)\s*[(\[](USA|Europe|World|Japan|Eur?|Jp|En|PAL|NTSC)[^)\]]*[)\]]")
});

static VERSION_TAG: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\s*[(\[]v[\d.]+[)\]]"));

/// Bare version token. Case-sensitive: a capital `V` is left for numerals.
static VERSION_BARE: LazyLock<Regex> = LazyLock::new(|| pattern(r"v[\d.]+\b"));

static VERSION_WORD: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\s*[(\[]Version\s+[a-z0-9.]+[)\]]"));

static SUFFIX_TAG: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\s*[(\[](Budget|Alt|Alternative|Unl|Aftermarket|Program|Tape\s*Port\s*Dongle)[)\]]",
    )
});

static COLLECTION_TAG: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\s*[(\[](Compilation|Collection)[)\]]"));

static PAREN_GROUP: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s*\([^)]*\)"));
static BRACKET_GROUP: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s*\[[^\]]*\]"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s+"));

/// Roman numerals converted to digits, matched as whole words.
///
/// `I`, `V`, `IX` and `X` stay as written.
const ROMAN_NUMERALS: &[(&str, &str)] = &[
    ("II", "2"),
    ("III", "3"),
    ("IV", "4"),
    ("VI", "6"),
    ("VII", "7"),
    ("VIII", "8"),
];

static ROMAN_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    ROMAN_NUMERALS
        .iter()
        .map(|&(numeral, digit)| (pattern(&format!(r"\b{numeral}\b")), digit))
        .collect()
});

/// Normalize a filename into its clean game name.
///
/// Returns `None` when nothing identifying is left (e.g. `(Europe).crt`);
/// such files cannot be assigned to a game and are dropped by callers.
///
/// # Examples
///
/// ```
/// use rom_merge_core::name::normalize;
///
/// assert_eq!(normalize("Ultima IV (Disk 1).d64").as_deref(), Some("Ultima 4"));
/// assert_eq!(normalize("Winter Games.crt").as_deref(), Some("Winter Games"));
/// assert_eq!(normalize("(Europe).crt"), None);
/// ```
pub fn normalize(filename: &str) -> Option<String> {
    let name = strip_extension(filename);

    let name = MULTI_PART_TAIL.replace(name, "");
    let name = REGION_TAG.replace_all(&name, "");

    let name = VERSION_TAG.replace_all(&name, "");
    let name = VERSION_BARE.replace_all(&name, "");
    let name = VERSION_WORD.replace_all(&name, "");

    let name = SUFFIX_TAG.replace_all(&name, "");
    let name = COLLECTION_TAG.replace_all(&name, "");

    let mut name = name.into_owned();
    for (re, digit) in ROMAN_PATTERNS.iter() {
        name = re.replace_all(&name, *digit).into_owned();
    }

    let name = PAREN_GROUP.replace_all(&name, "");
    let name = BRACKET_GROUP.replace_all(&name, "");
    let name = WHITESPACE.replace_all(name.trim(), " ");

    if name.is_empty() {
        None
    } else {
        Some(name.into_owned())
    }
}

/// Remove the final extension from a filename.
///
/// Leading dots never start an extension, so `.crt` is returned unchanged.
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(pos) if !filename[..pos].chars().all(|c| c == '.') => &filename[..pos],
        _ => filename,
    }
}

/// The lowercase final extension of a filename, or `""` if it has none.
pub fn extension(filename: &str) -> String {
    let stem = strip_extension(filename);
    if stem.len() == filename.len() {
        String::new()
    } else {
        filename[stem.len() + 1..].to_lowercase()
    }
}

#[cfg(test)]
#[path = "tests/name_tests.rs"]
mod tests;
