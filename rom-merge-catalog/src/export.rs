//! Export layout planning.
//!
//! Turns selections into target paths relative to the export root:
//!
//! ```text
//! Boulder Dash.crt                          single-part game
//! Ultima 4/Ultima 4 (Disk 1).d64            multi-part game
//! Ultima 4/Ultima 4 (Disk 2).d64
//! Ultima 4.m3u                              playlist for the multi-part game
//! ```
//!
//! Planning is pure; executing the plan is left to the caller.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::select::Selection;

/// Make a game name safe to use as a file or directory name.
///
/// Whitespace runs collapse to one space, reserved characters and control
/// characters become `_`, runs of `_` collapse, and leading/trailing dots,
/// underscores and spaces are trimmed. An empty result becomes `unnamed`.
///
/// ```
/// use rom_merge_catalog::export::sanitize_name;
///
/// assert_eq!(sanitize_name("Spy vs Spy: The Island Caper"), "Spy vs Spy_ The Island Caper");
/// assert_eq!(sanitize_name("..."), "unnamed");
/// ```
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_space = false;
    let mut last_underscore = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
            last_underscore = false;
            continue;
        }
        last_space = false;

        let c = match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\\' | '/' => '_',
            c if c.is_ascii_control() => '_',
            c => c,
        };
        if c == '_' {
            if last_underscore {
                continue;
            }
            last_underscore = true;
        } else {
            last_underscore = false;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_' || c == ' ');
    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

/// One file to copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    pub source_path: String,
    /// Relative to the export root, `/`-separated.
    pub target: String,
    pub part_number: u32,
}

/// One line of an `.m3u` playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistEntry {
    /// Relative to the playlist's own directory.
    pub path: String,
    pub label: String,
}

/// A playlist tying the disks of a multi-part game together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Playlist {
    /// Relative to the export root.
    pub path: String,
    pub entries: Vec<PlaylistEntry>,
}

impl Playlist {
    /// Playlist text: one `path|label` line per entry, no header.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}|{}\n", e.path, e.label))
            .collect()
    }
}

/// Everything needed to export one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSpec {
    pub game: String,
    /// Sanitized name used for files and directories.
    pub name: String,
    pub collection: String,
    pub format: String,
    /// Directory to create for a multi-part game, relative to the root.
    pub directory: Option<String>,
    pub files: Vec<ExportFile>,
    pub playlist: Option<Playlist>,
}

/// Several files or playlists mapped to the same target path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetConflict {
    pub target: String,
    /// Games involved, sorted and deduplicated.
    pub games: Vec<String>,
}

/// Export layout for a whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportPlan {
    pub specs: Vec<ExportSpec>,
    pub conflicts: Vec<TargetConflict>,
}

impl ExportPlan {
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.specs.iter().map(|s| s.files.len()).sum()
    }

    pub fn directory_count(&self) -> usize {
        self.specs.iter().filter(|s| s.directory.is_some()).count()
    }

    pub fn playlist_count(&self) -> usize {
        self.specs.iter().filter(|s| s.playlist.is_some()).count()
    }

    /// Every file and playlist path the plan writes, relative to the root.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().flat_map(|spec| {
            spec.files
                .iter()
                .map(|f| f.target.as_str())
                .chain(spec.playlist.iter().map(|p| p.path.as_str()))
        })
    }
}

/// Lay out one selection.
pub fn plan(selection: &Selection<'_>) -> ExportSpec {
    let name = sanitize_name(selection.clean_name());
    let format = selection.version.format().to_string();

    if !selection.is_multi_part() {
        let files = selection
            .parts
            .iter()
            .map(|part| ExportFile {
                source_path: part.source_path.clone(),
                target: format!("{name}.{format}"),
                part_number: part.part_number,
            })
            .collect();
        return ExportSpec {
            game: selection.clean_name().to_string(),
            name,
            collection: selection.version.collection().to_string(),
            format,
            directory: None,
            files,
            playlist: None,
        };
    }

    let mut files = Vec::with_capacity(selection.parts.len());
    let mut entries = Vec::with_capacity(selection.parts.len());
    for part in &selection.parts {
        let target = format!("{name}/{name} (Disk {}).{format}", part.part_number);
        entries.push(PlaylistEntry {
            path: target.clone(),
            label: format!("Disk {}", part.part_number),
        });
        files.push(ExportFile {
            source_path: part.source_path.clone(),
            target,
            part_number: part.part_number,
        });
    }

    ExportSpec {
        game: selection.clean_name().to_string(),
        collection: selection.version.collection().to_string(),
        format,
        directory: Some(name.clone()),
        files,
        playlist: Some(Playlist {
            path: format!("{name}.m3u"),
            entries,
        }),
        name,
    }
}

/// Lay out every selection and detect target collisions.
pub fn plan_all(selections: &[Selection<'_>]) -> ExportPlan {
    let specs: Vec<ExportSpec> = selections.iter().map(plan).collect();

    let mut owners: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for spec in &specs {
        let paths = spec
            .files
            .iter()
            .map(|f| f.target.as_str())
            .chain(spec.playlist.iter().map(|p| p.path.as_str()));
        for path in paths {
            owners.entry(path).or_default().push(spec.game.as_str());
        }
    }

    let conflicts = owners
        .into_iter()
        .filter(|(_, games)| games.len() > 1)
        .map(|(target, games)| {
            let mut games: Vec<String> = games.into_iter().map(String::from).collect();
            games.sort();
            games.dedup();
            log::warn!("Export target '{target}' is claimed by {}", games.join(", "));
            TargetConflict {
                target: target.to_string(),
                games,
            }
        })
        .collect();

    ExportPlan { specs, conflicts }
}
