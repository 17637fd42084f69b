//! Carry out an export plan on disk.

use std::fs;
use std::io;
use std::path::Path;

use rom_merge_catalog::ExportPlan;

/// Remove everything inside `dir`, creating it if it does not exist.
pub fn clean_directory(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        return fs::create_dir_all(dir);
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// Result of [`execute_plan`].
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub copied: usize,
    pub directories_created: usize,
    pub playlists_written: usize,
    /// One message per failed step. Failures do not stop the export.
    pub errors: Vec<String>,
}

impl ExportSummary {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Copy every planned file under `target_root` and write playlists.
pub fn execute_plan(plan: &ExportPlan, target_root: &Path) -> ExportSummary {
    let mut summary = ExportSummary::default();

    if let Err(e) = fs::create_dir_all(target_root) {
        summary.errors.push(format!(
            "Failed to create {}: {}",
            target_root.display(),
            e
        ));
        return summary;
    }

    for spec in &plan.specs {
        if let Some(dir) = &spec.directory {
            match fs::create_dir_all(target_root.join(dir)) {
                Ok(()) => summary.directories_created += 1,
                Err(e) => {
                    summary
                        .errors
                        .push(format!("Failed to create directory {dir}: {e}"));
                    continue;
                }
            }
        }

        for file in &spec.files {
            let target = target_root.join(&file.target);
            match fs::copy(&file.source_path, &target) {
                Ok(_) => {
                    log::debug!("Copied {} -> {}", file.source_path, target.display());
                    summary.copied += 1;
                }
                Err(e) => summary.errors.push(format!(
                    "Failed to copy {} -> {}: {}",
                    file.source_path, file.target, e
                )),
            }
        }

        if let Some(playlist) = &spec.playlist {
            match fs::write(target_root.join(&playlist.path), playlist.render()) {
                Ok(()) => summary.playlists_written += 1,
                Err(e) => summary
                    .errors
                    .push(format!("Failed to write playlist {}: {}", playlist.path, e)),
            }
        }
    }

    summary
}

#[cfg(test)]
#[path = "tests/execute_tests.rs"]
mod tests;
