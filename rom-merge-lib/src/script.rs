//! Merge script generation.
//!
//! A script reproduces [`execute_plan`](crate::execute::execute_plan) with
//! plain shell commands so the copy can be reviewed before it runs, or run
//! on another machine.

use std::io;
use std::path::Path;

use rom_merge_catalog::ExportPlan;

/// Script dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptKind {
    /// `#!/bin/bash` with `mkdir -p`, `cp` and heredoc playlists.
    #[default]
    Shell,
    /// Windows batch file with `copy /Y`.
    Batch,
}

impl ScriptKind {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Shell => "sh",
            Self::Batch => "bat",
        }
    }
}

/// Quote a string for use inside bash double quotes.
fn sh_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Escape text for a batch `echo` argument.
fn bat_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%%"),
            '^' | '&' | '|' | '<' | '>' => {
                out.push('^');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

fn bat_path(s: &str) -> String {
    format!("\"{}\"", s.replace('/', "\\").replace('%', "%%"))
}

fn join_target(target_root: &str, relative: &str) -> String {
    let root = target_root.trim_end_matches('/');
    if root.is_empty() {
        relative.to_string()
    } else {
        format!("{root}/{relative}")
    }
}

/// Render a script that builds `plan` under `target_root`.
pub fn render_script(plan: &ExportPlan, target_root: &str, kind: ScriptKind) -> String {
    match kind {
        ScriptKind::Shell => render_shell(plan, target_root),
        ScriptKind::Batch => render_batch(plan, target_root),
    }
}

fn render_shell(plan: &ExportPlan, target_root: &str) -> String {
    let mut out = String::new();
    out.push_str("#!/bin/bash\n\n");
    out.push_str("# Create output directory\n");
    out.push_str(&format!("mkdir -p {}\n\n", sh_quote(target_root)));

    for spec in &plan.specs {
        if let Some(dir) = &spec.directory {
            out.push_str(&format!(
                "mkdir -p {}\n",
                sh_quote(&join_target(target_root, dir))
            ));
        }

        for file in &spec.files {
            let display = sh_quote(&format!("Copying {}", file.target));
            let failed = sh_quote(&format!("Failed to copy {}", file.target));
            out.push_str(&format!("echo {display}\n"));
            out.push_str(&format!(
                "cp {} {} || echo {failed}\n\n",
                sh_quote(&file.source_path),
                sh_quote(&join_target(target_root, &file.target)),
            ));
        }

        if let Some(playlist) = &spec.playlist {
            out.push_str("# Create playlist\n");
            out.push_str(&format!(
                "cat > {} << 'EOL'\n",
                sh_quote(&join_target(target_root, &playlist.path))
            ));
            out.push_str(&playlist.render());
            out.push_str("EOL\n\n");
        }
    }

    out
}

fn render_batch(plan: &ExportPlan, target_root: &str) -> String {
    let mut out = String::new();
    out.push_str("@echo off\r\n\r\n");
    out.push_str("rem Create output directory\r\n");
    out.push_str(&format!(
        "if not exist {0} mkdir {0}\r\n\r\n",
        bat_path(target_root)
    ));

    for spec in &plan.specs {
        if let Some(dir) = &spec.directory {
            out.push_str(&format!(
                "if not exist {0} mkdir {0}\r\n",
                bat_path(&join_target(target_root, dir))
            ));
        }

        for file in &spec.files {
            let name = bat_escape(&file.target);
            out.push_str(&format!("echo Copying {name}\r\n"));
            out.push_str(&format!(
                "copy /Y {} {} >nul || echo Failed to copy {name}\r\n\r\n",
                bat_path(&file.source_path),
                bat_path(&join_target(target_root, &file.target)),
            ));
        }

        if let Some(playlist) = &spec.playlist {
            out.push_str("rem Create playlist\r\n");
            let path = bat_path(&join_target(target_root, &playlist.path));
            for (i, entry) in playlist.entries.iter().enumerate() {
                let redirect = if i == 0 { ">" } else { ">>" };
                out.push_str(&format!(
                    "{redirect}{path} echo {}^|{}\r\n",
                    bat_escape(&entry.path),
                    bat_escape(&entry.label)
                ));
            }
            out.push_str("\r\n");
        }
    }

    out
}

/// Write a rendered script, creating parent directories. Shell scripts are
/// marked executable on Unix.
pub fn write_script(path: &Path, contents: &str, kind: ScriptKind) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;

    #[cfg(unix)]
    if kind == ScriptKind::Shell {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(perms.mode() | 0o755);
        std::fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    let _ = kind;

    Ok(())
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod tests;
