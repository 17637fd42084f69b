//! Console logger behind the `log` facade.
//!
//! Info and below go to stdout, warnings and errors to stderr. `--verbose`
//! adds timestamps and level names; `--logfile` mirrors every line to a
//! file with ANSI escapes removed.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

struct CliLogger {
    level: LevelFilter,
    timestamps: bool,
    file: Option<Mutex<File>>,
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = if self.timestamps {
            format!(
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        } else {
            record.args().to_string()
        };

        match record.level() {
            Level::Error | Level::Warn => {
                let _ = writeln!(io::stderr().lock(), "{line}");
            }
            _ => {
                let _ = writeln!(io::stdout().lock(), "{line}");
            }
        }

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", strip_ansi_escapes::strip_str(&line));
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Install the logger. Fails only if the log file cannot be created.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let file = logfile.map(File::create).transpose()?.map(Mutex::new);
    let logger = CliLogger {
        level,
        timestamps: verbose,
        file,
    };

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
    Ok(())
}

/// Print an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}
