//! Spinner for long-running steps.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A ticking spinner, hidden under `--quiet` and `--verbose`.
///
/// Verbose runs print debug lines from the library while the step runs;
/// a visible spinner would redraw over them. Log lines printed from
/// progress callbacks should still go through [`ProgressBar::suspend`].
pub(crate) fn spinner(quiet: bool, verbose: bool) -> ProgressBar {
    if quiet || verbose {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
