use crate::import::ImportStats;

/// Callbacks for reporting import progress.
///
/// Paths are the `/`-separated paths stored in the catalog.
pub trait ImportProgress {
    fn on_collection(&self, current: usize, total: usize, name: &str);
    fn on_file(&self, path: &str);
    fn on_skip(&self, path: &str);
    fn on_unidentified(&self, path: &str);
    fn on_complete(&self, stats: &ImportStats);
}

/// Silent progress: no output.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_collection(&self, _: usize, _: usize, _: &str) {}
    fn on_file(&self, _: &str) {}
    fn on_skip(&self, _: &str) {}
    fn on_unidentified(&self, _: &str) {}
    fn on_complete(&self, _: &ImportStats) {}
}
