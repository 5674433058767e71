//! Progress reporting for long running training and alignment calls.
//!
//! Observers are passed explicitly to the calls that report through them.

pub trait ProgressObserver {
    fn start(&self, _task: &str, _total: usize) {}
    fn advance(&self, _task: &str, _done: usize) {}
    fn finish(&self, _task: &str) {}
}

/// Discards every report.
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Forwards reports to the `log` facade.
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn start(&self, task: &str, total: usize) {
        log::info!("{task}: started ({total} steps)");
    }

    fn advance(&self, task: &str, done: usize) {
        log::debug!("{task}: {done} done");
    }

    fn finish(&self, task: &str) {
        log::info!("{task}: finished");
    }
}
