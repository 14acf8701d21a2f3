// src/analyzer/progress.rs
// =============================================================================
// Turns "how many fan-out groups have finished" into a 0-100 percentage.
//
// 0 is reported at the start, PRIMARY_DONE after the page fetch, and each
// finished group moves the bar further up to (but not including) 100, which
// is only reported once the Report exists.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) const STARTED: u8 = 0;
pub(crate) const PRIMARY_DONE: u8 = 20;
pub(crate) const FINISHED: u8 = 100;

// Room left between PRIMARY_DONE and FINISHED for the fan-out groups
const FAN_OUT_SPAN: usize = 75;

pub(crate) struct ProgressTracker<'a> {
    report: &'a (dyn Fn(u8) + Send + Sync),
    groups: usize,
    finished: AtomicUsize,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(report: &'a (dyn Fn(u8) + Send + Sync), groups: usize) -> Self {
        Self {
            report,
            groups: groups.max(1),
            finished: AtomicUsize::new(0),
        }
    }

    pub(crate) fn group_done(&self) {
        let finished = (self.finished.fetch_add(1, Ordering::SeqCst) + 1).min(self.groups);
        let pct = usize::from(PRIMARY_DONE) + finished * FAN_OUT_SPAN / self.groups;
        (self.report)(pct as u8);
    }
}
