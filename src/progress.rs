use crate::organizer::{Outcome, RunReport};

/// Trait for reporting organizer progress.
///
/// CLI implements with an indicatif spinner, tests use `SilentReporter`.
/// All methods have default no-op implementations.
pub trait ProgressReporter {
    fn on_walk_start(&self, _source: &str) {}
    fn on_outcome(&self, _processed: usize, _outcome: &Outcome) {}
    fn on_walk_complete(&self, _report: &RunReport, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
