use date_sorter::{Outcome, ProgressReporter, RunReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// CLI progress reporter: a spinner counting processed files while the walk runs.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_walk_start(&self, source: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(format!("Walking {}...", source));
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_outcome(&self, processed: usize, outcome: &Outcome) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_message(format!(
                "{} files processed, last: {}",
                processed,
                outcome.source().display()
            ));
        }
    }

    fn on_walk_complete(&self, report: &RunReport, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Walk complete: {} files in {:.2}s",
            report.outcomes.len(),
            duration_secs
        );
    }
}
