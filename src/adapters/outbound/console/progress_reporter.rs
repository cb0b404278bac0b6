use crate::ports::outbound::ProgressReporter;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

const BAR_TEMPLATE: &str =
    "   {spinner:.green} {prefix:20!} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)";

/// Key used when progress is reported without a label
const UNLABELLED: &str = "scan";

/// StderrProgressReporter adapter for the user-facing log
///
/// Writes to stderr so that stdout carries only the report. Managers scan
/// concurrently, so each progress label (the project name) gets its own
/// indicatif bar; messages are printed above the bars.
pub struct StderrProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn print(&self, message: &str) {
        self.multi.suspend(|| eprintln!("{}", message));
    }

    fn clear_bars(&self) {
        let mut bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, bar) in bars.drain() {
            bar.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.print(message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let label = message.unwrap_or(UNLABELLED);
        let mut bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        let bar = bars.entry(label.to_string()).or_insert_with(|| {
            let bar = self.multi.add(ProgressBar::new(total as u64));
            bar.set_style(Self::bar_style());
            bar.set_prefix(label.to_string());
            bar
        });
        bar.set_length(total as u64);
        bar.set_position(current as u64);

        if current >= total {
            if let Some(done) = bars.remove(label) {
                done.finish_and_clear();
                self.multi.remove(&done);
            }
        }
    }

    fn report_error(&self, message: &str) {
        self.print(message);
    }

    fn report_completion(&self, message: &str) {
        self.clear_bars();
        eprintln!();
        eprintln!("{}", message);
    }
}
