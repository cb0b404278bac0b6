use polyscan::prelude::*;
use std::sync::{Arc, Mutex};

/// One line written to the user-facing log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Info(String),
    Progress { current: usize, total: usize, label: Option<String> },
    Error(String),
    Completion(String),
}

/// Mock ProgressReporter recording every entry in order
///
/// Clones share the same log, so a clone can be handed to the code under
/// test while the original is inspected.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Text of every non-progress entry
    pub fn get_messages(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                LogEntry::Info(m) | LogEntry::Error(m) | LogEntry::Completion(m) => Some(m),
                LogEntry::Progress { .. } => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                LogEntry::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn push(&self, entry: LogEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.push(LogEntry::Info(message.to_string()));
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.push(LogEntry::Progress {
            current,
            total,
            label: message.map(str::to_string),
        });
    }

    fn report_error(&self, message: &str) {
        self.push(LogEntry::Error(message.to_string()));
    }

    fn report_completion(&self, message: &str) {
        self.push(LogEntry::Completion(message.to_string()));
    }
}
