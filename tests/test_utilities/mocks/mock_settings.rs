use polyscan::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Mock SettingsProvider with switchable credentials
pub struct MockSettings {
    credentials: AtomicBool,
    excluded_paths: Vec<String>,
}

impl MockSettings {
    pub fn new() -> Self {
        Self {
            credentials: AtomicBool::new(true),
            excluded_paths: Vec::new(),
        }
    }

    pub fn without_credentials() -> Self {
        let settings = Self::new();
        settings.set_credentials(false);
        settings
    }

    pub fn with_excluded_paths(mut self, patterns: &[&str]) -> Self {
        self.excluded_paths = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn set_credentials(&self, configured: bool) {
        self.credentials.store(configured, Ordering::SeqCst);
    }
}

impl Default for MockSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsProvider for MockSettings {
    fn are_credentials_set(&self) -> bool {
        self.credentials.load(Ordering::SeqCst)
    }

    fn excluded_paths(&self) -> Vec<String> {
        self.excluded_paths.clone()
    }
}
