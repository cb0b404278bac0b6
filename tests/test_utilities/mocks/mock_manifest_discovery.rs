use polyscan::ports::outbound::ManifestDirs;
use polyscan::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock ManifestDiscovery returning fixed directories
#[derive(Default)]
pub struct MockManifestDiscovery {
    dirs: Mutex<ManifestDirs>,
    should_fail: AtomicBool,
    pub calls: AtomicUsize,
    pub last_roots: Mutex<Vec<PathBuf>>,
    pub last_excluded: Mutex<Vec<String>>,
}

impl MockManifestDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_npm(self, dir: &str) -> Self {
        self.dirs.lock().unwrap().npm.push(PathBuf::from(dir));
        self
    }

    pub fn with_go(self, dir: &str) -> Self {
        self.dirs.lock().unwrap().go.push(PathBuf::from(dir));
        self
    }

    pub fn set_dirs(&self, dirs: ManifestDirs) {
        *self.dirs.lock().unwrap() = dirs;
    }

    pub fn set_failure(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }
}

impl ManifestDiscovery for MockManifestDiscovery {
    fn find_manifest_dirs(&self, roots: &[PathBuf], excluded_paths: &[String]) -> Result<ManifestDirs> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_roots.lock().unwrap() = roots.to_vec();
        *self.last_excluded.lock().unwrap() = excluded_paths.to_vec();
        if self.should_fail.load(Ordering::SeqCst) {
            anyhow::bail!("Permission denied");
        }
        Ok(self.dirs.lock().unwrap().clone())
    }
}
