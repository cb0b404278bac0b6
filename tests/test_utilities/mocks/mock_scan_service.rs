use async_trait::async_trait;
use polyscan::ports::outbound::ComponentScanResult;
use polyscan::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Mock ScanService keyed by component identifier (`gav://g:a:v`, `npm://n:v`, ...)
///
/// Components without an entry have no issues or licenses. A gated
/// service blocks every call until `release` is called.
#[derive(Default)]
pub struct MockScanService {
    results: HashMap<String, ComponentScanResult>,
    failing: HashSet<String>,
    gate: Option<Arc<Semaphore>>,
    pub calls: AtomicUsize,
    pub scanned: Mutex<Vec<String>>,
}

impl MockScanService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    pub fn with_issue(mut self, component: &str, id: &str, severity: Severity) -> Self {
        let issue = Issue::new(id, severity, format!("{} in {}", id, component), component);
        self.results
            .entry(component.to_string())
            .or_default()
            .issues
            .insert(issue);
        self
    }

    pub fn with_license(mut self, component: &str, license: &str) -> Self {
        self.results
            .entry(component.to_string())
            .or_default()
            .licenses
            .insert(License::new(license));
        self
    }

    pub fn with_failure(mut self, component: &str) -> Self {
        self.failing.insert(component.to_string());
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1024);
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScanService for MockScanService {
    async fn scan(&self, component: &ComponentId) -> Result<ComponentScanResult> {
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await?;
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = component.to_string();
        self.scanned.lock().unwrap().push(key.clone());

        if self.failing.contains(&key) {
            anyhow::bail!("HTTP 503 for {}", key);
        }
        Ok(self.results.get(&key).cloned().unwrap_or_default())
    }
}
