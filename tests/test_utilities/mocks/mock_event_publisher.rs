use polyscan::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ScanEventPublisher recording every event in order
#[derive(Default, Clone)]
pub struct MockEventPublisher {
    pub events: Arc<Mutex<Vec<ScanEvent>>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScanEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&ScanEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| predicate(e)).count()
    }
}

impl ScanEventPublisher for MockEventPublisher {
    fn publish(&self, event: ScanEvent) {
        self.events.lock().unwrap().push(event);
    }
}
