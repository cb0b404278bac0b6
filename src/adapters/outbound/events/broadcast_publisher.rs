use crate::ports::outbound::{ScanEvent, ScanEventPublisher};
use tokio::sync::broadcast;
use tracing::trace;

/// Default number of undelivered events kept per subscriber
const DEFAULT_CAPACITY: usize = 256;

/// BroadcastEventPublisher adapter fanning scan events out to subscribers
///
/// Publishing never blocks and never fails: with no subscriber the event
/// is dropped, and a slow subscriber observes `Lagged` on its receiver.
#[derive(Debug, Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<ScanEvent>,
}

impl BroadcastEventPublisher {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanEventPublisher for BroadcastEventPublisher {
    fn publish(&self, event: ScanEvent) {
        trace!(event = ?event, "Publishing scan event");
        // Err only means nobody is subscribed
        let _ = self.sender.send(event);
    }
}
