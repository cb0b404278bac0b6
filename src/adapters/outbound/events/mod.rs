/// Event adapters for the view/notification sink
mod broadcast_publisher;

pub use broadcast_publisher::BroadcastEventPublisher;
