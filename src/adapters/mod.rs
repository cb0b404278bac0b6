/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: filesystem discovery,
/// package-manager processes, the OSV scan service, event fan-out,
/// console progress and report formatting.
pub mod outbound;
