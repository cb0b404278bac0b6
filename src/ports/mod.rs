/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven (outbound) ports exist: the orchestrator itself is the
/// entry point the CLI drives.
pub mod outbound;
