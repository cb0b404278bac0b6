/// Mock implementations for testing
mod mock_event_publisher;
mod mock_manifest_discovery;
mod mock_package_manager;
mod mock_progress_reporter;
mod mock_scan_service;
mod mock_settings;

pub use mock_event_publisher::MockEventPublisher;
pub use mock_manifest_discovery::MockManifestDiscovery;
pub use mock_package_manager::MockPackageManagerClient;
pub use mock_progress_reporter::{LogEntry, MockProgressReporter};
pub use mock_scan_service::MockScanService;
pub use mock_settings::MockSettings;
