/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with the host workspace, package-manager tooling, the
/// scan service and the user.
pub mod manifest_discovery;
pub mod native_graph;
pub mod output_presenter;
pub mod package_manager_client;
pub mod progress_reporter;
pub mod scan_event_publisher;
pub mod scan_service;
pub mod settings_provider;
pub mod tree_formatter;
pub mod workspace_introspection;

pub use manifest_discovery::{ManifestDirs, ManifestDiscovery};
pub use native_graph::{
    Coordinates, GoModuleGraph, LibraryDependency, NativeDependency, NativeModule, NpmDependency,
    NpmPackageTree,
};
pub use output_presenter::OutputPresenter;
pub use package_manager_client::PackageManagerClient;
pub use progress_reporter::ProgressReporter;
pub use scan_event_publisher::{ScanEvent, ScanEventPublisher};
pub use scan_service::{ComponentScanResult, ScanService};
pub use settings_provider::SettingsProvider;
pub use tree_formatter::TreeFormatter;
pub use workspace_introspection::WorkspaceIntrospection;
