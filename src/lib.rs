//! polyscan - dependency-tree vulnerability and license scanner
//!
//! Builds one deduplicated dependency tree per logical project across
//! Maven, Gradle, npm and Go modules in a workspace, scans the components
//! against a vulnerability/license service, and derives filtered views of
//! the results without rescanning.
//!
//! # Architecture
//!
//! The library follows a hexagonal layout:
//!
//! - **Domain** (`dependency_tree`): node model, per-ecosystem tree builders,
//!   merge and filter services
//! - **Application** (`application`): scan managers, the orchestrator,
//!   project views, report read models and the scan use case
//! - **Ports** (`ports`): interfaces to the workspace, tooling, scan service and user
//! - **Adapters** (`adapters`): concrete implementations of the ports
//! - **Shared** (`shared`): error types and file-safety helpers
//!
//! # Example
//!
//! ```no_run
//! use polyscan::prelude::*;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn scan() -> Result<()> {
//! let settings = Arc::new(Settings::default());
//! let workspace: Arc<dyn WorkspaceIntrospection> =
//!     Arc::new(EmptyWorkspace::new(PathBuf::from(".")));
//! let publisher = Arc::new(BroadcastEventPublisher::new());
//! let reporter: Arc<dyn ProgressReporter> = Arc::new(StderrProgressReporter::new());
//!
//! let deps = ScanDependencies {
//!     scan_service: Arc::new(OsvScanService::new(&settings.server_url, None)?),
//!     publisher: publisher.clone(),
//!     reporter: reporter.clone(),
//!     max_concurrent_requests: settings.max_concurrent_requests,
//! };
//! let factory = ManagerFactory::new(
//!     workspace.clone(),
//!     Arc::new(CommandPackageManagerClient::new()),
//!     deps,
//! );
//! let orchestrator = Arc::new(ScanOrchestrator::new(
//!     OrchestratorPorts {
//!         workspace,
//!         discovery: Arc::new(PackageFileFinder::new()),
//!         settings: settings.clone(),
//!         publisher: publisher.clone(),
//!         reporter: reporter.clone(),
//!     },
//!     factory,
//! ));
//!
//! let mut use_case = ScanWorkspaceUseCase::new(orchestrator, publisher.subscribe(), reporter);
//! let response = use_case
//!     .execute(ScanRequest::new(false, settings.filter.clone()))
//!     .await?;
//! if let Some(report) = response.report() {
//!     println!("{}", TextTreeFormatter::new(false).format(report)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod dependency_tree;
pub mod logging;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::events::BroadcastEventPublisher;
    pub use crate::adapters::outbound::filesystem::{
        EmptyWorkspace, FileSystemWriter, JsonWorkspaceModel, PackageFileFinder, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextTreeFormatter};
    pub use crate::adapters::outbound::network::OsvScanService;
    pub use crate::adapters::outbound::process::CommandPackageManagerClient;
    pub use crate::application::dto::{OutputFormat, ScanRequest, ScanResponse};
    pub use crate::application::factories::ManagerFactory;
    pub use crate::application::orchestrator::{
        OrchestratorPorts, ScanDispatch, ScanOrchestrator, SkipReason,
    };
    pub use crate::application::project_views::{CanonicalTreeSource, ProjectViews};
    pub use crate::application::read_models::ScanReport;
    pub use crate::application::scan_manager::{ScanDependencies, ScanManager, ScanSummary};
    pub use crate::application::use_cases::ScanWorkspaceUseCase;
    pub use crate::config::Settings;
    pub use crate::dependency_tree::domain::{
        ComponentId, DependencyNode, Ecosystem, Issue, License, ProjectKey, Severity,
    };
    pub use crate::dependency_tree::services::{FilterState, TreeFilter};
    pub use crate::ports::outbound::{
        ManifestDiscovery, OutputPresenter, PackageManagerClient, ProgressReporter, ScanEvent,
        ScanEventPublisher, ScanService, SettingsProvider, TreeFormatter, WorkspaceIntrospection,
    };
    pub use crate::shared::Result;
}
