//! Read models for CQRS-lite pattern
//!
//! View-optimized, serializable snapshots of a finished scan run that the
//! formatters render.

pub mod scan_report;
pub mod scan_report_builder;

pub use scan_report::{
    FailedProjectView, ProjectReportView, ReportMetadataView, ScanReport, SeverityCountView,
};
pub use scan_report_builder::{ProjectRun, ScanReportBuilder};
