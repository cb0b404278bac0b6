/// Application layer - orchestration, scan managers, views and use cases
///
/// This layer owns the per-project scan lifecycle and coordinates the
/// domain with infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod orchestrator;
pub mod project_views;
pub mod read_models;
pub mod scan_cache;
pub mod scan_manager;
pub mod use_cases;
