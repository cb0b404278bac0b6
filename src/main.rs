mod cli;

use cli::Args;
use polyscan::adapters::outbound::console::StderrProgressReporter;
use polyscan::adapters::outbound::events::BroadcastEventPublisher;
use polyscan::adapters::outbound::filesystem::{
    EmptyWorkspace, JsonWorkspaceModel, PackageFileFinder, WORKSPACE_MODEL_FILE_NAME,
};
use polyscan::adapters::outbound::network::OsvScanService;
use polyscan::adapters::outbound::process::CommandPackageManagerClient;
use polyscan::application::dto::{ScanRequest, ScanResponse};
use polyscan::application::factories::{
    FormatterFactory, ManagerFactory, PresenterFactory, PresenterType,
};
use polyscan::application::orchestrator::{OrchestratorPorts, ScanOrchestrator};
use polyscan::application::scan_manager::ScanDependencies;
use polyscan::application::use_cases::ScanWorkspaceUseCase;
use polyscan::config::{self, Settings};
use polyscan::logging;
use polyscan::ports::outbound::{ProgressReporter, WorkspaceIntrospection};
use polyscan::shared::error::{ExitCode, ScanError};
use polyscan::shared::Result;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    // clap exits with status 2 on invalid arguments
    let args = Args::parse_args();

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };
    process::exit(code.as_i32());
}

async fn run(args: Args) -> Result<ExitCode> {
    let workspace_dir = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let workspace_dir = validate_project_path(&workspace_dir)?;

    let settings = Arc::new(load_settings(&args, &workspace_dir)?);
    logging::init_tracing(&settings.log_level, settings.log_format)?;
    info!(
        workspace = %workspace_dir.display(),
        quick_scan = settings.quick_scan,
        "polyscan starting"
    );

    let workspace = load_workspace(&args, &workspace_dir)?;

    // Create adapters (Dependency Injection)
    let publisher = Arc::new(BroadcastEventPublisher::new());
    let progress_reporter: Arc<dyn ProgressReporter> = Arc::new(StderrProgressReporter::new());
    let scan_service =
        OsvScanService::new(&settings.server_url, settings.access_token.clone())?;

    let deps = ScanDependencies {
        scan_service: Arc::new(scan_service),
        publisher: publisher.clone(),
        reporter: progress_reporter.clone(),
        max_concurrent_requests: settings.max_concurrent_requests,
    };
    let factory = ManagerFactory::new(
        workspace.clone(),
        Arc::new(CommandPackageManagerClient::new()),
        deps,
    );
    let orchestrator = Arc::new(ScanOrchestrator::new(
        OrchestratorPorts {
            workspace,
            discovery: Arc::new(PackageFileFinder::new()),
            settings: settings.clone(),
            publisher: publisher.clone(),
            reporter: progress_reporter.clone(),
        },
        factory,
    ));

    // Execute use case
    let mut use_case =
        ScanWorkspaceUseCase::new(orchestrator, publisher.subscribe(), progress_reporter);
    let request = ScanRequest::new(settings.quick_scan, settings.filter.clone());
    let report = match use_case.execute(request).await? {
        ScanResponse::Completed(report) => report,
        // Already reported to the user by the orchestrator
        ScanResponse::Skipped(_) => return Ok(ExitCode::ApplicationError),
    };

    let presenter_type = PresenterType::from_output(args.output.clone());
    let colored =
        !args.no_color && presenter_type.is_stdout() && std::io::stdout().is_terminal();

    eprintln!("{}", FormatterFactory::progress_message(args.format));
    let formatter = FormatterFactory::create(args.format, colored);
    let formatted_output = formatter.format(&report)?;

    let presenter = PresenterFactory::create(presenter_type);
    presenter.present(&formatted_output)?;

    // Incomplete results must not pass for a clean workspace
    Ok(if report.has_failures() {
        ExitCode::ApplicationError
    } else if report.has_issues() {
        ExitCode::IssuesFound
    } else {
        ExitCode::Success
    })
}

/// Config file values (explicit `--config`, else auto-discovered) with CLI overrides
fn load_settings(args: &Args, workspace_dir: &Path) -> Result<Settings> {
    let config_file = match &args.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(workspace_dir)?,
    };
    let mut settings = Settings::from_config(config_file.unwrap_or_default())?;
    args.apply_to(&mut settings)?;
    Ok(settings)
}

/// Explicit `--workspace-model`, else the default export in the workspace,
/// else a workspace with manifest discovery only
fn load_workspace(args: &Args, workspace_dir: &Path) -> Result<Arc<dyn WorkspaceIntrospection>> {
    if let Some(path) = &args.workspace_model {
        return Ok(Arc::new(JsonWorkspaceModel::load(path)?));
    }
    let default_model = workspace_dir.join(WORKSPACE_MODEL_FILE_NAME);
    if default_model.is_file() {
        return Ok(Arc::new(JsonWorkspaceModel::load(&default_model)?));
    }
    Ok(Arc::new(EmptyWorkspace::new(workspace_dir.to_path_buf())))
}

/// Returns the canonical workspace directory
fn validate_project_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(ScanError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| ScanError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(ScanError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Workspace path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(ScanError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    path.canonicalize().map_err(|e| {
        ScanError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to canonicalize path: {}", e),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_project_path_valid_directory() {
        let temp_dir = TempDir::new().unwrap();
        let resolved = validate_project_path(temp_dir.path()).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.is_dir());
    }

    #[test]
    fn test_validate_project_path_nonexistent() {
        let err = validate_project_path(Path::new("/nonexistent/path/that/does/not/exist"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Directory does not exist"));
    }

    #[test]
    fn test_validate_project_path_file_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("pom.xml");
        fs::write(&file_path, "<project/>").unwrap();

        let err = validate_project_path(&file_path).unwrap_err().to_string();
        assert!(err.contains("Not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_project_path_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real");
        fs::create_dir(&target).unwrap();
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = validate_project_path(&link).unwrap_err().to_string();
        assert!(err.contains("symbolic link"));
    }

    #[test]
    fn test_load_workspace_falls_back_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let args = Args::try_parse_from(["polyscan"]).unwrap();

        let workspace = load_workspace(&args, temp_dir.path()).unwrap();
        assert!(!workspace.is_indexing());
        assert_eq!(workspace.base_path(), temp_dir.path());
    }

    #[test]
    fn test_load_settings_discovers_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(config::CONFIG_FILENAME),
            "quick_scan: true\nmax_concurrent_requests: 3\n",
        )
        .unwrap();
        let args = Args::try_parse_from(["polyscan", "--max-concurrent-requests", "5"]).unwrap();

        let settings = load_settings(&args, temp_dir.path()).unwrap();
        assert!(settings.quick_scan);
        assert_eq!(settings.max_concurrent_requests, 5);
    }
}
