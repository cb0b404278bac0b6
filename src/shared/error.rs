use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a clean workspace,
/// a workspace with visible issues, and a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no issues visible after filtering
    Success = 0,
    /// At least one issue is visible after filtering
    IssuesFound = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, discovery, I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::IssuesFound => write!(f, "Issues Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Domain errors raised while discovering, building and scanning projects.
///
/// Messages carry a hint line so they can be shown to the user unchanged.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan server is not configured\n\n💡 Hint: Set `server.url` in polyscan.config.yml or pass --server-url")]
    CredentialsNotConfigured,

    #[error("Failed to discover package manifests under {path}\nDetails: {details}\n\n💡 Hint: Check that the directory exists and is readable, or add it to `excluded_paths`")]
    ManifestDiscovery { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to parse workspace model: {path}\nDetails: {details}\n\n💡 Hint: The file must be a JSON export of the workspace modules")]
    WorkspaceModelParse { path: PathBuf, details: String },

    #[error("Command `{command}` failed in {directory}\nDetails: {details}\n\n💡 Hint: {hint}")]
    CommandFailed {
        command: String,
        directory: PathBuf,
        details: String,
        hint: String,
    },

    #[error("Scan service failed for component {component}\nDetails: {details}")]
    ScanService { component: String, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid workspace directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    /// Validation error for configuration values and CLI arguments
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::IssuesFound.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::IssuesFound), "Issues Found (1)");
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_credentials_not_configured_display() {
        let display = format!("{}", ScanError::CredentialsNotConfigured);
        assert!(display.contains("not configured"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_manifest_discovery_display() {
        let error = ScanError::ManifestDiscovery {
            path: PathBuf::from("/workspace"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("/workspace"));
        assert!(display.contains("Permission denied"));
        assert!(display.contains("excluded_paths"));
    }

    #[test]
    fn test_command_failed_display() {
        let error = ScanError::CommandFailed {
            command: "npm ls".to_string(),
            directory: PathBuf::from("/workspace/web"),
            details: "exit status 127".to_string(),
            hint: "Is npm installed?".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("npm ls"));
        assert!(display.contains("/workspace/web"));
        assert!(display.contains("Is npm installed?"));
    }

    #[test]
    fn test_scan_service_display() {
        let error = ScanError::ScanService {
            component: "npm://lodash:4.17.20".to_string(),
            details: "HTTP 503".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("npm://lodash:4.17.20"));
        assert!(display.contains("HTTP 503"));
    }

    #[test]
    fn test_validation_display() {
        let error = ScanError::Validation {
            message: "max_concurrent_requests must be greater than 0".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Validation error: max_concurrent_requests must be greater than 0"
        );
    }
}
