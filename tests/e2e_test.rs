/// End-to-end tests for the CLI
///
/// Every run here stays offline: workspaces without manifests or modules
/// register no projects, so the scan service is never called.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("polyscan")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--severity"));
    }

    /// Exit code 0: long help explains that --quick needs an in-process cache
    #[test]
    fn test_exit_code_help_documents_quick_scope() {
        cargo_bin_cmd!("polyscan")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("only repeated scans inside one process"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("polyscan")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("polyscan")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("polyscan")
            .args(["-f", "markdown"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Invalid format"));
    }

    /// Exit code 2: Invalid severity value
    #[test]
    fn test_exit_code_invalid_severity() {
        cargo_bin_cmd!("polyscan")
            .args(["--severity", "severe"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - non-existent workspace path
    #[test]
    fn test_exit_code_application_error_nonexistent_path() {
        cargo_bin_cmd!("polyscan")
            .args(["-p", "/nonexistent/path/that/does/not/exist"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Directory does not exist"));
    }

    /// Exit code 3: Application error - path is a file, not a directory
    #[test]
    fn test_exit_code_application_error_file_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("package.json");
        fs::write(&file, "{}").unwrap();

        cargo_bin_cmd!("polyscan")
            .arg("-p")
            .arg(&file)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Not a directory"));
    }

    /// Exit code 3: no scan server configured
    #[test]
    fn test_exit_code_credentials_not_configured() {
        let temp_dir = TempDir::new().unwrap();

        cargo_bin_cmd!("polyscan")
            .arg("-p")
            .arg(temp_dir.path())
            .args(["--server-url", ""])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("not configured"));
    }
}

#[test]
fn test_e2e_empty_workspace_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("report.json");

    cargo_bin_cmd!("polyscan")
        .arg("-p")
        .arg(temp_dir.path())
        .args(["-f", "json", "--no-color"])
        .arg("-o")
        .arg(&output)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Scanned 0 project(s)"));

    let content = fs::read_to_string(&output).unwrap();
    let report: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(report["metadata"]["tool_name"], "polyscan");
    assert_eq!(report["distinct_issues"], 0);
    assert_eq!(report["projects"].as_array().unwrap().len(), 0);
}

#[test]
fn test_e2e_json_on_stdout_stays_clean() {
    let temp_dir = TempDir::new().unwrap();

    let assert = cargo_bin_cmd!("polyscan")
        .arg("-p")
        .arg(temp_dir.path())
        .args(["-f", "json", "--log-level", "debug"])
        .assert()
        .code(0);

    // Diagnostics and progress go to stderr only
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(report["metadata"]["run_id"]
        .as_str()
        .unwrap()
        .starts_with("urn:uuid:"));
}

#[test]
fn test_e2e_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("polyscan.config.yml"),
        "max_concurrent_requests: 0\n",
    )
    .unwrap();

    cargo_bin_cmd!("polyscan")
        .arg("-p")
        .arg(temp_dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("max_concurrent_requests"));
}

#[test]
fn test_e2e_explicit_config_file_not_found() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("polyscan")
        .arg("-p")
        .arg(temp_dir.path())
        .args(["-c", "/nonexistent/polyscan.config.yml"])
        .assert()
        .code(3);
}

#[test]
fn test_e2e_invalid_workspace_model() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("polyscan.workspace.json"),
        r#"{ "modules": [] }"#,
    )
    .unwrap();

    cargo_bin_cmd!("polyscan")
        .arg("-p")
        .arg(temp_dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to parse workspace model"));
}

#[test]
fn test_e2e_indexing_workspace_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("polyscan.workspace.json"),
        r#"{ "project_name": "shop", "indexing": true }"#,
    )
    .unwrap();

    cargo_bin_cmd!("polyscan")
        .arg("-p")
        .arg(temp_dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("indexing"));
}
