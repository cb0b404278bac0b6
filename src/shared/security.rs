use crate::shared::error::ScanError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a manifest or workspace model we are willing to read (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Reads a manifest-like file after checking that it is a regular file
/// (not a symlink, not a directory) and that it is below `MAX_FILE_SIZE`.
///
/// # Arguments
/// * `path` - File to read
/// * `file_description` - Human readable name used in error messages (e.g. "package.json")
///
/// # Errors
/// Returns `ScanError::FileReadError` when any check fails or the read itself fails.
pub fn read_regular_file(path: &Path, file_description: &str) -> Result<String> {
    let metadata = fs::symlink_metadata(path).map_err(|e| ScanError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(ScanError::FileReadError {
            path: path.to_path_buf(),
            details: format!(
                "Security: {} is a symbolic link. Symbolic links are not followed.",
                file_description
            ),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(ScanError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

    fs::read_to_string(path).map_err(|e| {
        ScanError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(ScanError::FileReadError {
            path: path.to_path_buf(),
            details: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
        }
        .into());
    }
    Ok(())
}
