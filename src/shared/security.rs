use crate::shared::error::TakeoverError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum manifest size accepted by the readers (10 MB)
///
/// Manifests are small text files; anything larger is refused before reading.
pub const MAX_MANIFEST_SIZE: u64 = 10 * 1024 * 1024;

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(TakeoverError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Manifests this large are not scanned".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Reads a manifest after the symlink, file-type and size checks pass
///
/// # Arguments
/// * `path` - The manifest to read
/// * `file_description` - Description of the file (e.g., "package.json") for error messages
///
/// # Errors
/// Returns an error if:
/// - The path is a symbolic link or not a regular file
/// - The file exceeds [`MAX_MANIFEST_SIZE`]
/// - The file is not valid UTF-8 or cannot be read
pub fn read_guarded_file(path: &Path, file_description: &str) -> Result<String> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        return Err(TakeoverError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Symbolic links are not followed; point the scan at the real file".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_MANIFEST_SIZE)?;

    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_description, e))
}
