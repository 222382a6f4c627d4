//! Integrity checks for the files the service loads at startup.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::scorer::LoadError;

/// Returns the lowercase hex SHA-256 digest of the file at `path`.
pub fn sha256_file(path: &Path) -> Result<String, LoadError> {
    log::debug!("Hashing file: {:?}", path);
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Checks the file at `path` against `expected_hash`.
///
/// The comparison ignores case and surrounding whitespace, so digests pasted
/// from `sha256sum` output work as-is.
pub fn verify_file(path: &Path, expected_hash: &str, file_type: &str) -> Result<(), LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            file_type: file_type.to_string(),
            path: path.display().to_string(),
        });
    }

    let expected = expected_hash.trim().to_ascii_lowercase();
    let actual = sha256_file(path)?;
    log::info!("Verifying {} file {:?}", file_type, path);
    log::info!("  Calculated hash: {}", actual);
    log::info!("  Expected hash:   {}", expected);

    if actual != expected {
        log::error!("{} hash mismatch: expected {}, got {}", file_type, expected, actual);
        return Err(LoadError::HashMismatch {
            file_type: file_type.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}
