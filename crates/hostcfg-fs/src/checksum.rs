//! SHA-256 checksums in the canonical `sha256:<hex>` format
//!
//! Used to detect that a host file changed between the read and the
//! replace, and to verify restored backups.

use sha2::{Digest, Sha256};
use std::path::Path;

const PREFIX: &str = "sha256:";

/// Checksum of raw bytes.
pub fn compute_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Checksum of a file's current contents.
///
/// Returns `Ok(None)` when the file does not exist, so callers can tell
/// "absent" apart from "empty".
pub fn compute_file_checksum(path: &Path) -> std::io::Result<Option<String>> {
    match std::fs::read(path) {
        Ok(content) => Ok(Some(compute_checksum(&content))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_known_value() {
        assert_eq!(
            compute_checksum(b"hello world"),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn different_content_different_checksum() {
        assert_ne!(compute_checksum(b"aaa"), compute_checksum(b"bbb"));
    }

    #[test]
    fn missing_file_has_no_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let result = compute_file_checksum(&dir.path().join("absent.json")).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn file_checksum_matches_content_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{}").unwrap();

        let from_file = compute_file_checksum(&path).unwrap();
        assert_eq!(from_file, Some(compute_checksum(b"{}")));
    }
}
