#![deny(unsafe_code)]

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::StandardsError;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Checks the file at `path` against a pinned lowercase hex digest.
pub fn verify_digest(path: &Path, expected: &str) -> Result<(), StandardsError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(growth_ingest::IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(e) => return Err(StandardsError::io(path, e)),
    };
    let actual = sha256_hex(&bytes);
    if actual != expected {
        return Err(StandardsError::Sha256Mismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_known_input() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn mismatch_reports_both_digests() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        std::fs::write(&path, "abc").unwrap();
        let expected = "0".repeat(64);
        match verify_digest(&path, &expected) {
            Err(StandardsError::Sha256Mismatch {
                expected: e, actual, ..
            }) => {
                assert_eq!(e, expected);
                assert_eq!(actual, sha256_hex(b"abc"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(verify_digest(&path, &sha256_hex(b"abc")).is_ok());
    }
}
