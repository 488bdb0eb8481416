//! Content digests of whole archive files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

const BUFFER_SIZE: usize = 8192;

/// Stream a file through SHA-256 and return the lowercase hex digest
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; BUFFER_SIZE];

    loop {
        let read = file.read(&mut buffer).map_err(|e| Error::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_known_digest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("abc.bin");
        std::fs::write(&path, b"abc").unwrap();

        assert_eq!(
            hash_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_larger_than_buffer() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.bin");
        let content = vec![7_u8; BUFFER_SIZE * 3 + 11];
        std::fs::write(&path, &content).unwrap();

        let expected = hex::encode(Sha256::digest(&content));
        let digest = hash_file(&path).unwrap();
        assert_eq!(digest, expected);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = hash_file(&temp.path().join("nope.zip")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
