//! Reading named entries out of an archive.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::domain::{Manifest, Story};
use crate::error::{Error, Result};

/// Read the raw bytes of the entry called exactly `entry`.
///
/// Entry names are matched case-sensitively without normalization. A
/// container that cannot be opened is an I/O error; a missing entry is
/// [`Error::EntryNotFound`].
pub fn read_entry(path: &Path, entry: &str) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| container_error(path, e))?;

    let mut zipped = match archive.by_name(entry) {
        Ok(zipped) => zipped,
        Err(ZipError::FileNotFound) => {
            return Err(Error::EntryNotFound {
                archive: path.to_path_buf(),
                entry: entry.to_string(),
            })
        }
        Err(e) => return Err(container_error(path, e)),
    };

    let mut bytes = Vec::new();
    zipped
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(path, e))?;

    Ok(bytes)
}

/// Read and parse the manifest entry of an archive
pub fn extract_manifest(path: &Path, entry: &str) -> Result<Manifest> {
    extract(path, entry)
}

/// Read and parse the story entry of an archive
pub fn extract_story(path: &Path, entry: &str) -> Result<Story> {
    extract(path, entry)
}

fn extract<T: DeserializeOwned>(path: &Path, entry: &str) -> Result<T> {
    let bytes = read_entry(path, entry)?;

    serde_json::from_slice(&bytes).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        entry: entry.to_string(),
        source,
    })
}

/// Corrupt or unreadable containers surface as I/O errors
fn container_error(path: &Path, err: ZipError) -> Error {
    let source = match err {
        ZipError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    };
    Error::io(path, source)
}
