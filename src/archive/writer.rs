//! Packing a story and its manifest into an archive.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::ArchiveLayout;
use crate::domain::{Manifest, Story};
use crate::error::{Error, Result};

/// Write the story entry, then the manifest entry, and finish the container.
///
/// Both values are serialized as compact JSON. Returns the underlying
/// writer once the central directory has been written.
pub fn pack_into<W: Write + Seek>(
    writer: W,
    story: &Story,
    manifest: &Manifest,
    layout: &ArchiveLayout,
) -> Result<W> {
    let story_json = serde_json::to_vec(story)?;
    let manifest_json = serde_json::to_vec(manifest)?;

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(writer);
    for (name, content) in [
        (layout.story_entry.as_str(), story_json),
        (layout.manifest_entry.as_str(), manifest_json),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(&content).map_err(ZipError::Io)?;
    }

    Ok(zip.finish()?)
}

/// Pack into a new file at `dest`, replacing any existing file
pub fn pack(dest: &Path, story: &Story, manifest: &Manifest, layout: &ArchiveLayout) -> Result<()> {
    let file = File::create(dest).map_err(|e| Error::io(dest, e))?;

    match pack_into(file, story, manifest, layout) {
        Ok(file) => file.sync_all().map_err(|e| Error::io(dest, e)),
        Err(Error::Archive(ZipError::Io(e))) => Err(Error::io(dest, e)),
        Err(e) => Err(e),
    }
}
