//! Building a catalog by walking a directory of archives.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use super::{Index, IndexEntry};
use crate::archive::{extract_manifest, hash_file, ArchiveLayout};
use crate::error::{Error, Result};

/// Build a fresh index over every archive under `root`.
///
/// The walk is depth-first and sequential, visiting directory entries in
/// file-name order, so the resulting order is deterministic. Only regular
/// files whose name ends with the layout's suffix are read; everything else
/// is skipped silently. Paths are recorded relative to `strip_prefix`.
///
/// The first error (walk, archive read, missing manifest, hash) aborts the
/// build and no partial index is returned.
pub fn build_index(root: &Path, strip_prefix: &Path, layout: &ArchiveLayout) -> Result<Index> {
    let mut index = Index::new();

    for path in archive_paths(root, &layout.suffix) {
        let path = path?;

        let manifest = extract_manifest(&path, &layout.manifest_entry)?;
        let sha256 = hash_file(&path)?;
        let relative = relative_path(&path, strip_prefix);

        debug!(path = %relative, id = %manifest.id, "Indexed archive");

        index.push(IndexEntry {
            path: relative,
            sha256,
            manifest,
        });
    }

    info!(root = %root.display(), entries = index.len(), "Built catalog");
    Ok(index)
}

/// Ids of all archives under `root`: file names with `suffix` removed, in
/// walk order
pub fn collect_ids(root: &Path, suffix: &str) -> Result<Vec<String>> {
    archive_paths(root, suffix)
        .map(|path| {
            let path = path?;
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            Ok(name.strip_suffix(suffix).unwrap_or(name).to_string())
        })
        .collect()
}

/// Regular files under `root` whose name ends with `suffix`
fn archive_paths<'a>(
    root: &'a Path,
    suffix: &'a str,
) -> impl Iterator<Item = Result<PathBuf>> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                let matches = entry.file_type().is_file()
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| name.ends_with(suffix));
                matches.then(|| Ok(entry.into_path()))
            }
            Err(e) => Some(Err(walk_error(root, e))),
        })
}

/// Path relative to `strip_prefix`, or the path as walked when it is not
/// beneath it
fn relative_path(path: &Path, strip_prefix: &Path) -> String {
    path.strip_prefix(strip_prefix)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    Error::io(path, err.into())
}
