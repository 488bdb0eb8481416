//! Writing and re-reading catalog files.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use super::Index;
use crate::error::{Error, Result};

/// Permissions of a written catalog (owner rw, group/other r)
#[cfg(unix)]
const CATALOG_MODE: u32 = 0o644;

/// Turn an archive path into a catalog-relative one.
///
/// Removes `strip_prefix` as a textual prefix when present, then at most one
/// leading path separator.
pub fn normalize_path(path: &str, strip_prefix: &str) -> String {
    let path = path.strip_prefix(strip_prefix).unwrap_or(path);
    let path = path
        .strip_prefix('/')
        .or_else(|| path.strip_prefix(std::path::MAIN_SEPARATOR))
        .unwrap_or(path);
    path.to_string()
}

impl Index {
    /// Normalize every entry path against `strip_prefix`
    pub fn normalize_paths(&mut self, strip_prefix: &str) {
        for entry in &mut self.0 {
            entry.path = normalize_path(&entry.path, strip_prefix);
        }
    }

    /// Serialize as 2-space indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Normalize paths and write the catalog to `output`, replacing it.
    ///
    /// The JSON is written to a temporary file next to `output` and then
    /// renamed over it, so readers never observe a half-written catalog.
    pub fn write(&mut self, strip_prefix: &str, output: &Path) -> Result<()> {
        self.normalize_paths(strip_prefix);
        let json = self.to_json_pretty()?;

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| Error::io(file.path(), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(CATALOG_MODE))
                .map_err(|e| Error::io(file.path(), e))?;
        }

        file.persist(output).map_err(|e| Error::io(output, e.error))?;

        info!(path = %output.display(), entries = self.len(), "Wrote catalog");
        Ok(())
    }

    /// Load a catalog previously written with [`Index::write`]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        serde_json::from_str(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            entry: "catalog".to_string(),
            source,
        })
    }
}
