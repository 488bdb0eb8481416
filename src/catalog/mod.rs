//! Catalog (`index.json`) over a directory of archives.
//!
//! A catalog is rebuilt from scratch on every run:
//!
//! ```text
//! directory ──build_index──▶ Index ──sort_by_created?──▶ limit? ──write──▶ <dir>/index.json
//! ```
//!
//! Nothing is updated incrementally; the previous catalog file is simply
//! overwritten.

pub mod builder;
pub mod order;
pub mod writer;

use serde::{Deserialize, Serialize};

use crate::domain::Manifest;

pub use builder::{build_index, collect_ids};

/// One catalog row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Archive path relative to the catalog root
    pub path: String,

    /// Lowercase hex SHA-256 of the whole archive file
    pub sha256: String,

    /// Manifest embedded in the archive
    pub manifest: Manifest,
}

/// Ordered list of catalog rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index(Vec<IndexEntry>);

impl Index {
    /// Create an empty index
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an entry
    pub fn push(&mut self, entry: IndexEntry) {
        self.0.push(entry);
    }

    /// All entries in their current order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.0
    }

    /// Iterate over the entries
    pub fn iter(&self) -> std::slice::Iter<'_, IndexEntry> {
        self.0.iter()
    }

    /// Find an entry by manifest id
    pub fn get(&self, id: &str) -> Option<&IndexEntry> {
        self.0.iter().find(|e| e.manifest.id == id)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<IndexEntry> {
        self.0
    }
}

impl From<Vec<IndexEntry>> for Index {
    fn from(entries: Vec<IndexEntry>) -> Self {
        Self(entries)
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a IndexEntry;
    type IntoIter = std::slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
