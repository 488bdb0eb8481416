//! Story archives: zip containers holding `main.json` and `manifest.json`.
//!
//! # Layout
//!
//! ```text
//! <id>.zip
//! ├── main.json        # Story (chapters, sentences, media)
//! └── manifest.json    # Manifest (title, author, tags, dates)
//! ```
//!
//! The container is a plain zip file used as a directory of named entries.

pub mod hash;
pub mod reader;
pub mod writer;

pub use hash::hash_file;
pub use reader::{extract_manifest, extract_story, read_entry};
pub use writer::{pack, pack_into};

/// Entry holding the serialized [`crate::domain::Story`]
pub const MAIN_ENTRY: &str = "main.json";

/// Entry holding the serialized [`crate::domain::Manifest`]
pub const MANIFEST_ENTRY: &str = "manifest.json";

/// File suffix identifying archives during a directory scan
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Names that identify archives and their entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    /// Literal, case-sensitive file name suffix of archives
    pub suffix: String,

    /// Entry holding the story
    pub story_entry: String,

    /// Entry holding the manifest
    pub manifest_entry: String,
}

impl Default for ArchiveLayout {
    fn default() -> Self {
        Self {
            suffix: ARCHIVE_SUFFIX.to_string(),
            story_entry: MAIN_ENTRY.to_string(),
            manifest_entry: MANIFEST_ENTRY.to_string(),
        }
    }
}

impl ArchiveLayout {
    /// Whether a file name marks an archive
    pub fn is_archive_name(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix)
    }
}
