//! Error types for archive reading, validation and catalog construction.
//!
//! Every component returns these errors unchanged; only the process
//! boundary (the CLI) reports them and terminates.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while packing, reading or indexing archives
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Entry '{entry}' not found in archive {}", archive.display())]
    EntryNotFound { archive: PathBuf, entry: String },

    #[error("Failed to parse '{entry}' in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        entry: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Archive write error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl Error {
    /// Wrap an I/O error with the path it occurred at
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this is the "named entry absent" case.
    ///
    /// Callers that can tolerate archives without a manifest check this
    /// instead of aborting.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntryNotFound { .. })
    }
}

/// A violated invariant of a manifest or story.
///
/// Validation stops at the first violation, so a value carries exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("manifest tags must not be empty")]
    NoTags,

    #[error("article manifests require an origin")]
    ArticleWithoutOrigin,

    #[error("story must have at least one chapter")]
    NoChapters,

    #[error("chapter {chapter} requires a title in both languages")]
    ChapterWithoutTitle { chapter: usize },

    #[error("chapter {chapter} must have at least one sentence")]
    NoSentences { chapter: usize },

    #[error("chapter {chapter}, sentence {sentence}: {language} text must not be empty")]
    IncompleteSentence {
        chapter: usize,
        sentence: usize,
        language: &'static str,
    },

    #[error("chapter {chapter}, media at {position}: uri must not be empty")]
    MediaWithoutUri { chapter: usize, position: usize },
}
