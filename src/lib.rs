//! sakescript - Bilingual story archives and their catalog
//!
//! Packages bilingual (Japanese/English) stories into zip archives,
//! validates their content, and builds a searchable catalog over a
//! directory of archives.
//!
//! # Architecture
//!
//! The catalog is rebuilt in full on every run:
//! - Every archive under the directory is opened and its manifest read
//! - Each archive file is hashed (SHA-256)
//! - The entries are optionally sorted and truncated
//! - The catalog is written as indented JSON next to the archives
//!
//! # Modules
//!
//! - `archive`: Container access (read entries, hash, pack)
//! - `catalog`: Index building, ordering, writing
//! - `domain`: Data structures (Manifest, Story, Bilingual)
//! - `config`: Directory and file-name configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Build community/index.json, newest first, last 50 entries
//! sakescript index --dir community --sort --limit 50
//!
//! # Pack a story
//! sakescript pack --story main.json --manifest manifest.json --output community/fox.zip
//! ```

pub mod archive;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;

// Re-export main types at crate root for convenience
pub use archive::ArchiveLayout;
pub use catalog::{build_index, Index, IndexEntry};
pub use cli::{rebuild_catalog, IndexOptions};
pub use config::Config;
pub use domain::{Bilingual, Chapter, Manifest, MediaEntry, Sentence, Story, StoryKind};
pub use error::{Error, Result, ValidationError};
