//! Domain types for sakescript archives.
//!
//! This module contains the content model:
//! - Manifest: Publishable metadata for one archive
//! - Story: Bilingual narrative content (chapters, sentences, media)
//! - Bilingual: A Japanese/English text pair

pub mod bilingual;
pub mod manifest;
pub mod story;

// Re-export commonly used types
pub use bilingual::{Bilingual, Sentence};
pub use manifest::{Manifest, StoryKind};
pub use story::{Chapter, MediaEntry, Story};
