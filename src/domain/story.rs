//! Bilingual narrative content stored as `main.json` in every archive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bilingual::{Bilingual, Sentence};
use super::manifest::StoryKind;
use crate::error::ValidationError;

/// The narrative content of one archive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Story {
    /// Title in both languages
    pub title: Bilingual,

    /// Overrides the kind for content checks (`story` when absent)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<StoryKind>,

    /// Cover media reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<MediaEntry>,

    /// Ordered chapters (at least one)
    pub chapters: Vec<Chapter>,
}

/// One chapter of a story
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    /// Chapter title, required for the `story` kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Bilingual>,

    /// Ordered sentences (at least one)
    pub sentences: Vec<Sentence>,

    /// Media inserted before the sentence at each position
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub media: BTreeMap<usize, MediaEntry>,
}

/// A reference to an image, audio clip or video
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    /// Media type tag (e.g. "image", "audio")
    #[serde(rename = "type", default)]
    pub kind: String,

    /// URI or archive-relative reference
    #[serde(default)]
    pub uri: String,
}

impl MediaEntry {
    pub fn new(kind: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            uri: uri.into(),
        }
    }
}

impl Story {
    /// Effective content kind
    pub fn kind(&self) -> StoryKind {
        self.kind.clone().unwrap_or_default()
    }

    /// Check the story invariants, stopping at the first violation
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.title.require("story title.ja", "story title.en")?;

        if self.chapters.is_empty() {
            return Err(ValidationError::NoChapters);
        }

        let titled = self.kind() == StoryKind::Story;
        for (index, chapter) in self.chapters.iter().enumerate() {
            chapter.validate(index, titled)?;
        }

        Ok(())
    }
}

impl Chapter {
    fn validate(&self, index: usize, titled: bool) -> Result<(), ValidationError> {
        if titled && !self.title.as_ref().is_some_and(Bilingual::is_complete) {
            return Err(ValidationError::ChapterWithoutTitle { chapter: index });
        }

        if self.sentences.is_empty() {
            return Err(ValidationError::NoSentences { chapter: index });
        }

        for (position, sentence) in self.sentences.iter().enumerate() {
            if let Some(language) = sentence.missing_language() {
                return Err(ValidationError::IncompleteSentence {
                    chapter: index,
                    sentence: position,
                    language,
                });
            }
        }

        if let Some((&position, _)) = self.media.iter().find(|(_, m)| m.uri.is_empty()) {
            return Err(ValidationError::MediaWithoutUri {
                chapter: index,
                position,
            });
        }

        Ok(())
    }
}
