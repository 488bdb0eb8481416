//! Japanese/English text pairs.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A piece of text in both supported languages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bilingual {
    /// Japanese text
    #[serde(default)]
    pub ja: String,

    /// English text
    #[serde(default)]
    pub en: String,
}

/// A translation pair inside a chapter
pub type Sentence = Bilingual;

impl Bilingual {
    /// Create a new pair
    pub fn new(ja: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ja: ja.into(),
            en: en.into(),
        }
    }

    /// Whether both languages carry text
    pub fn is_complete(&self) -> bool {
        !self.ja.is_empty() && !self.en.is_empty()
    }

    /// The first language with empty text, Japanese checked first
    pub fn missing_language(&self) -> Option<&'static str> {
        if self.ja.is_empty() {
            Some("ja")
        } else if self.en.is_empty() {
            Some("en")
        } else {
            None
        }
    }

    /// Require both languages, reporting the field names given for each
    pub(crate) fn require(
        &self,
        ja_field: &'static str,
        en_field: &'static str,
    ) -> Result<(), ValidationError> {
        match self.missing_language() {
            Some("ja") => Err(ValidationError::EmptyField(ja_field)),
            Some(_) => Err(ValidationError::EmptyField(en_field)),
            None => Ok(()),
        }
    }
}
