//! Per-archive publishing metadata.
//!
//! The manifest is what the catalog embeds for every archive, so its JSON
//! shape is the catalog's public schema.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::bilingual::Bilingual;
use crate::error::ValidationError;

/// Kind of content an archive holds
///
/// Unknown kinds are kept verbatim so that re-serialising a manifest never
/// changes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoryKind {
    /// Narrative story with titled chapters
    #[default]
    Story,

    /// Article adapted from another source (requires an origin)
    Article,

    /// Any other kind string
    Other(String),
}

impl From<String> for StoryKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "story" => StoryKind::Story,
            "article" => StoryKind::Article,
            _ => StoryKind::Other(s),
        }
    }
}

impl From<StoryKind> for String {
    fn from(kind: StoryKind) -> Self {
        kind.to_string()
    }
}

impl std::fmt::Display for StoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryKind::Story => write!(f, "story"),
            StoryKind::Article => write!(f, "article"),
            StoryKind::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Publishable metadata record for one archive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manifest {
    /// Archive identifier
    pub id: String,

    /// Content version
    pub version: String,

    /// Content kind (`story` when absent)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<StoryKind>,

    /// Title in both languages
    pub title: Bilingual,

    /// Reference to a teaser image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teaser_image: Option<String>,

    /// Author name
    pub author: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_twitter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_note: Option<String>,

    /// RFC 3339 creation timestamp, stamped by [`Manifest::finalize`]
    pub created: String,

    /// RFC 3339 modification timestamp, stamped by [`Manifest::finalize`]
    pub modified: String,

    /// Summary in both languages
    pub summary: Bilingual,

    /// Free-form tags (at least one)
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Source of an article
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl Manifest {
    /// Effective content kind
    pub fn kind(&self) -> StoryKind {
        self.kind.clone().unwrap_or_default()
    }

    /// Parse the `created` timestamp, `None` if it is not valid RFC 3339
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created).ok()
    }

    /// Check the manifest invariants, stopping at the first violation.
    ///
    /// Fields are checked in declaration order. Nothing is modified.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyField("manifest id"));
        }
        if self.version.is_empty() {
            return Err(ValidationError::EmptyField("manifest version"));
        }
        self.title.require("manifest title.ja", "manifest title.en")?;
        if self.author.is_empty() {
            return Err(ValidationError::EmptyField("manifest author"));
        }
        self.summary.require("manifest summary.ja", "manifest summary.en")?;
        if self.tags.is_empty() {
            return Err(ValidationError::NoTags);
        }
        if self.kind() == StoryKind::Article
            && self.origin.as_deref().map_or(true, str::is_empty)
        {
            return Err(ValidationError::ArticleWithoutOrigin);
        }

        Ok(())
    }

    /// Validate and, on success, stamp `created` and `modified` with now.
    ///
    /// Any caller-supplied timestamps are overwritten. A manifest that fails
    /// validation is left untouched.
    pub fn finalize(&mut self) -> Result<(), ValidationError> {
        self.finalize_at(Utc::now())
    }

    /// [`Manifest::finalize`] with an explicit instant
    pub fn finalize_at(&mut self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        self.validate()?;

        let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        self.created = stamp.clone();
        self.modified = stamp;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid_manifest() -> Manifest {
        Manifest {
            id: "tanuki".to_string(),
            version: "1".to_string(),
            title: Bilingual::new("たぬき", "Tanuki"),
            author: "Aki".to_string(),
            summary: Bilingual::new("あらすじ", "Summary"),
            tags: vec!["folklore".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_manifest_passes() {
        assert!(valid_manifest().validate().is_ok());
    }

    #[test]
    fn test_first_violation_wins() {
        let manifest = Manifest {
            id: String::new(),
            tags: Vec::new(),
            ..valid_manifest()
        };
        assert_eq!(
            manifest.validate(),
            Err(ValidationError::EmptyField("manifest id"))
        );
    }

    #[test]
    fn test_missing_tags_reported_without_stamping() {
        let mut manifest = Manifest {
            tags: Vec::new(),
            created: "2020-01-01T00:00:00Z".to_string(),
            ..valid_manifest()
        };

        let err = manifest.finalize().unwrap_err();
        assert!(err.to_string().contains("tags"));
        assert_eq!(manifest.created, "2020-01-01T00:00:00Z");
        assert_eq!(manifest.modified, "");
    }

    #[test]
    fn test_article_requires_origin() {
        let mut manifest = Manifest {
            kind: Some(StoryKind::Article),
            ..valid_manifest()
        };
        assert_eq!(manifest.validate(), Err(ValidationError::ArticleWithoutOrigin));

        manifest.origin = Some(String::new());
        assert_eq!(manifest.validate(), Err(ValidationError::ArticleWithoutOrigin));

        manifest.origin = Some("https://example.com/news".to_string());
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_finalize_overwrites_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 0).unwrap();
        let mut manifest = Manifest {
            created: "1999-01-01T00:00:00Z".to_string(),
            modified: "1999-01-01T00:00:00Z".to_string(),
            ..valid_manifest()
        };

        manifest.finalize_at(now).unwrap();

        assert_eq!(manifest.created, "2024-03-09T12:30:00Z");
        assert_eq!(manifest.modified, "2024-03-09T12:30:00Z");
        assert!(manifest.created_at().is_some());
    }

    #[test]
    fn test_json_keys_and_optional_fields() {
        let manifest = Manifest {
            teaser_image: Some("teaser.png".to_string()),
            author_twitter: Some("@aki".to_string()),
            ..valid_manifest()
        };

        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(value["teaserImage"], "teaser.png");
        assert_eq!(value["authorTwitter"], "@aki");
        assert!(value.get("authorNote").is_none());
        assert!(value.get("type").is_none());
        assert_eq!(value["created"], "");
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let manifest: Manifest = serde_json::from_str(r#"{"id":"x","type":"dialogue"}"#).unwrap();
        assert_eq!(manifest.kind(), StoryKind::Other("dialogue".to_string()));

        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(value["type"], "dialogue");
    }

    #[test]
    fn test_default_kind_is_story() {
        assert_eq!(valid_manifest().kind(), StoryKind::Story);
        let manifest: Manifest = serde_json::from_str(r#"{"type":"article"}"#).unwrap();
        assert_eq!(manifest.kind(), StoryKind::Article);
    }
}
