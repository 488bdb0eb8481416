//! Configuration for the indexer and packer.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (applied by the CLI on top of the loaded config)
//! 2. Environment variables (SAKESCRIPT_DIR)
//! 3. Project config file (.sakescript/config.yaml)
//! 4. User config file (<config dir>/sakescript/config.yaml)
//! 5. Defaults (./community, index.json, .zip, manifest.json, main.json)
//!
//! Config file discovery:
//! - Searches current directory and parents for .sakescript/config.yaml
//! - A relative `directory` is resolved against the directory containing
//!   `.sakescript/`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::archive::{ArchiveLayout, ARCHIVE_SUFFIX, MAIN_ENTRY, MANIFEST_ENTRY};

/// Environment variable overriding the indexed directory
pub const DIR_ENV: &str = "SAKESCRIPT_DIR";

/// Directory indexed when nothing else is configured
pub const DEFAULT_DIRECTORY: &str = "community";

/// Catalog file name inside the indexed directory
pub const DEFAULT_INDEX_FILE: &str = "index.json";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub directory: Option<String>,
    pub index_file: Option<String>,
    pub archive: ArchiveSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArchiveSection {
    pub suffix: Option<String>,
    pub manifest_entry: Option<String>,
    pub story_entry: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory whose archives are cataloged
    pub directory: PathBuf,

    /// Catalog file name, written inside `directory`
    pub index_file: String,

    /// Archive suffix and entry names
    pub layout: ArchiveLayout,

    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            layout: ArchiveLayout::default(),
            config_file: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources except command-line flags
    pub fn load() -> Result<Self> {
        let config_file = find_config_file().or_else(user_config_file);
        let env_dir = std::env::var(DIR_ENV).ok();
        Self::resolve(config_file, env_dir)
    }

    fn resolve(config_file: Option<PathBuf>, env_dir: Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(ref path) = config_file {
            let file = load_config_file(path)?;

            // Base directory is the parent of .sakescript/
            let base_dir = path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(Path::new("."));

            if let Some(dir) = file.directory {
                config.directory = resolve_path(base_dir, &dir);
            }
            if let Some(index_file) = file.index_file {
                config.index_file = index_file;
            }

            config.layout = ArchiveLayout {
                suffix: file.archive.suffix.unwrap_or_else(|| ARCHIVE_SUFFIX.to_string()),
                story_entry: file
                    .archive
                    .story_entry
                    .unwrap_or_else(|| MAIN_ENTRY.to_string()),
                manifest_entry: file
                    .archive
                    .manifest_entry
                    .unwrap_or_else(|| MANIFEST_ENTRY.to_string()),
            };
        }

        if let Some(dir) = env_dir.filter(|d| !d.is_empty()) {
            config.directory = PathBuf::from(dir);
        }

        config.config_file = config_file;
        Ok(config)
    }

    /// Override the indexed directory (from a command-line flag)
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Path of the catalog file: `<directory>/<index_file>`
    pub fn index_path(&self) -> PathBuf {
        self.directory.join(&self.index_file)
    }

    /// Prefix stripped from entry paths when writing the catalog
    pub fn strip_prefix(&self) -> String {
        self.directory.to_string_lossy().into_owned()
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".sakescript").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// User-level config file, if present
fn user_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("sakescript").join("config.yaml");
    path.exists().then_some(path)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, yaml: &str) -> PathBuf {
        let dir = root.join(".sakescript");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let config = Config::resolve(None, None).unwrap();

        assert_eq!(config.directory, PathBuf::from("community"));
        assert_eq!(config.index_path(), PathBuf::from("community/index.json"));
        assert_eq!(config.layout, ArchiveLayout::default());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
directory: stories
index_file: catalog.json
archive:
  suffix: .sake
  manifest_entry: meta.json
"#,
        );

        let config = Config::resolve(Some(path.clone()), None).unwrap();

        assert_eq!(config.directory, temp.path().join("stories"));
        assert_eq!(config.index_file, "catalog.json");
        assert_eq!(config.layout.suffix, ".sake");
        assert_eq!(config.layout.manifest_entry, "meta.json");
        assert_eq!(config.layout.story_entry, "main.json");
        assert_eq!(config.config_file, Some(path));
    }

    #[test]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "directory: stories\n");

        let config = Config::resolve(Some(path), Some("/srv/community".to_string())).unwrap();
        assert_eq!(config.directory, PathBuf::from("/srv/community"));

        let config = Config::resolve(None, Some(String::new())).unwrap();
        assert_eq!(config.directory, PathBuf::from("community"));
    }

    #[test]
    fn test_flag_overrides_everything() {
        let config = Config::resolve(None, Some("from-env".to_string()))
            .unwrap()
            .with_directory("from-flag");

        assert_eq!(config.directory, PathBuf::from("from-flag"));
        assert_eq!(config.strip_prefix(), "from-flag");
    }

    #[test]
    fn test_invalid_config_file() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "directory: [unterminated\n");

        assert!(Config::resolve(Some(path), None).is_err());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/./subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
