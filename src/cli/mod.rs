//! Command-line interface for sakescript.
//!
//! Provides commands for building the catalog of a directory, packing and
//! checking archives, and inspecting an existing catalog.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::archive::{self, ArchiveLayout};
use crate::catalog::{build_index, collect_ids, Index};
use crate::config::Config;
use crate::domain::{Manifest, Story};

/// sakescript - Bilingual story archives and their catalog
#[derive(Parser, Debug)]
#[command(name = "sakescript")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build <dir>/index.json from every archive under the directory
    Index {
        /// Directory to index
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Sort the index by creation date, most recent first
        #[arg(long)]
        sort: bool,

        /// Keep only the last N entries (0 = unlimited)
        #[arg(short, long, default_value = "0")]
        limit: usize,
    },

    /// Validate a story and manifest and pack them into an archive
    Pack {
        /// Story JSON file
        #[arg(short, long)]
        story: PathBuf,

        /// Manifest JSON file
        #[arg(short, long)]
        manifest: PathBuf,

        /// Archive to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Validate the story and manifest inside archives
    Check {
        /// Archives to check
        #[arg(required = true)]
        archives: Vec<PathBuf>,
    },

    /// List archive ids under a directory
    Ids {
        /// Directory to scan
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Show the catalog of a directory
    List {
        /// Directory whose index.json is shown
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Options for one catalog rebuild
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexOptions {
    /// Sort by creation date before limiting
    pub sort: bool,

    /// Keep only the last `limit` entries (0 = unlimited)
    pub limit: usize,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Commands::Index { dir, sort, limit } => {
                let config = with_dir(config, dir);
                index_directory(config, IndexOptions { sort, limit }).await
            }
            Commands::Pack {
                story,
                manifest,
                output,
            } => pack_archive(&story, &manifest, &output, &config.layout),
            Commands::Check { archives } => check_archives(&archives, &config.layout),
            Commands::Ids { dir } => list_ids(&with_dir(config, dir)),
            Commands::List { dir } => list_catalog(&with_dir(config, dir)),
            Commands::Config => show_config(&config),
        }
    }
}

fn with_dir(config: Config, dir: Option<PathBuf>) -> Config {
    match dir {
        Some(dir) => config.with_directory(dir),
        None => config,
    }
}

/// Rebuild the catalog of `config.directory`: build, sort, limit, write.
///
/// Sorting (when requested) always happens before limiting. Returns the
/// index as written.
pub fn rebuild_catalog(config: &Config, options: IndexOptions) -> crate::Result<Index> {
    let mut index = build_index(&config.directory, &config.directory, &config.layout)?;

    if options.sort {
        index.sort_by_created();
    }
    index.limit(options.limit);

    index.write(&config.strip_prefix(), &config.index_path())?;
    Ok(index)
}

/// Run the blocking rebuild off the async runtime
async fn index_directory(config: Config, options: IndexOptions) -> Result<()> {
    let directory = config.directory.clone();

    tokio::task::spawn_blocking(move || rebuild_catalog(&config, options))
        .await
        .context("Indexing task failed")?
        .with_context(|| format!("Failed to index {}", directory.display()))?;

    Ok(())
}

/// Validate inputs, stamp the manifest and write the archive
fn pack_archive(
    story_path: &Path,
    manifest_path: &Path,
    output: &Path,
    layout: &ArchiveLayout,
) -> Result<()> {
    let story: Story = read_json(story_path)?;
    let mut manifest: Manifest = read_json(manifest_path)?;

    story
        .validate()
        .with_context(|| format!("Invalid story: {}", story_path.display()))?;
    manifest
        .finalize()
        .with_context(|| format!("Invalid manifest: {}", manifest_path.display()))?;

    archive::pack(output, &story, &manifest, layout)?;

    eprintln!("Packed {} ({})", output.display(), manifest.id);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Check every archive, stopping at the first invalid one
fn check_archives(archives: &[PathBuf], layout: &ArchiveLayout) -> Result<()> {
    for path in archives {
        let story = archive::extract_story(path, &layout.story_entry)?;
        let manifest = archive::extract_manifest(path, &layout.manifest_entry)?;

        story
            .validate()
            .with_context(|| format!("Invalid story in {}", path.display()))?;
        manifest
            .validate()
            .with_context(|| format!("Invalid manifest in {}", path.display()))?;

        println!("{}: ok ({})", path.display(), manifest.id);
    }

    Ok(())
}

fn list_ids(config: &Config) -> Result<()> {
    for id in collect_ids(&config.directory, &config.layout.suffix)? {
        println!("{}", id);
    }
    Ok(())
}

fn list_catalog(config: &Config) -> Result<()> {
    let index = Index::load(&config.index_path())?;

    if index.is_empty() {
        println!("Catalog is empty. Use 'sakescript index' to build it.");
        return Ok(());
    }

    println!("{:<24} {:<22} {:<40}", "ID", "CREATED", "TITLE");
    println!("{}", "-".repeat(86));

    for entry in &index {
        let title = &entry.manifest.title.en;
        let title_truncated = if title.chars().count() > 37 {
            format!("{}...", title.chars().take(37).collect::<String>())
        } else {
            title.clone()
        };
        println!(
            "{:<24} {:<22} {:<40}",
            entry.manifest.id, entry.manifest.created, title_truncated
        );
    }

    println!("\nTotal: {} archives", index.len());
    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(config: &Config) -> Result<()> {
    let source = config
        .config_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none - using defaults)".to_string());

    println!("Config file:    {}", source);
    println!("Directory:      {}", config.directory.display());
    println!("Catalog:        {}", config.index_path().display());
    println!("Archive suffix: {}", config.layout.suffix);
    println!("Story entry:    {}", config.layout.story_entry);
    println!("Manifest entry: {}", config.layout.manifest_entry);

    Ok(())
}
