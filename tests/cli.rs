//! CLI Integration Tests
//!
//! Runs the command tree end to end against temporary directories.

use clap::Parser;
use sakescript::cli::Cli;
use sakescript::{Index, Manifest};
use tempfile::TempDir;

const STORY: &str = r#"{
  "title": {"ja": "狐", "en": "The Fox"},
  "chapters": [
    {
      "title": {"ja": "一", "en": "One"},
      "sentences": [{"ja": "狐がいた。", "en": "There was a fox."}]
    }
  ]
}"#;

const MANIFEST: &str = r#"{
  "id": "fox",
  "version": "1",
  "title": {"ja": "狐", "en": "The Fox"},
  "author": "A",
  "summary": {"ja": "狐の話", "en": "About a fox"},
  "tags": ["animals"],
  "created": "1999-01-01T00:00:00Z"
}"#;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["sakescript"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[tokio::test]
async fn test_pack_then_index() {
    let temp = TempDir::new().unwrap();
    let community = temp.path().join("community");
    std::fs::create_dir(&community).unwrap();

    let story_path = temp.path().join("main.json");
    let manifest_path = temp.path().join("manifest.json");
    std::fs::write(&story_path, STORY).unwrap();
    std::fs::write(&manifest_path, MANIFEST).unwrap();

    let archive = community.join("fox.zip");
    cli(&[
        "pack",
        "--story",
        story_path.to_str().unwrap(),
        "--manifest",
        manifest_path.to_str().unwrap(),
        "--output",
        archive.to_str().unwrap(),
    ])
    .execute()
    .await
    .unwrap();

    cli(&["check", archive.to_str().unwrap()])
        .execute()
        .await
        .unwrap();

    cli(&["index", "--dir", community.to_str().unwrap(), "--sort"])
        .execute()
        .await
        .unwrap();

    let index = Index::load(&community.join("index.json")).unwrap();
    assert_eq!(index.len(), 1);

    let entry = &index.entries()[0];
    assert_eq!(entry.path, "fox.zip");
    assert_eq!(entry.manifest.id, "fox");
    // Packing stamps a fresh creation time over the supplied one
    assert_ne!(entry.manifest.created, "1999-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_pack_rejects_invalid_manifest() {
    let temp = TempDir::new().unwrap();
    let story_path = temp.path().join("main.json");
    let manifest_path = temp.path().join("manifest.json");
    std::fs::write(&story_path, STORY).unwrap();

    let mut manifest: Manifest = serde_json::from_str(MANIFEST).unwrap();
    manifest.tags.clear();
    std::fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();

    let archive = temp.path().join("fox.zip");
    let err = cli(&[
        "pack",
        "-s",
        story_path.to_str().unwrap(),
        "-m",
        manifest_path.to_str().unwrap(),
        "-o",
        archive.to_str().unwrap(),
    ])
    .execute()
    .await
    .unwrap_err();

    assert!(format!("{:#}", err).contains("tags"));
    assert!(!archive.exists());
}

#[tokio::test]
async fn test_index_fails_on_corrupt_archive() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("broken.zip"), "not a zip").unwrap();

    let result = cli(&["index", "-d", temp.path().to_str().unwrap()])
        .execute()
        .await;

    assert!(result.is_err());
    assert!(!temp.path().join("index.json").exists());
}

#[tokio::test]
async fn test_index_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");

    let result = cli(&["index", "-d", missing.to_str().unwrap()]).execute().await;

    assert!(result.is_err());
}
