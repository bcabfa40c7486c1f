//! Tests for the bundled resource stores.

use super::*;
use anyhow::{Context, Result, ensure};
use camino::Utf8PathBuf;
use rstest::rstest;
use std::io::Read;

fn read_all(mut reader: ResourceReader) -> Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

#[rstest]
fn memory_source_serves_and_replaces_resources() -> Result<()> {
    let source = MemorySource::new("test").with_resource("a.json", "{}");
    let first = source.open("a.json")?.context("resource missing")?;
    assert_eq!(read_all(first)?, "{}");

    source.insert("a.json", r#"{"k":"v"}"#);
    let second = source.open("a.json")?.context("resource missing")?;
    assert_eq!(read_all(second)?, r#"{"k":"v"}"#);

    assert_eq!(source.remove("a.json"), Some(br#"{"k":"v"}"#.to_vec()));
    ensure!(source.open("a.json")?.is_none(), "removed resource still served");
    Ok(())
}

#[rstest]
fn memory_source_identity_uses_provenance() {
    assert_eq!(MemorySource::new("x").id(), MemorySource::new("x").id());
    assert_ne!(MemorySource::new("x").id(), MemorySource::new("y").id());
    assert_eq!(MemorySource::new("x").id().kind(), "memory");
}

#[rstest]
fn dir_source_reads_files_and_reports_missing() -> Result<()> {
    let temp = tempfile::tempdir()?;
    std::fs::write(temp.path().join("app.properties"), "greeting=Hi\n")?;
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .map_err(|path| anyhow::anyhow!("non UTF-8 path {}", path.display()))?;
    let source = DirSource::open(&root)?;

    let reader = source.open("app.properties")?.context("resource missing")?;
    assert_eq!(read_all(reader)?, "greeting=Hi\n");
    ensure!(source.open("absent.json")?.is_none(), "missing file reported as found");
    assert_eq!(source.id().folder(), root.as_str());
    assert_eq!(source.root(), root.as_path());
    Ok(())
}

#[rstest]
fn dir_source_refuses_to_escape_its_root() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let inner = temp.path().join("inner");
    std::fs::create_dir(&inner)?;
    std::fs::write(temp.path().join("secret.json"), "{}")?;
    let root = Utf8PathBuf::from_path_buf(inner)
        .map_err(|path| anyhow::anyhow!("non UTF-8 path {}", path.display()))?;
    let source = DirSource::open(root)?;
    ensure!(source.open("../secret.json").is_err(), "escaped the directory");
    Ok(())
}

#[rstest]
fn dir_source_fails_for_missing_directory() {
    assert!(DirSource::open("/definitely/not/a/real/dir").is_err());
}

#[rstest]
fn source_id_display_mentions_kind_and_folder() {
    let id = SourceId::new("dir", "/srv/i18n", "config");
    assert_eq!(id.to_string(), "dir:/srv/i18n (config)");
    assert_eq!(SourceId::new("memory", "", "").to_string(), "memory:");
}
