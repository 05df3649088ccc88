use anyhow::Result;
use inistore::{profile, Error};
use std::fs;
use tempfile::tempdir;

use crate::{fixture_copy, FIXTURE};

#[test]
fn test_get_profile_string() -> Result<()> {
    assert_eq!(profile::get_profile_string(FIXTURE, "general", "APPNAME")?, "MyApplication");
    assert_eq!(profile::get_profile_string(FIXTURE, "General", "missing")?, "");
    assert!(matches!(
        profile::get_profile_string(FIXTURE, "Missing", "x"),
        Err(Error::SectionNotFound(_))
    ));
    Ok(())
}

#[test]
fn test_get_profile_sections() -> Result<()> {
    let doc = profile::get_profile_sections(FIXTURE)?;
    assert_eq!(
        doc.section_names().collect::<Vec<_>>(),
        ["General", "Database", "Logging", "Features"]
    );
    Ok(())
}

#[test]
fn test_get_profile_section() -> Result<()> {
    let section = profile::get_profile_section(FIXTURE, "logging")?;
    assert_eq!(section.get("maxfilesize"), Some("10MB"));

    let empty = profile::get_profile_section(FIXTURE, "Nope")?;
    assert!(empty.is_empty());
    Ok(())
}

#[test]
fn test_set_and_remove_profile_string() -> Result<()> {
    let (_dir, path) = fixture_copy()?;

    profile::set_profile_string(&path, "Logging", "logLevel", "WARN")?;
    assert_eq!(profile::get_profile_string(&path, "Logging", "loglevel")?, "WARN");

    profile::remove_profile_string(&path, "Logging", "logLevel")?;
    assert_eq!(profile::get_profile_string(&path, "Logging", "logLevel")?, "");

    profile::remove_profile_string(&path, "Nowhere", "logLevel")?;
    Ok(())
}

#[test]
fn test_only_get_ini_file_creates() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("fresh.ini");

    assert!(matches!(
        profile::set_profile_string(&path, "A", "k", "v"),
        Err(Error::NotFound { .. })
    ));
    assert!(!path.exists());

    let mut store = profile::get_ini_file(&path)?;
    assert!(path.exists());
    store.set_entry("A", "k", "v")?;

    assert_eq!(fs::read_to_string(&path)?, "[A]\nk=v\n\n");
    Ok(())
}
