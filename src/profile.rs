//! One-shot helpers in the style of the classic profile-string functions.
//!
//! Each call opens the file, does one thing and drops the store. Only
//! [`get_ini_file`] creates a missing file; the rest fail with
//! [`Error::NotFound`](crate::Error::NotFound).

use std::path::Path;

use crate::{
    document::{IniDocument, Section},
    error::Result,
    store::IniStore,
};

/// Opens `path`, creating an empty file when it does not exist yet.
pub fn get_ini_file(path: impl AsRef<Path>) -> Result<IniStore> {
    IniStore::open(path, true)
}

/// Every section of the file.
pub fn get_profile_sections(path: impl AsRef<Path>) -> Result<IniDocument> {
    Ok(IniStore::open(path, false)?.document().clone())
}

/// One section of the file, or an empty section when it is absent.
pub fn get_profile_section(path: impl AsRef<Path>, section: &str) -> Result<Section> {
    let store = IniStore::open(path, false)?;
    Ok(store
        .get_section(section)
        .cloned()
        .unwrap_or_else(|| Section::new(section)))
}

pub fn get_profile_string(path: impl AsRef<Path>, section: &str, entry: &str) -> Result<String> {
    let store = IniStore::open(path, false)?;
    let value = store.get_entry(section, entry)?.to_string();
    Ok(value)
}

pub fn set_profile_string(
    path: impl AsRef<Path>,
    section: &str,
    entry: &str,
    value: &str,
) -> Result<()> {
    IniStore::open(path, false)?.set_entry(section, entry, value)
}

pub fn remove_profile_string(path: impl AsRef<Path>, section: &str, entry: &str) -> Result<()> {
    IniStore::open(path, false)?.remove_entry(section, entry)
}
