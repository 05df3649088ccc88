//! File-backed INI store.
//!
//! An [`IniStore`] binds one [`IniDocument`] to one path. The file is parsed
//! eagerly on open, reads only consult memory, and (with the default
//! options) every mutation rewrites the whole file before returning.
//!
//! No locking is done. Two stores writing the same path race and the last
//! writer wins.

use log::{debug, warn};
use std::{
    fs::{self, OpenOptions},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    document::{validate_key, validate_section_name, validate_value, IniDocument, Section},
    error::{Error, Result},
    parser::{parse_with, DuplicateSections},
    serializer::serialize,
    utils::{absolute_path, write_file},
};

/// How a store opens, parses and saves its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Create an empty file when the path does not exist.
    pub create_if_missing: bool,
    /// Save after every mutation. When off, call [`IniStore::persist`].
    pub autosave: bool,
    pub duplicate_sections: DuplicateSections,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            create_if_missing: false,
            autosave: true,
            duplicate_sections: DuplicateSections::Reset,
        }
    }
}

impl StoreOptions {
    pub fn new() -> Self {
        StoreOptions::default()
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn duplicate_sections(mut self, duplicates: DuplicateSections) -> Self {
        self.duplicate_sections = duplicates;
        self
    }
}

#[derive(Debug)]
pub struct IniStore {
    path: PathBuf,
    document: IniDocument,
    options: StoreOptions,
    dirty: bool,
}

impl IniStore {
    /// Opens `path` with default options, optionally creating an empty file.
    pub fn open(path: impl AsRef<Path>, create_if_missing: bool) -> Result<Self> {
        Self::open_with(path, StoreOptions::new().create_if_missing(create_if_missing))
    }

    pub fn open_with(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self> {
        let path = path.as_ref();
        let path = absolute_path(path).map_err(|e| Error::io(path, e))?;

        if !path.exists() {
            if !options.create_if_missing {
                return Err(Error::NotFound { path });
            }
            // Never truncates: a file that appeared in the meantime is kept.
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&path)
                .map_err(|e| Error::io(&path, e))?;
            debug!("Created ini file {}", path.display());
        }

        let mut store = IniStore {
            path,
            document: IniDocument::new(),
            options,
            dirty: false,
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-reads the file, discarding any unsaved changes.
    pub fn reload(&mut self) -> Result<()> {
        let text = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound {
                path: self.path.clone(),
            },
            _ => Error::io(&self.path, e),
        })?;

        self.document = parse_with(&text, self.options.duplicate_sections);
        self.dirty = false;
        debug!(
            "Loaded {} sections from {}",
            self.document.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Writes the whole document to disk.
    pub fn persist(&mut self) -> Result<()> {
        write_file(&self.path, &serialize(&self.document)).map_err(|e| Error::io(&self.path, e))?;
        self.dirty = false;
        debug!("Saved {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &IniDocument {
        &self.document
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Whether memory holds changes that have not been written yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Section names in original casing, first-seen order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.document.section_names()
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.document.has_section(name)
    }

    pub fn get_section(&self, name: &str) -> Option<&Section> {
        self.document.section(name)
    }

    /// Value of `key` in `section`, or `""` when the key is absent.
    /// Fails with [`Error::SectionNotFound`] when the section is absent.
    pub fn get_entry(&self, section: &str, key: &str) -> Result<&str> {
        self.document.get_entry(section, key)
    }

    /// Creates the section if needed and sets the entry.
    pub fn set_entry(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        validate_section_name(section)?;
        validate_key(key)?;
        validate_value(value)?;

        let snapshot = self.snapshot();
        self.document.set_entry(section, key, value);
        self.commit(snapshot)
    }

    /// Removes an entry. Missing sections and entries are not an error and
    /// do not touch the file.
    pub fn remove_entry(&mut self, section: &str, key: &str) -> Result<()> {
        let has_entry = self
            .document
            .section(section)
            .is_some_and(|s| s.contains_key(key));
        if !has_entry {
            return Ok(());
        }

        let snapshot = self.snapshot();
        self.document.remove_entry(section, key);
        self.commit(snapshot)
    }

    /// Removes a whole section. A missing section is not an error.
    pub fn remove_section(&mut self, name: &str) -> Result<()> {
        if !self.document.has_section(name) {
            return Ok(());
        }

        let snapshot = self.snapshot();
        self.document.remove_section(name);
        self.commit(snapshot)
    }

    fn snapshot(&self) -> Option<(IniDocument, bool)> {
        self.options
            .autosave
            .then(|| (self.document.clone(), self.dirty))
    }

    // Marks the change and saves when autosave is on. A failed save puts the
    // previous document back so memory matches the file.
    fn commit(&mut self, snapshot: Option<(IniDocument, bool)>) -> Result<()> {
        self.dirty = true;
        let Some((previous, was_dirty)) = snapshot else {
            return Ok(());
        };

        if let Err(e) = self.persist() {
            warn!("Rolling back change to {}: {}", self.path.display(), e);
            self.document = previous;
            self.dirty = was_dirty;
            return Err(e);
        }
        Ok(())
    }
}
