//! In-memory model of an initialization file.
//!
//! Sections and entries live in insertion-ordered maps keyed by their
//! normalized (trimmed, lower-cased) name. Each slot also carries the casing
//! it was first inserted with, which is what gets written back out. Names,
//! keys and values are stored trimmed, the same way the parser reads them.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};

/// Case-folded form of a section or entry name, used only for lookups.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A named, ordered bag of key/value entries.
#[derive(Debug, Clone, Default)]
pub struct Section {
    name: String,
    entries: IndexMap<String, (String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into().trim().to_string(),
            entries: IndexMap::new(),
        }
    }

    /// Name of the section as first written.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&normalize(key))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize(key))
    }

    /// Inserts or overwrites an entry. An existing entry keeps both its
    /// position and the casing of its first key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into().trim().to_string();
        let value = value.into().trim().to_string();
        match self.entries.get_mut(&normalize(&key)) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.insert(normalize(&key), (key, value));
                None
            }
        }
    }

    /// Removes an entry, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries
            .shift_remove(&normalize(key))
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(key, _)| key.as_str())
    }

    /// Entries as `(key, value)` in insertion order, keys in original casing.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// IndexMap equality ignores order, so compare entry by entry.
impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.iter().eq(other.iter())
    }
}

impl Eq for Section {}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Ordered collection of sections.
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    sections: IndexMap<String, Section>,
}

impl IniDocument {
    pub fn new() -> Self {
        IniDocument::default()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section names in original casing, first-seen order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.values().map(Section::name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(&normalize(name))
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(&normalize(name))
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(&normalize(name))
    }

    /// Returns the section for `name`, appending an empty one if absent.
    pub fn get_or_create_section(&mut self, name: &str) -> &mut Section {
        self.sections
            .entry(normalize(name))
            .or_insert_with(|| Section::new(name))
    }

    /// Removes a whole section, keeping the order of the remaining ones.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(&normalize(name))
    }

    /// Value of `key` in `section`. A missing key reads as an empty string;
    /// a missing section is an error.
    pub fn get_entry(&self, section: &str, key: &str) -> Result<&str> {
        let found = self
            .section(section)
            .ok_or_else(|| Error::SectionNotFound(section.to_string()))?;
        Ok(found.get(key).unwrap_or(""))
    }

    pub fn set_entry(&mut self, section: &str, key: &str, value: &str) -> Option<String> {
        self.get_or_create_section(section).insert(key, value)
    }

    pub fn remove_entry(&mut self, section: &str, key: &str) -> Option<String> {
        self.section_mut(section)?.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }
}

impl PartialEq for IniDocument {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for IniDocument {}

impl Serialize for IniDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for section in self.iter() {
            map.serialize_entry(section.name(), section)?;
        }
        map.end()
    }
}

fn invalid(what: &'static str, value: &str, reason: &'static str) -> Error {
    Error::InvalidName {
        what,
        value: value.to_string(),
        reason,
    }
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\r', '\n'])
}

/// Rejects names that would change meaning after a save and reload.
pub fn validate_section_name(name: &str) -> Result<()> {
    if has_line_break(name) {
        return Err(invalid("section name", name, "contains a line break"));
    }
    Ok(())
}

pub fn validate_key(key: &str) -> Result<()> {
    if has_line_break(key) {
        return Err(invalid("key", key, "contains a line break"));
    }
    if key.contains('=') {
        return Err(invalid("key", key, "contains '='"));
    }
    if key.trim_start().starts_with(['[', ';', '#']) {
        return Err(invalid("key", key, "starts like a header or comment"));
    }
    Ok(())
}

pub fn validate_value(value: &str) -> Result<()> {
    if has_line_break(value) {
        return Err(invalid("value", value, "contains a line break"));
    }
    Ok(())
}
