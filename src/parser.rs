use log::{debug, trace};

use crate::document::IniDocument;

/// What a repeated `[name]` header does to the entries already parsed
/// under that name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateSections {
    /// Keep the section's position and casing but drop its earlier entries.
    #[default]
    Reset,
    /// Keep appending to the existing section.
    Merge,
}

/// Parses INI text. Never fails: comments, stray lines and entries that
/// appear before any header are dropped.
pub fn parse(text: &str) -> IniDocument {
    parse_with(text, DuplicateSections::default())
}

pub fn parse_with(text: &str, duplicates: DuplicateSections) -> IniDocument {
    let mut doc = IniDocument::new();
    let mut current: Option<String> = None;

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();

        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim();
            if let Some(section) = doc.section_mut(name) {
                if duplicates == DuplicateSections::Reset && !section.is_empty() {
                    debug!(
                        "Section [{}] reopened on line {}, dropping {} earlier entries",
                        name,
                        lineno + 1,
                        section.len()
                    );
                    section.clear();
                }
            } else {
                doc.get_or_create_section(name);
            }
            current = Some(name.to_string());
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            trace!("Skipping line {}: {:?}", lineno + 1, line);
            continue;
        };

        match &current {
            Some(section) => {
                doc.set_entry(section, key.trim(), value.trim());
            }
            None => trace!("Skipping entry outside of any section on line {}", lineno + 1),
        }
    }

    doc
}
