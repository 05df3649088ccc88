use crate::document::IniDocument;

/// Renders a document back to INI text. Every section is followed by a
/// blank line; comments from the source file are not retained.
pub fn serialize(doc: &IniDocument) -> String {
    let mut result = String::new();
    for section in doc.iter() {
        result.push_str(&format!("[{}]\n", section.name()));
        for (key, value) in section.iter() {
            result.push_str(&format!("{}={}\n", key, value));
        }
        result.push('\n');
    }
    result
}
