//! Custom assertion helpers for config files.

use pc_core::config::ini::IniDocument;
use std::path::Path;

/// Parses the config file at `path`.
pub fn read_document(path: &Path) -> IniDocument {
    let content = std::fs::read_to_string(path).expect("Failed to read config");
    IniDocument::parse(&content).expect("Config should parse")
}

/// Assert that a section of the persisted file holds exactly `keys`, in order.
pub fn assert_section_keys(path: &Path, section: &str, keys: &[&str]) {
    let document = read_document(path);
    let stored: Vec<&str> = document
        .section(section)
        .unwrap_or_else(|| panic!("Section '{section}' should exist"))
        .keys()
        .collect();
    assert_eq!(stored, keys, "Keys of section '{section}'");
}

/// Assert the persisted text of one option.
pub fn assert_stored_value(path: &Path, section: &str, key: &str, expected: &str) {
    let document = read_document(path);
    assert_eq!(
        document.get(section, key),
        Some(expected),
        "Stored value of {section}.{key}"
    );
}
