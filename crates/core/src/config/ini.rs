//! Reading and writing the persisted `.ini` file.
//!
//! The reader keeps only sections and `key = value` entries; comment lines are
//! discarded, exactly as they are regenerated from help text on every write.
//! The writer emits comment blocks verbatim ahead of the entries they describe.

use std::fmt;

/// One line-level item inside a section.
#[derive(Debug, Clone, PartialEq)]
pub enum IniEntry {
    /// A pre-formatted comment block, written as-is.
    Comment(String),
    /// An option. `None` marks a bare key with no delimiter.
    Value { key: String, value: Option<String> },
}

/// A named section and its entries in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniSection {
    pub name: String,
    pub entries: Vec<IniEntry>,
}

impl IniSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Keys of all value entries, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            IniEntry::Value { key, .. } => Some(key.as_str()),
            IniEntry::Comment(_) => None,
        })
    }

    /// The stored value for `key`. A bare key yields `Some(None)`.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.iter().find_map(|entry| match entry {
            IniEntry::Value { key: k, value } if k == key => Some(value.as_deref()),
            _ => None,
        })
    }

    /// Replaces the value for `key`, appending the key when absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = Some(value.into());
        for entry in &mut self.entries {
            if let IniEntry::Value { key: k, value: v } = entry {
                if k == key {
                    *v = value;
                    return;
                }
            }
        }
        self.entries.push(IniEntry::Value {
            key: key.to_string(),
            value,
        });
    }
}

/// A parse failure with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniParseError {
    pub line: usize,
    pub reason: String,
}

/// An ordered INI document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses INI text.
    ///
    /// Entries split at the first `=` or `:`; both sides are trimmed. Lines
    /// starting with `#` or `;` and blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, IniParseError> {
        let mut doc = Self::new();
        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                let name = line
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .ok_or_else(|| IniParseError {
                        line: line_no,
                        reason: format!("Malformed section header: {line}"),
                    })?;
                if doc.section(name).is_some() {
                    return Err(IniParseError {
                        line: line_no,
                        reason: format!("Duplicate section: {name}"),
                    });
                }
                doc.sections.push(IniSection::new(name));
                continue;
            }

            let section = doc.sections.last_mut().ok_or_else(|| IniParseError {
                line: line_no,
                reason: "Entry found before any section header".to_string(),
            })?;

            let (key, value) = match line.find(['=', ':']) {
                Some(pos) => (
                    line[..pos].trim().to_string(),
                    Some(line[pos + 1..].trim().to_string()),
                ),
                None => (line.to_string(), None),
            };
            if section.get(&key).is_some() {
                return Err(IniParseError {
                    line: line_no,
                    reason: format!("Duplicate option '{key}' in section '{}'", section.name),
                });
            }
            section.entries.push(IniEntry::Value { key, value });
        }
        Ok(doc)
    }

    pub fn sections(&self) -> &[IniSection] {
        &self.sections
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut IniSection> {
        self.sections.iter_mut().find(|section| section.name == name)
    }

    pub fn push_section(&mut self, section: IniSection) {
        self.sections.push(section);
    }

    /// The stored text for `section`/`key`, if both exist and a value is set.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)
            .and_then(|s| s.get(key))
            .flatten()
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for entry in &section.entries {
                match entry {
                    IniEntry::Comment(text) => writeln!(f, "{text}")?,
                    IniEntry::Value { key, value: None } => writeln!(f, "{key}")?,
                    IniEntry::Value {
                        key,
                        value: Some(value),
                    } => writeln!(f, "{key} = {value}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
