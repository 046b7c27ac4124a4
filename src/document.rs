use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ParseError, Result};
use crate::parser::Parser;
use crate::section::Section;

/// The result of a successful parse: section name to [`Section`].
///
/// Iteration order is unspecified. Equality compares the sets of sections and entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: HashMap<String, Section>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Iterate over the sections in no particular order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    #[must_use]
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up the value of `section.key`.
    ///
    /// # Errors
    ///
    /// [`Error::SectionNotFound`] or [`Error::KeyNotFound`] when either is missing.
    pub fn get(&self, section: &str, key: &str) -> Result<&str> {
        let entries = self
            .sections
            .get(section)
            .ok_or_else(|| Error::SectionNotFound {
                section: section.to_owned(),
            })?;

        entries.get(key).ok_or_else(|| Error::KeyNotFound {
            section: section.to_owned(),
            key: key.to_owned(),
        })
    }

    /// Set `section.key` to `value`, creating the section if needed.
    ///
    /// All three are trimmed. Anything that would not read back as the same section, key and value
    /// once serialized is rejected, so the document stays representable as text.
    ///
    /// # Errors
    ///
    /// Fails if the section, key or value is empty, if any of them contains a line break, or if
    /// the key contains `=` or starts with `;`, `#` or `[`.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        let (section, key, value) = (section.trim(), key.trim(), value.trim());

        if section.is_empty() {
            return Err(Error::EmptySectionName);
        }
        if has_line_break(section) {
            return Err(Error::InvalidSectionName {
                section: section.to_owned(),
            });
        }

        if key.is_empty() {
            return Err(Error::EmptyKey {
                section: section.to_owned(),
            });
        }
        if let Some(reason) = invalid_key_reason(key) {
            return Err(Error::InvalidKey {
                section: section.to_owned(),
                key: key.to_owned(),
                reason,
            });
        }

        if value.is_empty() {
            return Err(Error::EmptyValue {
                section: section.to_owned(),
                key: key.to_owned(),
            });
        }
        if has_line_break(value) {
            return Err(Error::InvalidValue {
                section: section.to_owned(),
                key: key.to_owned(),
            });
        }

        self.section_mut(section)
            .insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    /// Get the named section, creating an empty one if it does not exist yet.
    pub(crate) fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections
            .entry(name.to_owned())
            .or_insert_with(|| Section::new(name.to_owned()))
    }

    /// Render the document as INI text.
    ///
    /// Sections and keys are written in ascending order so the output is stable. Comments are not
    /// part of the model and are never written.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyParsedData`] if the document has no sections.
    pub fn serialize(&self) -> Result<String> {
        if self.is_empty() {
            return Err(Error::EmptyParsedData);
        }

        Ok(self.to_string())
    }
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

/// Why `key` cannot be the left side of a `key=value` line, if it cannot.
fn invalid_key_reason(key: &str) -> Option<&'static str> {
    if has_line_break(key) {
        Some("cannot contain line breaks")
    } else if key.contains('=') {
        Some("cannot contain '='")
    } else if key.starts_with([';', '#']) {
        Some("cannot start with a comment marker")
    } else if key.starts_with('[') {
        Some("cannot start with '['")
    } else {
        None
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections = self.sections.values().collect::<Vec<_>>();
        sections.sort_unstable_by(|a, b| a.name().cmp(b.name()));

        for (i, section) in sections.into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            writeln!(f, "[{}]", section.name())?;

            let mut entries = section.entries().collect::<Vec<_>>();
            entries.sort_unstable();

            for (key, value) in entries {
                writeln!(f, "{key}={value}")?;
            }
        }

        Ok(())
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Parser::new(s).into_document()
    }
}
