use std::iter::Enumerate;
use std::str::Split;

use tracing::{debug, trace};

use crate::document::Document;
use crate::error::ParseError;

/// Where the parser stands relative to the current section's key-value run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// No section header seen yet.
    Preamble,
    /// A header was seen; no key-value line yet.
    Header,
    /// Inside the contiguous key-value lines of a section.
    Run,
    /// The run was ended by a blank line.
    Closed,
}

/// Represents an on-going parse.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    text: &'a str,
    lines: Enumerate<Split<'a, char>>,
    section: Option<String>,
    position: Position,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: text.split('\n').enumerate(),
            section: None,
            position: Position::Preamble,
        }
    }
}

impl Parser<'_> {
    /// Consume every line and build the document, stopping at the first error.
    ///
    /// # Errors
    ///
    /// The first [`ParseError`] encountered; later lines are not looked at.
    pub fn into_document(mut self) -> Result<Document, ParseError> {
        if self.text.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let mut document = Document::new();

        while let Some((index, line)) = self.lines.next() {
            self.parse_line(index, line, &mut document)?;
        }

        debug!(sections = document.len(), "parsed document");
        Ok(document)
    }

    fn parse_line(
        &mut self,
        index: usize,
        line: &str,
        document: &mut Document,
    ) -> Result<(), ParseError> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            trace!(line = index, "blank");
            if self.position == Position::Run {
                self.position = Position::Closed;
            }
            return Ok(());
        }

        if trimmed.starts_with(';') || trimmed.starts_with('#') {
            return self.parse_comment(index, line);
        }

        if let Some(name) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            return self.parse_section_header(index, line, name.trim(), document);
        }

        if let Some((key, value)) = trimmed.split_once('=') {
            return self.parse_entry(index, line, key.trim(), value.trim(), document);
        }

        Err(ParseError::MalformedLine {
            line: index,
            content: line.to_owned(),
        })
    }

    /// Comments may sit between sections but never inside a section's key-value run.
    fn parse_comment(&self, index: usize, line: &str) -> Result<(), ParseError> {
        match (self.position, &self.section) {
            (Position::Header | Position::Run, Some(section)) => {
                Err(ParseError::CommentAfterSectionHeader {
                    line: index,
                    section: section.clone(),
                    content: line.to_owned(),
                })
            }
            _ => {
                trace!(line = index, "comment");
                Ok(())
            }
        }
    }

    fn parse_section_header(
        &mut self,
        index: usize,
        line: &str,
        name: &str,
        document: &mut Document,
    ) -> Result<(), ParseError> {
        if name.is_empty() {
            return Err(ParseError::EmptySectionName {
                line: index,
                content: line.to_owned(),
            });
        }

        // Repeated headers merge into the existing section.
        document.section_mut(name);
        debug!(line = index, section = name, "section");

        self.section = Some(name.to_owned());
        self.position = Position::Header;

        Ok(())
    }

    fn parse_entry(
        &mut self,
        index: usize,
        line: &str,
        key: &str,
        value: &str,
        document: &mut Document,
    ) -> Result<(), ParseError> {
        let section = match (self.position, &self.section) {
            (Position::Header | Position::Run, Some(section)) => section,
            _ => {
                return Err(ParseError::KeyOutsideSection {
                    line: index,
                    content: line.to_owned(),
                });
            }
        };

        if key.is_empty() {
            return Err(ParseError::EmptyKey {
                line: index,
                section: section.clone(),
                content: line.to_owned(),
            });
        }

        if value.is_empty() {
            return Err(ParseError::EmptyValue {
                line: index,
                section: section.clone(),
                key: key.to_owned(),
            });
        }

        trace!(line = index, section = %section, key, "entry");
        document
            .section_mut(section)
            .insert(key.to_owned(), value.to_owned());
        self.position = Position::Run;

        Ok(())
    }
}

/// Parse INI text into a [`Document`].
///
/// # Errors
///
/// See [`Parser::into_document`].
pub fn parse(text: &str) -> Result<Document, ParseError> {
    Parser::new(text).into_document()
}
