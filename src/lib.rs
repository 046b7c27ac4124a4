#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

//! Parse INI text into sections of key-value pairs and write it back out.
//!
//! The accepted grammar is strict:
//!
//! - every key-value pair belongs to a `[section]`;
//! - the pairs of a section form one contiguous block, which may be separated from its header by
//!   blank lines and is ended by a blank line, the next header or the end of input;
//! - `;` and `#` comments may appear outside of those blocks only;
//! - section names, keys and values may not be empty.
//!
//! ```
//! let document = iniparser::parse("[owner]\nname = John Doe\n").unwrap();
//! assert_eq!(document.get("owner", "name").unwrap(), "John Doe");
//! ```

mod document;
mod error;
mod parser;
mod section;
mod util;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::{fmt, process};

use tracing::debug;

pub use document::Document;
pub use error::{Error, ParseError, Result};
pub use parser::{Parser, parse};
pub use section::{Entries, Section};

/// Render a document as INI text.
///
/// # Errors
///
/// [`Error::EmptyParsedData`] if the document has no sections.
pub fn serialize(document: &Document) -> Result<String> {
    document.serialize()
}

/// Holds the most recently loaded document.
///
/// Loading is all-or-nothing: the held document is only replaced once the new input has parsed
/// successfully.
#[derive(Debug, Clone, Default)]
pub struct Ini {
    document: Document,
}

impl Ini {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` and hold the result.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if the text is rejected; the held document is left as it was.
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        self.document = parse(text)?;
        Ok(())
    }

    /// Read, decode and parse the file at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, otherwise as [`Ini::load_from_str`].
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| Error::io(path, e))?;

        debug!(path = %path.display(), bytes = data.len(), "loading");
        self.load_from_str(&util::decode_data(&data))
    }

    /// Write the held document to `path`.
    ///
    /// The text goes to a temporary file next to the target first and is then renamed over it.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyParsedData`] if nothing is held, [`Error::Io`] if writing fails.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.document.serialize()?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let temp_path = path.with_file_name(format!(".{file_name}.{}.tmp", process::id()));

        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .write_all(text.as_bytes())
            .and_then(|()| temp_file.sync_all())
            .map_err(|e| Error::io(&temp_path, e))?;
        drop(temp_file);

        if let Err(e) = fs::rename(&temp_path, path) {
            _ = fs::remove_file(&temp_path);
            return Err(Error::io(path, e));
        }

        debug!(path = %path.display(), sections = self.document.len(), "saved");
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Document::get`].
    pub fn get(&self, section: &str, key: &str) -> Result<&str> {
        self.document.get(section, key)
    }

    /// # Errors
    ///
    /// See [`Document::set`].
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        self.document.set(section, key, value)
    }

    #[must_use]
    pub fn section_names(&self) -> Vec<&str> {
        self.document.section_names()
    }

    /// The held document.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyParsedData`] if it has no sections.
    pub fn sections(&self) -> Result<&Document> {
        if self.document.is_empty() {
            return Err(Error::EmptyParsedData);
        }

        Ok(&self.document)
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}

impl From<Document> for Ini {
    fn from(document: Document) -> Self {
        Self { document }
    }
}

impl fmt::Display for Ini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.document, f)
    }
}
