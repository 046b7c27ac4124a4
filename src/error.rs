use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a document can be rejected by the parser.
///
/// Line indices are 0-based and refer to the input split on `\n`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("input is empty")]
    EmptyInput,

    #[error("line {line}: section name cannot be empty: {content:?}")]
    EmptySectionName { line: usize, content: String },

    #[error("line {line}: key cannot be empty in section {section:?}: {content:?}")]
    EmptyKey {
        line: usize,
        section: String,
        content: String,
    },

    #[error("line {line}: value of key {key:?} in section {section:?} cannot be empty")]
    EmptyValue {
        line: usize,
        section: String,
        key: String,
    },

    #[error("line {line}: key-value pair outside of a section: {content:?}")]
    KeyOutsideSection { line: usize, content: String },

    #[error("line {line}: comment inside the key-value block of section {section:?}: {content:?}")]
    CommentAfterSectionHeader {
        line: usize,
        section: String,
        content: String,
    },

    #[error("line {line}: malformed line: {content:?}")]
    MalformedLine { line: usize, content: String },
}

impl ParseError {
    /// The 0-based index of the offending line, if the error is tied to one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match *self {
            Self::EmptyInput => None,
            Self::EmptySectionName { line, .. }
            | Self::EmptyKey { line, .. }
            | Self::EmptyValue { line, .. }
            | Self::KeyOutsideSection { line, .. }
            | Self::CommentAfterSectionHeader { line, .. }
            | Self::MalformedLine { line, .. } => Some(line),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no parsed data")]
    EmptyParsedData,

    #[error("section {section:?} does not exist")]
    SectionNotFound { section: String },

    #[error("key {key:?} does not exist in section {section:?}")]
    KeyNotFound { section: String, key: String },

    #[error("section name cannot be empty")]
    EmptySectionName,

    #[error("key cannot be empty in section {section:?}")]
    EmptyKey { section: String },

    #[error("value of key {key:?} in section {section:?} cannot be empty")]
    EmptyValue { section: String, key: String },

    #[error("section name {section:?} cannot contain line breaks")]
    InvalidSectionName { section: String },

    #[error("key {key:?} in section {section:?} {reason}")]
    InvalidKey {
        section: String,
        key: String,
        reason: &'static str,
    },

    #[error("value of key {key:?} in section {section:?} cannot contain line breaks")]
    InvalidValue { section: String, key: String },

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
