//! Error types for dictionary lookups.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for every lookup, extraction and loading operation.
#[derive(Debug, Error)]
pub enum LittreError {
    /// The letter used to select a dictionary file is not a single alphabetic character.
    #[error("need a letter from the alphabet, got {0:?}")]
    InvalidLetterInput(String),

    /// No entry of the letter file matches the requested headword.
    #[error("the entry \"{0}\" does not exist")]
    EntryNotFound(String),

    /// An entry node lacks one of its structurally required children.
    #[error("malformed entry \"{headword}\": missing <{missing}> node")]
    MalformedEntry {
        headword: String,
        missing: &'static str,
    },

    /// A letter file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A letter file is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A memory-mapped letter file is not valid UTF-8.
    #[error("letter file is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// A cache slot lock was poisoned by a panic in another thread.
    #[error("letter cache lock was poisoned")]
    LockPoisoned,
}

/// A convenience `Result` alias using [`LittreError`].
pub type Result<T> = std::result::Result<T, LittreError>;
