//! Error types for `keysmith`.

use keysmith_core::GeneratorError;
use thiserror::Error;

/// Errors produced while loading dictionaries or generating from them.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// Generation or parsing failed (delegated from keysmith-core).
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// The dictionary source could not deliver the text.
    #[error("failed to load dictionary from {source_id}")]
    Source {
        /// Identifier that was requested.
        source_id: String,
        /// Underlying fetch failure.
        #[source]
        source: FetchError,
    },

    /// No catalog entry for this language and key.
    #[error("unknown dictionary '{key}' for language '{language}'")]
    UnknownDictionary {
        /// Requested language code.
        language: String,
        /// Requested catalog key.
        key: String,
    },
}

/// Errors raised by a [`crate::DictionarySource`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Nothing exists under this identifier.
    #[error("dictionary not found: {0}")]
    NotFound(String),

    /// The identifier is malformed or escapes the source root.
    #[error("invalid dictionary identifier: {0}")]
    InvalidIdentifier(String),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DictionaryError {
    pub(crate) fn fetch_failed(source_id: &str, source: FetchError) -> Self {
        Self::Source {
            source_id: source_id.to_owned(),
            source,
        }
    }
}
