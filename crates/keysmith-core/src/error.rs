//! Generation error types for `keysmith-core`.

use thiserror::Error;

/// Errors produced by sampling, generation and dictionary parsing.
///
/// Every failure category is a distinct variant so callers can branch on
/// it instead of matching message text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// Configuration rejected by validation (length, word count, classes).
    ///
    /// The message is user-facing and may be surfaced verbatim.
    #[error("{0}")]
    InvalidConfig(String),

    /// The charset is empty after ambiguous-character removal.
    #[error("Character set is empty after applying filters")]
    EmptyCharset,

    /// The dictionary has no usable entries.
    #[error("Dictionary is empty")]
    EmptyDictionary,

    /// No cryptographic random source could be read.
    #[error("secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// Rejection sampling discarded an implausible number of draws in a row.
    #[error("secure randomness exhausted after {attempts} rejected draws")]
    RandomnessExhausted {
        /// Consecutive rejected draws before giving up.
        attempts: usize,
    },
}

impl GeneratorError {
    /// Shorthand for [`GeneratorError::InvalidConfig`].
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
