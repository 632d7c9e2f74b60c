//! Password alphabet construction.
//!
//! A [`Charset`] is rebuilt for every generation call from the
//! [`PasswordConfig`] toggles; nothing is cached across configurations.

use super::{validate_password_config, PasswordConfig};
use crate::error::GeneratorError;

/// Lowercase letters (a-z).
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Uppercase letters (A-Z).
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Digits (0-9).
pub const NUMBERS: &str = "0123456789";

/// Default symbol set used when no custom symbols are supplied.
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Characters that are easily confused with one another.
pub const AMBIGUOUS: &str = "il1Lo0O";

/// An ordered set of unique characters.
///
/// Order only matters for mapping a sampled index to a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset(Vec<char>);

impl Charset {
    /// Number of distinct characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a charset returned by [`build_charset`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Character at a sampled position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        self.0.get(index).copied()
    }

    /// Whether `c` belongs to the set.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    /// The characters in index order.
    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        &self.0
    }
}

impl std::fmt::Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Build the alphabet described by `config`.
///
/// Classes are concatenated in the order lowercase, uppercase, digits,
/// symbols. Ambiguous characters are removed on request, then duplicates
/// are dropped keeping the first occurrence.
///
/// # Errors
///
/// - [`GeneratorError::InvalidConfig`] if `config` fails validation
/// - [`GeneratorError::EmptyCharset`] if filtering leaves nothing
pub fn build_charset(config: &PasswordConfig) -> Result<Charset, GeneratorError> {
    validate_password_config(config)?;

    let mut raw = String::new();
    if config.include_lowercase {
        raw.push_str(LOWERCASE);
    }
    if config.include_uppercase {
        raw.push_str(UPPERCASE);
    }
    if config.include_numbers {
        raw.push_str(NUMBERS);
    }
    if config.include_symbols {
        match config.custom_symbols.as_deref() {
            Some(custom) if !custom.is_empty() => raw.push_str(custom),
            _ => raw.push_str(SYMBOLS),
        }
    }

    let mut chars: Vec<char> = Vec::with_capacity(raw.len());
    for c in raw.chars() {
        if config.exclude_ambiguous && AMBIGUOUS.contains(c) {
            continue;
        }
        if !chars.contains(&c) {
            chars.push(c);
        }
    }

    if chars.is_empty() {
        return Err(GeneratorError::EmptyCharset);
    }
    Ok(Charset(chars))
}
