//! Cryptographic random password generation.
//!
//! Every character is drawn independently and uniformly from the charset
//! built by [`charset::build_charset`], through the rejection sampler in
//! [`crate::random`]. There is no "at least one of each class" rule and no
//! shuffling: uniform independent draws already give the advertised
//! `length * log2(charset_size)` bits.

pub mod charset;

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::random::{self, OsRandom, RandomSource};
use crate::result::{GenerationMetadata, GenerationResult};

pub use charset::{build_charset, Charset};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum allowed password length.
pub const MIN_PASSWORD_LENGTH: usize = 1;

/// Maximum allowed password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Default password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Configuration for a random password.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordConfig {
    /// Number of characters to generate (1-128).
    pub length: usize,
    /// Include lowercase letters (a-z).
    pub include_lowercase: bool,
    /// Include uppercase letters (A-Z).
    pub include_uppercase: bool,
    /// Include digits (0-9).
    pub include_numbers: bool,
    /// Include symbols.
    pub include_symbols: bool,
    /// Replaces the default symbol set when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_symbols: Option<String>,
    /// Drop `i l 1 L o 0 O` from the alphabet.
    pub exclude_ambiguous: bool,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            include_lowercase: true,
            include_uppercase: true,
            include_numbers: true,
            include_symbols: true,
            custom_symbols: None,
            exclude_ambiguous: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Check a [`PasswordConfig`] without generating anything.
///
/// # Errors
///
/// Returns [`GeneratorError::InvalidConfig`] if:
/// - `length` is outside [`MIN_PASSWORD_LENGTH`]..=[`MAX_PASSWORD_LENGTH`]
/// - no character class is enabled
/// - symbols are enabled and `custom_symbols` is `Some("")`
pub fn validate_password_config(config: &PasswordConfig) -> Result<(), GeneratorError> {
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&config.length) {
        return Err(GeneratorError::invalid(format!(
            "Password length must be between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    if !config.include_lowercase
        && !config.include_uppercase
        && !config.include_numbers
        && !config.include_symbols
    {
        return Err(GeneratorError::invalid(
            "At least one character type must be selected",
        ));
    }

    if config.include_symbols && config.custom_symbols.as_deref() == Some("") {
        return Err(GeneratorError::invalid(
            "Custom symbols cannot be empty when symbols are enabled",
        ));
    }

    Ok(())
}

/// Entropy in bits of a password: `length * log2(charset_size)`.
///
/// Returns `0.0` when either argument is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn password_entropy(length: usize, charset_size: usize) -> f64 {
    if length == 0 || charset_size == 0 {
        return 0.0;
    }
    length as f64 * (charset_size as f64).log2()
}

/// Generate a password using the operating system CSPRNG.
///
/// # Errors
///
/// See [`generate_password_with`].
pub fn generate_password(config: &PasswordConfig) -> Result<GenerationResult, GeneratorError> {
    generate_password_with(config, &OsRandom)
}

/// Generate a password drawing bytes from `source`.
///
/// # Errors
///
/// - [`GeneratorError::InvalidConfig`] if validation fails
/// - [`GeneratorError::EmptyCharset`] if the alphabet ends up empty
/// - [`GeneratorError::RandomnessUnavailable`] /
///   [`GeneratorError::RandomnessExhausted`] from the sampler
pub fn generate_password_with<R: RandomSource + ?Sized>(
    config: &PasswordConfig,
    source: &R,
) -> Result<GenerationResult, GeneratorError> {
    let charset = build_charset(config)?;
    let indices = random::sample(source, config.length, charset.len())?;

    let password: String = indices
        .iter()
        .filter_map(|&index| charset.get(index))
        .collect();

    let entropy = password_entropy(config.length, charset.len());

    Ok(GenerationResult::new(
        password,
        entropy,
        GenerationMetadata::Password {
            length: config.length,
            charset_size: charset.len(),
            config: config.clone(),
        },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
