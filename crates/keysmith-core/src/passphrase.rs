//! Diceware-style passphrase generation.
//!
//! Words are drawn independently and with replacement from a [`Dictionary`],
//! so the same word may appear twice. Entropy is computed under that model:
//! `word_count * log2(dictionary_size)`, plus `log2(10000)` for the optional
//! four-digit suffix.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::error::GeneratorError;
use crate::random::{self, OsRandom, RandomSource};
use crate::result::{GenerationMetadata, GenerationResult};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum allowed passphrase word count.
pub const MIN_WORD_COUNT: usize = 1;

/// Maximum allowed passphrase word count.
pub const MAX_WORD_COUNT: usize = 20;

/// Default passphrase word count.
pub const DEFAULT_WORD_COUNT: usize = 6;

/// Default separator between words.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Number of distinct suffix values (`0000`-`9999`).
const NUMBER_SUFFIX_RANGE: usize = 10_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How the selected words are capitalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capitalization {
    /// Words are used as listed.
    #[default]
    None,
    /// First character of every word uppercased.
    First,
    /// One randomly chosen character of every word uppercased.
    Random,
    /// Every word fully uppercased.
    All,
    /// One randomly chosen word fully uppercased, the rest untouched.
    RandomWord,
}

/// Passphrase options, independent of any dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PassphraseOptions {
    /// Number of words (1-20).
    pub word_count: usize,
    /// Inserted between words and before the number suffix. May be empty.
    pub separator: String,
    /// Capitalization style.
    pub capitalization: Capitalization,
    /// Append a random zero-padded four-digit number.
    pub include_number: bool,
    /// Prefer each entry's transliteration when it has one.
    pub use_transliteration: bool,
}

impl Default for PassphraseOptions {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_WORD_COUNT,
            separator: DEFAULT_SEPARATOR.into(),
            capitalization: Capitalization::None,
            include_number: false,
            use_transliteration: false,
        }
    }
}

impl PassphraseOptions {
    /// Attach a dictionary, producing a full [`PassphraseConfig`].
    #[must_use]
    pub fn bind(self, dictionary: Arc<Dictionary>) -> PassphraseConfig {
        PassphraseConfig {
            options: self,
            dictionary,
        }
    }
}

/// Options plus the dictionary to draw from.
#[derive(Debug, Clone)]
pub struct PassphraseConfig {
    /// Generation options.
    pub options: PassphraseOptions,
    /// Source of words.
    pub dictionary: Arc<Dictionary>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Check a [`PassphraseConfig`] without generating anything.
///
/// # Errors
///
/// - [`GeneratorError::InvalidConfig`] if `word_count` is outside
///   [`MIN_WORD_COUNT`]..=[`MAX_WORD_COUNT`]
/// - [`GeneratorError::EmptyDictionary`] if the dictionary has no entries
pub fn validate_passphrase_config(config: &PassphraseConfig) -> Result<(), GeneratorError> {
    let word_count = config.options.word_count;
    if !(MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(&word_count) {
        return Err(GeneratorError::invalid(format!(
            "Word count must be between {MIN_WORD_COUNT} and {MAX_WORD_COUNT}"
        )));
    }
    if config.dictionary.is_empty() {
        return Err(GeneratorError::EmptyDictionary);
    }
    Ok(())
}

/// Entropy in bits of a passphrase.
///
/// Returns `0.0` when `word_count` or `dictionary_size` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn passphrase_entropy(word_count: usize, dictionary_size: usize, include_number: bool) -> f64 {
    if word_count == 0 || dictionary_size == 0 {
        return 0.0;
    }
    let mut entropy = word_count as f64 * (dictionary_size as f64).log2();
    if include_number {
        entropy += (NUMBER_SUFFIX_RANGE as f64).log2();
    }
    entropy
}

/// Generate a passphrase using the operating system CSPRNG.
///
/// # Errors
///
/// See [`generate_passphrase_with`].
pub fn generate_passphrase(config: &PassphraseConfig) -> Result<GenerationResult, GeneratorError> {
    generate_passphrase_with(config, &OsRandom)
}

/// Generate a passphrase drawing bytes from `source`.
///
/// # Errors
///
/// - [`GeneratorError::InvalidConfig`] / [`GeneratorError::EmptyDictionary`]
///   if validation fails
/// - [`GeneratorError::RandomnessUnavailable`] /
///   [`GeneratorError::RandomnessExhausted`] from the sampler
pub fn generate_passphrase_with<R: RandomSource + ?Sized>(
    config: &PassphraseConfig,
    source: &R,
) -> Result<GenerationResult, GeneratorError> {
    validate_passphrase_config(config)?;

    let options = &config.options;
    let dictionary = &config.dictionary;
    let dictionary_size = dictionary.word_count();

    let indices = random::sample(source, options.word_count, dictionary_size)?;
    let selected: Vec<String> = indices
        .iter()
        .filter_map(|&i| dictionary.get(i))
        .map(|entry| entry.display_word(options.use_transliteration).to_owned())
        .collect();

    let words = capitalize(&selected, options.capitalization, source)?;
    let mut passphrase = words.join(&options.separator);

    if options.include_number {
        let number = random::sample_one(source, NUMBER_SUFFIX_RANGE)?;
        passphrase.push_str(&options.separator);
        passphrase.push_str(&format!("{number:04}"));
    }

    let entropy = passphrase_entropy(options.word_count, dictionary_size, options.include_number);

    Ok(GenerationResult::new(
        passphrase,
        entropy,
        GenerationMetadata::Passphrase {
            word_count: options.word_count,
            dictionary_size,
            dictionary_name: dictionary.metadata().name.clone(),
            words: selected,
            config: options.clone(),
        },
    ))
}

// ---------------------------------------------------------------------------
// Capitalization
// ---------------------------------------------------------------------------

fn capitalize<R: RandomSource + ?Sized>(
    words: &[String],
    style: Capitalization,
    source: &R,
) -> Result<Vec<String>, GeneratorError> {
    match style {
        Capitalization::None => Ok(words.to_vec()),
        Capitalization::First => Ok(words.iter().map(|w| uppercase_char_at(w, 0)).collect()),
        Capitalization::Random => words
            .iter()
            .map(|w| {
                let len = w.chars().count();
                if len == 0 {
                    return Ok(w.clone());
                }
                let position = random::sample_one(source, len)?;
                Ok(uppercase_char_at(w, position))
            })
            .collect(),
        Capitalization::All => Ok(words.iter().map(|w| w.to_uppercase()).collect()),
        Capitalization::RandomWord => {
            let chosen = random::sample_one(source, words.len())?;
            Ok(words
                .iter()
                .enumerate()
                .map(|(i, w)| if i == chosen { w.to_uppercase() } else { w.clone() })
                .collect())
        }
    }
}

/// Uppercase the character at `position` (counted in `char`s).
fn uppercase_char_at(word: &str, position: usize) -> String {
    word.chars()
        .enumerate()
        .fold(String::with_capacity(word.len()), |mut out, (i, c)| {
            if i == position {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            out
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
