//! Generation results shared by the password and passphrase generators.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::passphrase::PassphraseOptions;
use crate::password::PasswordConfig;

/// Which generator produced a secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerationMethod {
    /// Character-based random password.
    #[default]
    Password,
    /// Word-based Diceware passphrase.
    Passphrase,
}

/// Every input that went into a generation, for auditing and tests.
#[derive(Clone, Serialize)]
#[serde(tag = "method", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GenerationMetadata {
    /// Produced by [`crate::password::generate_password`].
    Password {
        /// Requested length.
        length: usize,
        /// Size of the alphabet actually sampled from.
        charset_size: usize,
        /// The configuration as supplied.
        config: PasswordConfig,
    },
    /// Produced by [`crate::passphrase::generate_passphrase`].
    Passphrase {
        /// Number of words drawn.
        word_count: usize,
        /// Entry count of the dictionary (the sampling bound).
        dictionary_size: usize,
        /// Dictionary name from its header.
        dictionary_name: String,
        /// Selected words before capitalization.
        words: Vec<String>,
        /// Options without the bound dictionary.
        config: PassphraseOptions,
    },
}

impl std::fmt::Debug for GenerationMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Password {
                length,
                charset_size,
                config,
            } => f
                .debug_struct("Password")
                .field("length", length)
                .field("charset_size", charset_size)
                .field("config", config)
                .finish(),
            Self::Passphrase {
                word_count,
                dictionary_size,
                dictionary_name,
                config,
                ..
            } => f
                .debug_struct("Passphrase")
                .field("word_count", word_count)
                .field("dictionary_size", dictionary_size)
                .field("dictionary_name", dictionary_name)
                .field("words", &"***")
                .field("config", config)
                .finish(),
        }
    }
}

/// A generated secret with its entropy and provenance.
///
/// The secret (and, for passphrases, the selected words) is zeroized on
/// drop. `Debug` masks both to prevent accidental logging.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    value: String,
    entropy: f64,
    metadata: GenerationMetadata,
    timestamp_ms: u64,
}

impl GenerationResult {
    pub(crate) fn new(value: String, entropy: f64, metadata: GenerationMetadata) -> Self {
        Self {
            value,
            entropy,
            metadata,
            timestamp_ms: now_millis(),
        }
    }

    /// The generated password or passphrase.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Entropy in bits.
    #[must_use]
    pub const fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Inputs used for this generation.
    #[must_use]
    pub const fn metadata(&self) -> &GenerationMetadata {
        &self.metadata
    }

    /// Milliseconds since the Unix epoch at generation time.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    /// Which generator produced this result.
    #[must_use]
    pub fn method(&self) -> GenerationMethod {
        match &self.metadata {
            GenerationMetadata::Password { .. } => GenerationMethod::Password,
            GenerationMetadata::Passphrase { .. } => GenerationMethod::Passphrase,
        }
    }
}

impl std::fmt::Debug for GenerationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationResult")
            .field("value", &"***")
            .field("entropy", &self.entropy)
            .field("metadata", &self.metadata)
            .field("timestamp_ms", &self.timestamp_ms)
            .finish()
    }
}

impl Drop for GenerationResult {
    fn drop(&mut self) {
        self.value.zeroize();
        if let GenerationMetadata::Passphrase { words, .. } = &mut self.metadata {
            words.zeroize();
        }
    }
}

/// Current time in milliseconds since the Unix epoch.
///
/// Uses `std::time::SystemTime` to avoid pulling in a date-time crate.
fn now_millis() -> u64 {
    let elapsed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
