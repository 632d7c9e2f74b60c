//! `keysmith-core` — Password and passphrase generation primitives.
//!
//! This crate is the audit target: zero network, zero async, zero I/O.
//! Every random decision goes through the rejection sampler in [`random`],
//! which reads from a [`RandomSource`] and never falls back to a
//! non-cryptographic generator.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod random;

pub mod password;

pub mod dictionary;
pub mod passphrase;

pub mod strength;

pub mod result;

pub use dictionary::{parse_dictionary, Dictionary, DictionaryEntry, DictionaryMetadata};
pub use error::GeneratorError;
pub use passphrase::{
    generate_passphrase, generate_passphrase_with, passphrase_entropy,
    validate_passphrase_config, Capitalization, PassphraseConfig, PassphraseOptions,
    DEFAULT_WORD_COUNT, MAX_WORD_COUNT, MIN_WORD_COUNT,
};
pub use password::{
    build_charset, generate_password, generate_password_with, password_entropy,
    validate_password_config, Charset, PasswordConfig, DEFAULT_PASSWORD_LENGTH,
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use random::{sample, sample_one, OsRandom, RandomSource};
pub use result::{GenerationMetadata, GenerationMethod, GenerationResult};
pub use strength::{
    assess_strength, calculate_combinations, calculate_cost_to_crack, calculate_time_to_crack,
    format_cost, format_time, AttackScenario, CostTier, CostToCrack, StrengthAssessment,
    StrengthLevel, TimeToCrack,
};
