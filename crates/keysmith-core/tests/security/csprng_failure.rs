//! A broken randomness source must fail loudly.
//!
//! Generation never retries with a weaker generator and never returns a
//! partial value: every failure surfaces as a [`GeneratorError`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use keysmith_core::{
    generate_passphrase_with, generate_password_with, parse_dictionary, sample, Capitalization,
    GeneratorError, PassphraseOptions, PasswordConfig, RandomSource,
};

/// Fails every call.
struct Unavailable;

impl RandomSource for Unavailable {
    fn fill_bytes(&self, _dest: &mut [u8]) -> Result<(), GeneratorError> {
        Err(GeneratorError::RandomnessUnavailable("device offline".into()))
    }
}

/// Works for `remaining` calls, then fails.
struct FailsAfter {
    remaining: AtomicUsize,
}

impl RandomSource for FailsAfter {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), GeneratorError> {
        let left = self.remaining.load(Ordering::SeqCst);
        if left == 0 {
            return Err(GeneratorError::RandomnessUnavailable("device offline".into()));
        }
        self.remaining.store(left - 1, Ordering::SeqCst);
        dest.fill(0);
        Ok(())
    }
}

/// Returns only `0xFF`, which is always in the rejected tail for bound 10.
struct Stuck;

impl RandomSource for Stuck {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), GeneratorError> {
        dest.fill(0xFF);
        Ok(())
    }
}

#[test]
fn password_surfaces_unavailable() {
    let err = generate_password_with(&PasswordConfig::default(), &Unavailable).unwrap_err();
    assert!(matches!(err, GeneratorError::RandomnessUnavailable(_)));
}

#[test]
fn failure_midway_returns_no_partial_password() {
    let source = FailsAfter {
        remaining: AtomicUsize::new(5),
    };
    let err = generate_password_with(&PasswordConfig::default(), &source).unwrap_err();
    assert!(matches!(err, GeneratorError::RandomnessUnavailable(_)));
}

#[test]
fn passphrase_surfaces_unavailable_during_capitalization() {
    let dict = Arc::new(parse_dictionary("alpha\nbravo\n").unwrap());
    let options = PassphraseOptions {
        word_count: 3,
        capitalization: Capitalization::RandomWord,
        ..PassphraseOptions::default()
    };
    // Three word draws succeed, the capitalization draw fails.
    let source = FailsAfter {
        remaining: AtomicUsize::new(3),
    };
    let err = generate_passphrase_with(&options.bind(dict), &source).unwrap_err();
    assert!(matches!(err, GeneratorError::RandomnessUnavailable(_)));
}

#[test]
fn stuck_source_is_detected() {
    let err = sample(&Stuck, 1, 10).unwrap_err();
    assert!(matches!(err, GeneratorError::RandomnessExhausted { .. }));

    let digits = PasswordConfig {
        include_lowercase: false,
        include_uppercase: false,
        include_symbols: false,
        ..PasswordConfig::default()
    };
    let err = generate_password_with(&digits, &Stuck).unwrap_err();
    assert!(matches!(err, GeneratorError::RandomnessExhausted { .. }));
}
