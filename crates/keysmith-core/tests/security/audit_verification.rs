//! Regression tests for generator hardening.
//!
//! 1. `Debug` output of a result never contains the secret
//! 2. Passphrase metadata `Debug` never lists the chosen words
//! 3. Consecutive generations are distinct
//! 4. Serialized configuration never carries the generated value

use std::collections::HashSet;
use std::sync::Arc;

use keysmith_core::{
    generate_passphrase, generate_password, parse_dictionary, PassphraseOptions, PasswordConfig,
};

fn dictionary() -> Arc<keysmith_core::Dictionary> {
    let text: String = (0..1296).map(|i| format!("word{i:04}x\n")).collect();
    Arc::new(parse_dictionary(&text).unwrap())
}

#[test]
fn password_debug_is_masked() {
    let result = generate_password(&PasswordConfig {
        length: 40,
        ..PasswordConfig::default()
    })
    .unwrap();
    let debug = format!("{result:?}");
    assert!(!debug.contains(result.value()), "password leaked: {debug}");
    assert!(debug.contains("***"));
}

#[test]
fn passphrase_debug_hides_words() {
    let result = generate_passphrase(&PassphraseOptions::default().bind(dictionary())).unwrap();
    let debug = format!("{result:?}");
    for word in result.value().split('-') {
        assert!(!debug.contains(word), "word {word} leaked: {debug}");
    }
    let metadata_debug = format!("{:?}", result.metadata());
    for word in result.value().split('-') {
        assert!(!metadata_debug.contains(word), "word {word} leaked: {metadata_debug}");
    }
}

#[test]
fn rapid_passwords_are_distinct() {
    let config = PasswordConfig::default();
    let seen: HashSet<String> = (0..1_000)
        .map(|_| generate_password(&config).unwrap().value().to_owned())
        .collect();
    assert_eq!(seen.len(), 1_000);
}

#[test]
fn rapid_passphrases_are_distinct() {
    let config = PassphraseOptions::default().bind(dictionary());
    let seen: HashSet<String> = (0..1_000)
        .map(|_| generate_passphrase(&config).unwrap().value().to_owned())
        .collect();
    assert_eq!(seen.len(), 1_000);
}

#[test]
fn config_serialization_carries_no_secret() {
    let config = PasswordConfig::default();
    let result = generate_password(&config).unwrap();
    let json = serde_json::to_string(&config).unwrap();
    assert!(!json.contains(result.value()));
}
