//! `exclude_ambiguous` must hold for every draw, not just on average.

use keysmith_core::password::charset::AMBIGUOUS;
use keysmith_core::{build_charset, generate_password, PasswordConfig};

#[test]
fn charset_never_contains_ambiguous() {
    let config = PasswordConfig {
        exclude_ambiguous: true,
        custom_symbols: Some("!il1Lo0O#".into()),
        ..PasswordConfig::default()
    };
    let charset = build_charset(&config).unwrap();
    for c in AMBIGUOUS.chars() {
        assert!(!charset.contains(c), "charset kept '{c}'");
    }
    assert!(charset.contains('!') && charset.contains('#'));
}

#[test]
fn thousands_of_passwords_stay_clean() {
    let config = PasswordConfig {
        length: 128,
        exclude_ambiguous: true,
        ..PasswordConfig::default()
    };
    for _ in 0..2_000 {
        let result = generate_password(&config).unwrap();
        assert!(!result.value().chars().any(|c| AMBIGUOUS.contains(c)));
    }
}
