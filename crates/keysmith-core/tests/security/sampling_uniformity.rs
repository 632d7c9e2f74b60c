//! Goodness-of-fit tests for the rejection sampler.
//!
//! Each test draws from the OS CSPRNG and compares the observed histogram
//! against the uniform distribution with Pearson's chi-square statistic.
//! The null hypothesis is rejected only below p = 0.0001, so a correct
//! sampler fails roughly once in ten thousand runs.

use keysmith_core::password::charset::{LOWERCASE, NUMBERS, SYMBOLS, UPPERCASE};
use keysmith_core::{generate_password, sample, OsRandom, PasswordConfig};
use statrs::distribution::{ChiSquared, ContinuousCDF};

const P_THRESHOLD: f64 = 0.0001;

/// Pearson statistic for `observed` against a flat expectation.
#[allow(clippy::cast_precision_loss)]
fn chi_square(observed: &[u64]) -> f64 {
    let total: u64 = observed.iter().sum();
    let expected = total as f64 / observed.len() as f64;
    observed
        .iter()
        .map(|&o| {
            let diff = o as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

#[allow(clippy::cast_precision_loss)]
fn p_value(observed: &[u64]) -> f64 {
    let dof = (observed.len() - 1) as f64;
    let dist = ChiSquared::new(dof).unwrap();
    dist.sf(chi_square(observed))
}

/// Six-sided die: 60 000 rolls.
#[test]
fn die_rolls_are_uniform() {
    let mut counts = [0u64; 6];
    for v in sample(&OsRandom, 60_000, 6).unwrap() {
        counts[v] += 1;
    }
    let p = p_value(&counts);
    assert!(p > P_THRESHOLD, "die histogram {counts:?} p={p}");
}

/// Bound 7776 needs two bytes and rejects the tail above 65 318.
#[test]
fn diceware_indices_are_uniform() {
    // Bucket into 36 groups of 216 so each bucket expects ~2 800 hits.
    let mut counts = [0u64; 36];
    for v in sample(&OsRandom, 100_000, 7776).unwrap() {
        counts[v / 216] += 1;
    }
    let p = p_value(&counts);
    assert!(p > P_THRESHOLD, "diceware histogram p={p}");
}

/// Bound 200 is the worst single-byte case: a naive `byte % 200` would
/// make 0..56 twice as likely as 56..200.
#[test]
fn biased_modulus_is_corrected() {
    let mut counts = [0u64; 200];
    for v in sample(&OsRandom, 200_000, 200).unwrap() {
        counts[v] += 1;
    }
    let p = p_value(&counts);
    assert!(p > P_THRESHOLD, "bound-200 histogram p={p}");

    #[allow(clippy::cast_precision_loss)]
    let low: f64 = counts[..56].iter().sum::<u64>() as f64 / 56.0;
    #[allow(clippy::cast_precision_loss)]
    let high: f64 = counts[56..].iter().sum::<u64>() as f64 / 144.0;
    assert!((low / high - 1.0).abs() < 0.05, "low={low} high={high}");
}

/// Characters of full-charset passwords are uniform over all 88 symbols.
#[test]
fn password_characters_are_uniform() {
    let alphabet: Vec<char> = [LOWERCASE, UPPERCASE, NUMBERS, SYMBOLS]
        .concat()
        .chars()
        .collect();
    let config = PasswordConfig {
        length: 128,
        ..PasswordConfig::default()
    };

    let mut counts = vec![0u64; alphabet.len()];
    for _ in 0..500 {
        let result = generate_password(&config).unwrap();
        for c in result.value().chars() {
            let pos = alphabet.iter().position(|&a| a == c).unwrap();
            counts[pos] += 1;
        }
    }
    let p = p_value(&counts);
    assert!(p > P_THRESHOLD, "password character histogram p={p}");
}
