//! Unbiased integer sampling from a cryptographic random source.
//!
//! Every random choice in the crate goes through [`sample`]: it draws the
//! minimum number of bytes able to cover `bound`, interprets them as a
//! big-endian integer, and rejects draws at or above the largest multiple of
//! `bound` so that the final `v % bound` carries no modulo bias.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::error::GeneratorError;

/// Consecutive rejections tolerated for a single value before failing closed.
///
/// Each draw is rejected with probability below 1/2, so a healthy source
/// reaches this cap with probability below 2^-128.
pub const MAX_CONSECUTIVE_REJECTIONS: usize = 128;

/// Width of the widest draw: enough bytes to cover any `usize` bound.
const MAX_DRAW_BYTES: usize = 16;

/// A cryptographically secure source of random bytes.
///
/// Implementations must fail rather than fall back to a weaker generator.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with secure random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::RandomnessUnavailable`] if the source
    /// cannot be read.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), GeneratorError>;
}

/// The operating system CSPRNG (`getrandom` via [`OsRng`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), GeneratorError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| GeneratorError::RandomnessUnavailable(format!("CSPRNG fill failed: {e}")))
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &T {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), GeneratorError> {
        (**self).fill_bytes(dest)
    }
}

/// Draw `count` independent values, each uniform in `[0, bound)`.
///
/// # Errors
///
/// - [`GeneratorError::InvalidConfig`] if `bound` is zero
/// - [`GeneratorError::RandomnessUnavailable`] if the source fails
/// - [`GeneratorError::RandomnessExhausted`] if [`MAX_CONSECUTIVE_REJECTIONS`]
///   draws in a row are rejected
pub fn sample<R: RandomSource + ?Sized>(
    source: &R,
    count: usize,
    bound: usize,
) -> Result<Vec<usize>, GeneratorError> {
    if bound == 0 {
        return Err(GeneratorError::invalid("Sampling bound must be positive"));
    }

    let (width, capacity) = draw_width(bound);
    let limit = rejection_limit(capacity, bound);

    let mut buf = [0u8; MAX_DRAW_BYTES];
    let mut values = Vec::with_capacity(count);
    let result = fill_values(source, &mut buf[..width], bound, limit, count, &mut values);
    buf.zeroize();

    match result {
        Ok(()) => Ok(values),
        Err(e) => {
            values.zeroize();
            Err(e)
        }
    }
}

/// Draw a single value uniform in `[0, bound)`.
///
/// # Errors
///
/// Same as [`sample`].
pub fn sample_one<R: RandomSource + ?Sized>(
    source: &R,
    bound: usize,
) -> Result<usize, GeneratorError> {
    let mut values = sample(source, 1, bound)?;
    values
        .pop()
        .ok_or(GeneratorError::RandomnessExhausted { attempts: 0 })
}

fn fill_values<R: RandomSource + ?Sized>(
    source: &R,
    buf: &mut [u8],
    bound: usize,
    limit: u128,
    count: usize,
    out: &mut Vec<usize>,
) -> Result<(), GeneratorError> {
    while out.len() < count {
        let mut accepted = None;
        for _ in 0..MAX_CONSECUTIVE_REJECTIONS {
            source.fill_bytes(buf)?;
            let value = buf
                .iter()
                .fold(0u128, |acc, &b| (acc << 8) | u128::from(b));
            if value < limit {
                accepted = Some(reduce(value, bound));
                break;
            }
        }
        match accepted {
            Some(v) => out.push(v),
            None => {
                return Err(GeneratorError::RandomnessExhausted {
                    attempts: MAX_CONSECUTIVE_REJECTIONS,
                })
            }
        }
    }
    Ok(())
}

/// Smallest `k` with `256^k >= bound`, together with `256^k`.
pub(crate) fn draw_width(bound: usize) -> (usize, u128) {
    let target = bound as u128;
    let mut width = 0usize;
    let mut capacity = 1u128;
    while capacity < target {
        capacity = capacity.saturating_mul(256);
        width = width.saturating_add(1);
    }
    (width, capacity)
}

/// Largest multiple of `bound` not exceeding `capacity`.
// `bound` is non-zero and `capacity >= bound`, so neither operation can trap.
#[allow(clippy::arithmetic_side_effects)]
fn rejection_limit(capacity: u128, bound: usize) -> u128 {
    let bound = bound as u128;
    capacity - capacity % bound
}

#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn reduce(value: u128, bound: usize) -> usize {
    (value % bound as u128) as usize
}
