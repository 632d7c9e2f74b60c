//! Strength assessment, crack-time and crack-cost estimates.
//!
//! All estimates are average-case: an attacker is expected to find the
//! secret after searching half the space, `2^(bits - 1)` guesses.
//!
//! Magnitudes for strong secrets overflow `f64` (2^1024 and beyond) and lose
//! integer precision long before that (past 2^53). Exact combination counts
//! are therefore computed with [`num_bigint::BigUint`], and everything past
//! the `f64` range is formatted from its base-10 logarithm.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper bound (inclusive) of the weak bucket, in bits.
pub const WEAK_MAX_BITS: f64 = 40.0;

/// Upper bound (inclusive) of the moderate bucket, in bits.
pub const MODERATE_MAX_BITS: f64 = 60.0;

/// Upper bound (inclusive) of the strong bucket, in bits.
pub const STRONG_MAX_BITS: f64 = 80.0;

/// Upper bound (inclusive) of the very-strong bucket, in bits.
pub const VERY_STRONG_MAX_BITS: f64 = 128.0;

/// Largest entropy for which [`calculate_combinations`] prints an exact value.
pub const EXACT_COMBINATIONS_MAX_BITS: f64 = 100.0;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_YEAR: f64 = 365.25;
const SECONDS_PER_YEAR: f64 = SECONDS_PER_DAY * DAYS_PER_YEAR;

/// Past this many years (or dollars) values switch to `m × 10^e`.
const SCIENTIFIC_THRESHOLD: f64 = 1e15;

/// Guesses priced by one cost unit.
const GUESSES_PER_COST_UNIT_LOG2: f64 = 32.0;

// ---------------------------------------------------------------------------
// Strength
// ---------------------------------------------------------------------------

/// Qualitative strength bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrengthLevel {
    /// `<= 40` bits.
    Weak,
    /// `40 < bits <= 60`.
    Moderate,
    /// `60 < bits <= 80`.
    Strong,
    /// `80 < bits <= 128`.
    VeryStrong,
    /// `> 128` bits.
    Excessive,
}

impl StrengthLevel {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
            Self::Excessive => "Excessive",
        }
    }
}

/// Strength bucket plus a 0-100 progress value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrengthAssessment {
    /// Bucket.
    pub level: StrengthLevel,
    /// Label of `level`.
    pub label: &'static str,
    /// Progress-bar fill, linearly interpolated within the bucket.
    pub percentage: f64,
}

/// Classify `entropy` bits.
///
/// | bits        | level       | percentage                     |
/// |-------------|-------------|--------------------------------|
/// | `<= 40`     | weak        | `min(bits / 40 * 25, 25)`      |
/// | `<= 60`     | moderate    | `25 + (bits - 40) / 20 * 50`   |
/// | `<= 80`     | strong      | `75 + (bits - 60) / 20 * 25`   |
/// | `<= 128`    | very-strong | `100`                          |
/// | otherwise   | excessive   | `100`                          |
///
/// Negative or NaN input counts as zero bits.
#[must_use]
pub fn assess_strength(entropy: f64) -> StrengthAssessment {
    let bits = if entropy.is_nan() { 0.0 } else { entropy };

    let (level, percentage) = if bits <= WEAK_MAX_BITS {
        (StrengthLevel::Weak, (bits / WEAK_MAX_BITS * 25.0).clamp(0.0, 25.0))
    } else if bits <= MODERATE_MAX_BITS {
        (
            StrengthLevel::Moderate,
            25.0 + (bits - WEAK_MAX_BITS) / (MODERATE_MAX_BITS - WEAK_MAX_BITS) * 50.0,
        )
    } else if bits <= STRONG_MAX_BITS {
        (
            StrengthLevel::Strong,
            75.0 + (bits - MODERATE_MAX_BITS) / (STRONG_MAX_BITS - MODERATE_MAX_BITS) * 25.0,
        )
    } else if bits <= VERY_STRONG_MAX_BITS {
        (StrengthLevel::VeryStrong, 100.0)
    } else {
        (StrengthLevel::Excessive, 100.0)
    };

    StrengthAssessment {
        level,
        label: level.label(),
        percentage,
    }
}

// ---------------------------------------------------------------------------
// Attack presets
// ---------------------------------------------------------------------------

/// Attacker guess rates for time-to-crack estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttackScenario {
    /// Rate-limited online attack.
    OnlineSlow,
    /// Online attack without rate limiting.
    OnlineFast,
    /// Offline attack on a single GPU.
    #[default]
    OfflineGpu,
    /// Offline attack on a GPU cluster.
    OfflineCluster,
    /// Nation-state adversary.
    Advanced,
}

impl AttackScenario {
    /// Every preset, slowest first.
    pub const ALL: [Self; 5] = [
        Self::OnlineSlow,
        Self::OnlineFast,
        Self::OfflineGpu,
        Self::OfflineCluster,
        Self::Advanced,
    ];

    /// Guesses per second.
    #[must_use]
    pub const fn guesses_per_second(self) -> f64 {
        match self {
            Self::OnlineSlow => 1e3,
            Self::OnlineFast => 1e6,
            Self::OfflineGpu => 1e9,
            Self::OfflineCluster => 1e12,
            Self::Advanced => 1e15,
        }
    }
}

/// Price tiers for cost-to-crack estimates, in USD per 2^32 guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostTier {
    /// Cheap commodity compute.
    Low,
    /// Typical cloud pricing.
    #[default]
    Medium,
    /// Premium hardware.
    High,
    /// Dedicated infrastructure.
    VeryHigh,
}

impl CostTier {
    /// Every tier, cheapest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    /// USD per 2^32 guesses.
    #[must_use]
    pub const fn usd_per_2_32_guesses(self) -> f64 {
        match self {
            Self::Low => 0.001,
            Self::Medium => 0.01,
            Self::High => 0.1,
            Self::VeryHigh => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Time to crack
// ---------------------------------------------------------------------------

/// Average-case time to exhaust half of the search space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeToCrack {
    /// Seconds; infinite when the value exceeds `f64`.
    pub seconds: f64,
    /// Human-readable rendering of `seconds`.
    pub formatted: String,
}

/// Estimate the time to guess a secret of `entropy` bits.
///
/// Non-positive `entropy`, or a rate that is not positive and finite,
/// yields `0` seconds and `"Invalid"`. Infinite `entropy` yields `"∞"`.
#[must_use]
pub fn calculate_time_to_crack(entropy: f64, guesses_per_second: f64) -> TimeToCrack {
    if !is_positive(entropy)
        || !is_positive(guesses_per_second)
        || guesses_per_second.is_infinite()
    {
        return TimeToCrack {
            seconds: 0.0,
            formatted: "Invalid".into(),
        };
    }
    if entropy.is_infinite() {
        return TimeToCrack {
            seconds: f64::INFINITY,
            formatted: "∞".into(),
        };
    }

    let seconds = (entropy - 1.0).exp2() / guesses_per_second;
    let formatted = if seconds.is_finite() {
        format_time(seconds)
    } else {
        let log10_years =
            (entropy - 1.0).mul_add(std::f64::consts::LOG10_2, -guesses_per_second.log10())
                - SECONDS_PER_YEAR.log10();
        format!("{} years", scientific(log10_years))
    };

    TimeToCrack { seconds, formatted }
}

/// Render a duration from milliseconds up to `m.mm × 10^e years`.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    if seconds.is_nan() || seconds < 0.0 {
        return "Invalid".into();
    }
    if seconds < 1.0 {
        return format!("{:.2} milliseconds", seconds * 1000.0);
    }
    if seconds < SECONDS_PER_MINUTE {
        return format!("{seconds:.2} seconds");
    }
    if seconds < SECONDS_PER_HOUR {
        return format!("{:.2} minutes", seconds / SECONDS_PER_MINUTE);
    }
    if seconds < SECONDS_PER_DAY {
        return format!("{:.2} hours", seconds / SECONDS_PER_HOUR);
    }
    let days = seconds / SECONDS_PER_DAY;
    if days < DAYS_PER_YEAR {
        return format!("{days:.2} days");
    }

    let years = days / DAYS_PER_YEAR;
    if years < 1e3 {
        format!("{years:.2} years")
    } else if years < 1e6 {
        format!("{:.2} thousand years", years / 1e3)
    } else if years < 1e9 {
        format!("{:.2} million years", years / 1e6)
    } else if years < 1e12 {
        format!("{:.2} billion years", years / 1e9)
    } else if years < SCIENTIFIC_THRESHOLD {
        format!("{:.2} trillion years", years / 1e12)
    } else {
        format!("{} years", scientific(years.log10()))
    }
}

// ---------------------------------------------------------------------------
// Cost to crack
// ---------------------------------------------------------------------------

/// Average-case cost to exhaust half of the search space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostToCrack {
    /// US dollars; infinite when the value exceeds `f64`.
    pub usd: f64,
    /// Human-readable rendering of `usd`.
    pub formatted: String,
}

/// Estimate the cost of guessing a secret of `entropy` bits when every
/// 2^32 guesses cost `usd_per_2_32_guesses`.
///
/// Non-positive `entropy` or a negative or non-finite cost yields `0` and
/// `"Invalid"`. Infinite `entropy` yields `"∞"`.
#[must_use]
pub fn calculate_cost_to_crack(entropy: f64, usd_per_2_32_guesses: f64) -> CostToCrack {
    if !is_positive(entropy) || !usd_per_2_32_guesses.is_finite() || usd_per_2_32_guesses < 0.0 {
        return CostToCrack {
            usd: 0.0,
            formatted: "Invalid".into(),
        };
    }

    // Free guessing stays free however large the space is.
    if usd_per_2_32_guesses <= 0.0 {
        return CostToCrack {
            usd: 0.0,
            formatted: format_cost(0.0),
        };
    }
    if entropy.is_infinite() {
        return CostToCrack {
            usd: f64::INFINITY,
            formatted: "∞".into(),
        };
    }

    let units = (entropy - 1.0 - GUESSES_PER_COST_UNIT_LOG2).exp2();
    let usd = units * usd_per_2_32_guesses;
    let formatted = if usd.is_finite() {
        format_cost(usd)
    } else {
        let log10_usd = (entropy - 1.0 - GUESSES_PER_COST_UNIT_LOG2)
            .mul_add(std::f64::consts::LOG10_2, usd_per_2_32_guesses.log10());
        format!("${}", scientific(log10_usd))
    };

    CostToCrack { usd, formatted }
}

/// Render an amount of dollars with K/M/B/T suffixes.
#[must_use]
pub fn format_cost(usd: f64) -> String {
    if usd.is_nan() || usd < 0.0 {
        return "Invalid".into();
    }
    if usd < 1e3 {
        format!("${usd:.2}")
    } else if usd < 1e6 {
        format!("${:.2}K", usd / 1e3)
    } else if usd < 1e9 {
        format!("${:.2}M", usd / 1e6)
    } else if usd < 1e12 {
        format!("${:.2}B", usd / 1e9)
    } else if usd < SCIENTIFIC_THRESHOLD {
        format!("${:.2}T", usd / 1e12)
    } else {
        format!("${}", scientific(usd.log10()))
    }
}

// ---------------------------------------------------------------------------
// Combinations
// ---------------------------------------------------------------------------

/// Number of equally likely outcomes for `entropy` bits.
///
/// Up to [`EXACT_COMBINATIONS_MAX_BITS`] the exact `2^floor(bits)` is
/// printed with thousands separators; beyond that `~m.mm × 10^e`.
#[must_use]
pub fn calculate_combinations(entropy: f64) -> String {
    if !is_positive(entropy) {
        return "0".into();
    }
    if entropy.is_infinite() {
        return "∞".into();
    }

    if entropy <= EXACT_COMBINATIONS_MAX_BITS {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let exponent = entropy.floor() as usize;
        let combinations = BigUint::from(1u8) << exponent;
        return group_thousands(&combinations.to_string());
    }

    format!("~{}", scientific(entropy * std::f64::consts::LOG10_2))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// Insert `,` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len.saturating_add(len / 3));
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len.saturating_sub(i)) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format `10^log10` as `m.mm × 10^e` with `1 <= m < 10` after rounding.
#[allow(clippy::cast_possible_truncation)]
fn scientific(log10: f64) -> String {
    let mut exponent = log10.floor();
    let mut mantissa = 10f64.powf(log10 - exponent);
    if (mantissa * 100.0).round() >= 1000.0 {
        mantissa /= 10.0;
        exponent += 1.0;
    }
    format!("{mantissa:.2} × 10^{}", exponent as i64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
