//! Password strength metrics
//!
//! Character pool size, combination count, entropy and the estimated time a
//! fixed-rate guesser needs to exhaust the search space.

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::format::{format_combinations, format_duration};

/// Assumed guess rate of a high-end GPU rig (guesses per second)
pub const DEFAULT_CRACK_SPEED: f64 = 2_000_000_000.0;

/// Pool size used when no character class is present
pub const FALLBACK_POOL_SIZE: u32 = 10;

/// The four disjoint character classes that make up the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    /// Number of symbols this class contributes to the pool
    pub fn width(self) -> u32 {
        match self {
            CharClass::Lowercase => 26,
            CharClass::Uppercase => 26,
            CharClass::Digit => 10,
            CharClass::Symbol => 32,
        }
    }

    /// Whether `c` belongs to this class.
    ///
    /// Symbols are anything that is neither ASCII alphanumeric nor whitespace,
    /// so non-ASCII letters count as symbols.
    #[inline]
    pub fn contains(self, c: char) -> bool {
        match self {
            CharClass::Lowercase => c.is_ascii_lowercase(),
            CharClass::Uppercase => c.is_ascii_uppercase(),
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Symbol => !c.is_ascii_alphanumeric() && !c.is_whitespace(),
        }
    }
}

/// Character classes present in the password
pub fn classes_present(password: &str) -> Vec<CharClass> {
    CharClass::ALL
        .into_iter()
        .filter(|class| password.chars().any(|c| class.contains(c)))
        .collect()
}

/// Pool size S: sum of the widths of the present classes, never below 10
pub fn pool_size(password: &str) -> u32 {
    let size: u32 = classes_present(password).iter().map(|c| c.width()).sum();
    if size == 0 {
        FALLBACK_POOL_SIZE
    } else {
        size
    }
}

/// Derived strength metrics for one password
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Length L in Unicode scalar values (`chars`), not UTF-16 code units
    pub length: usize,
    /// Character pool size S
    pub pool_size: u32,
    /// Exact combination count N = S^L
    pub combinations: BigUint,
    /// Entropy E = L * log2(S) in bits
    pub entropy_bits: f64,
    /// N divided by the guess rate; infinite when N overflows `f64`
    pub crack_time_seconds: f64,
}

impl Metrics {
    /// N as a float, saturating to infinity
    pub fn combinations_f64(&self) -> f64 {
        self.combinations.to_f64().unwrap_or(f64::INFINITY)
    }

    /// Values rendered for the display
    pub fn display(&self) -> MetricsDisplay {
        MetricsDisplay {
            length: self.length,
            pool_size: self.pool_size,
            combinations: format_combinations(&self.combinations),
            entropy: format!("{:.2} bits", self.entropy_bits),
            crack_time: format_duration(self.crack_time_seconds),
        }
    }
}

/// Rendered metric fields handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsDisplay {
    pub length: usize,
    pub pool_size: u32,
    pub combinations: String,
    pub entropy: String,
    pub crack_time: String,
}

/// Compute metrics at the default guess rate
pub fn compute_metrics(password: &str) -> Metrics {
    compute_metrics_with_speed(password, DEFAULT_CRACK_SPEED)
}

/// Compute metrics for a password against a guesser running at `crack_speed` guesses/sec
pub fn compute_metrics_with_speed(password: &str, crack_speed: f64) -> Metrics {
    let length = password.chars().count();
    let pool_size = pool_size(password);

    let exponent = u32::try_from(length).unwrap_or(u32::MAX);
    let combinations = BigUint::from(pool_size).pow(exponent);

    let entropy_bits = if length == 0 {
        0.0
    } else {
        length as f64 * f64::from(pool_size).log2()
    };

    let crack_time_seconds = combinations.to_f64().unwrap_or(f64::INFINITY) / crack_speed;

    Metrics {
        length,
        pool_size,
        combinations,
        entropy_bits,
        crack_time_seconds,
    }
}
