//! Rational frequency multipliers.
//!
//! A [`Ratio`] says how far a voice sits above (or below) the shared base
//! frequency: `3/2` is a just fifth, `5/4` a just major third, `2/1` an
//! octave. Ratios are always stored in lowest terms, so `6/4` and `3/2` are
//! the same value and compare equal.

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a ratio could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatioError {
    #[error("empty ratio")]
    Empty,
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
    #[error("numerator must be positive")]
    ZeroNumerator,
    #[error("denominator must be positive")]
    ZeroDenominator,
}

/// Greatest common divisor (Euclid).
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Reduce `numerator/denominator` to lowest terms.
///
/// `simplify(6, 4) == (3, 2)`. A zero denominator is returned untouched; use
/// [`Ratio::new`] when the input still needs validating.
pub fn simplify(numerator: u32, denominator: u32) -> (u32, u32) {
    match gcd(numerator, denominator) {
        0 | 1 => (numerator, denominator),
        divisor => (numerator / divisor, denominator / divisor),
    }
}

/// A positive frequency ratio in lowest terms.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RatioFields", into = "RatioFields")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    numerator: u32,
    denominator: u32,
}

impl Ratio {
    /// The unison ratio `1/1`.
    pub const UNISON: Ratio = Ratio {
        numerator: 1,
        denominator: 1,
    };

    /// Build a ratio, reducing it to lowest terms.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, RatioError> {
        if denominator == 0 {
            return Err(RatioError::ZeroDenominator);
        }
        if numerator == 0 {
            return Err(RatioError::ZeroNumerator);
        }
        let (numerator, denominator) = simplify(numerator, denominator);
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// The multiplier as a float.
    pub fn value(&self) -> f32 {
        self.numerator as f32 / self.denominator as f32
    }

    /// Audible frequency for this ratio over `base_freq`.
    ///
    /// Computed as `base * n / d` so evenly dividing inputs are exact.
    pub fn frequency(&self, base_freq: f32) -> f32 {
        base_freq * self.numerator as f32 / self.denominator as f32
    }

    /// One octave up: the numerator doubles, then the ratio is reduced.
    ///
    /// Saturates instead of overflowing for absurdly large numerators.
    pub fn octave_up(&self) -> Self {
        self.rescaled(self.numerator.saturating_mul(2), self.denominator)
    }

    /// One octave down: the denominator doubles, then the ratio is reduced.
    pub fn octave_down(&self) -> Self {
        self.rescaled(self.numerator, self.denominator.saturating_mul(2))
    }

    fn rescaled(&self, numerator: u32, denominator: u32) -> Self {
        let (numerator, denominator) = simplify(numerator, denominator);
        Self {
            numerator,
            denominator,
        }
    }
}

/// Wire form of a [`Ratio`]; deserializing goes back through [`Ratio::new`].
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RatioFields {
    numerator: u32,
    denominator: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RatioFields> for Ratio {
    type Error = RatioError;

    fn try_from(fields: RatioFields) -> Result<Self, Self::Error> {
        Ratio::new(fields.numerator, fields.denominator)
    }
}

#[cfg(feature = "serde")]
impl From<Ratio> for RatioFields {
    fn from(ratio: Ratio) -> Self {
        Self {
            numerator: ratio.numerator,
            denominator: ratio.denominator,
        }
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::UNISON
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Ratio {
    type Err = RatioError;

    /// Parse `"n/d"`, or a bare `"n"` meaning `n/1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RatioError::Empty);
        }

        let (numerator, denominator) = match s.split_once('/') {
            Some((n, d)) => (n.trim(), d.trim()),
            None => (s, "1"),
        };

        let parse = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| RatioError::NotANumber(part.to_string()))
        };

        Ratio::new(parse(numerator)?, parse(denominator)?)
    }
}

/// Frequency of a textual ratio over `base_freq`.
pub fn frequency(ratio: &str, base_freq: f32) -> Result<f32, RatioError> {
    Ok(ratio.parse::<Ratio>()?.frequency(base_freq))
}
