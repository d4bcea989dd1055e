//! Binary fractions in [0, 1).
//!
//! A [`Fraction`] is the mantissa of a value below one, most significant bit
//! first. Expansions are finite here; the resolver reads past the end as
//! zeros.

use std::fmt;

use crate::error::{Error, Result};

/// Longest expansion an `f64` below one can have (down to the smallest subnormal).
pub const F64_MAX_FRACTION_BITS: usize = 1074;

/// Validated binary expansion of a value in [0, 1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fraction {
    bits: Vec<bool>,
}

impl Fraction {
    /// Wrap an existing bit sequence.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Expand `value` into at most `precision_bits` bits.
    ///
    /// NaN, infinities and values outside [0, 1) are rejected rather than
    /// clamped. Expansion stops early once the remainder is exactly zero.
    pub fn from_f64(value: f64, precision_bits: usize) -> Result<Self> {
        if !value.is_finite() || !(0.0..1.0).contains(&value) {
            return Err(Error::InvalidFraction { value });
        }

        let limit = precision_bits.min(F64_MAX_FRACTION_BITS);
        let mut bits = Vec::with_capacity(limit.min(64));
        let mut rest = value;

        // Doubling and subtracting one are both exact in binary floating point.
        while rest > 0.0 && bits.len() < limit {
            rest *= 2.0;
            if rest >= 1.0 {
                bits.push(true);
                rest -= 1.0;
            } else {
                bits.push(false);
            }
        }

        Ok(Self { bits })
    }

    /// Parse a binary literal such as `0.0011`, `.0011`, `0011` or `0b0.0011`.
    ///
    /// Underscores are accepted as digit separators.
    pub fn from_binary_str(literal: &str) -> Result<Self> {
        let trimmed = literal.trim();
        let body = trimmed
            .strip_prefix("0b")
            .or_else(|| trimmed.strip_prefix("0B"))
            .unwrap_or(trimmed);

        let mantissa = match body.split_once('.') {
            Some((whole, frac)) if whole.is_empty() || whole.chars().all(|c| c == '0') => frac,
            Some((whole, _)) => {
                return Err(Error::InvalidBinaryLiteral(format!(
                    "'{literal}' has integer part '{whole}'; expected a value below one"
                )))
            }
            None => body,
        };

        let bits = mantissa
            .chars()
            .filter(|&c| c != '_')
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::InvalidBinaryLiteral(format!(
                    "'{literal}' contains non-binary digit '{other}'"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { bits })
    }

    #[inline]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Nearest `f64` to this expansion.
    pub fn to_f64(&self) -> f64 {
        let mut value = 0.0;
        let mut weight = 0.5;
        for &bit in self.bits.iter().take(F64_MAX_FRACTION_BITS) {
            if bit {
                value += weight;
            }
            weight *= 0.5;
        }
        value
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0.")?;
        if self.bits.is_empty() {
            return f.write_str("0");
        }
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
