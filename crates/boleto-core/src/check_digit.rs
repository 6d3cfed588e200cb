//! Check-digit (DV) routines used by boleto barcodes and own-numbers.
//!
//! The modulo-11 family multiplies each digit, right to left, by a cyclic
//! weight and reduces the sum modulo 11. Banks differ in the weight cycle and
//! in how the remainder becomes a digit, so both are carried in a [`Modulo11`]
//! record instead of loose flags.

use crate::error::{BoletoError, Result};

/// Weight progression of a modulo-11 sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightCycle {
    /// Weight applied to the rightmost digit.
    pub start: u32,
    /// Largest weight before the cycle resets.
    pub max: u32,
    /// Weight used after `max` is exceeded.
    pub reset: u32,
}

impl WeightCycle {
    /// Weights 2, 3, ..., 9, 2, 3, ...
    pub const STANDARD: Self = Self {
        start: 2,
        max: 9,
        reset: 2,
    };

    pub const fn new(start: u32, max: u32, reset: u32) -> Self {
        Self { start, max, reset }
    }

    fn next(self, weight: u32) -> u32 {
        let next = weight.saturating_add(1);
        if next > self.max {
            self.reset
        } else {
            next
        }
    }
}

impl Default for WeightCycle {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// How the weighted sum becomes a check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remainder {
    /// Return `sum % 11` untouched; the caller maps it.
    Raw,
    /// `(sum * 10) % 11`, with 10 replaced by `ten_override`, then 0 or
    /// anything above 9 forced to 1.
    Mapped { ten_override: u32 },
}

/// Parameters of a modulo-11 computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modulo11 {
    pub weights: WeightCycle,
    pub remainder: Remainder,
}

impl Modulo11 {
    /// General barcode DV: weights 2..9, remainder 10 folded into 1.
    pub const BARCODE: Self = Self {
        weights: WeightCycle::STANDARD,
        remainder: Remainder::Mapped { ten_override: 0 },
    };

    /// Weights 2..9 returning the raw remainder.
    pub const RAW: Self = Self {
        weights: WeightCycle::STANDARD,
        remainder: Remainder::Raw,
    };

    pub const fn new(weights: WeightCycle, remainder: Remainder) -> Self {
        Self { weights, remainder }
    }
}

impl Default for Modulo11 {
    fn default() -> Self {
        Self::BARCODE
    }
}

/// Seam for check-digit computation, so callers can substitute the engine.
pub trait CheckDigitEngine: Send + Sync {
    /// Run the modulo-11 routine over `digits` with the given parameters.
    fn modulo11(&self, digits: &str, params: Modulo11) -> Result<u32>;
}

/// Engine backed by [`modulo11`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardEngine;

impl CheckDigitEngine for StandardEngine {
    fn modulo11(&self, digits: &str, params: Modulo11) -> Result<u32> {
        modulo11(digits, params)
    }
}

fn digit_values(digits: &str) -> Result<Vec<u32>> {
    digits
        .chars()
        .enumerate()
        .map(|(position, c)| {
            c.to_digit(10).ok_or_else(|| BoletoError::InvalidDigit {
                input: digits.to_string(),
                position,
                found: c,
            })
        })
        .collect()
}

/// Weighted sum of `digits`, right to left, under `weights`.
pub fn weighted_sum(digits: &str, weights: WeightCycle) -> Result<u64> {
    let values = digit_values(digits)?;

    let mut weight = weights.start;
    let mut sum: u64 = 0;
    for value in values.iter().rev() {
        sum += u64::from(*value) * u64::from(weight);
        weight = weights.next(weight);
    }

    Ok(sum)
}

/// Modulo-11 check digit.
///
/// ```
/// use boleto_core::check_digit::{modulo11, Modulo11};
///
/// assert_eq!(modulo11("0000000123", Modulo11::BARCODE).unwrap(), 6);
/// ```
pub fn modulo11(digits: &str, params: Modulo11) -> Result<u32> {
    let sum = weighted_sum(digits, params.weights)?;

    let digit = match params.remainder {
        Remainder::Raw => (sum % 11) as u32,
        Remainder::Mapped { ten_override } => {
            let mut digit = ((sum * 10) % 11) as u32;
            if digit == 10 {
                digit = ten_override;
            }
            if digit == 0 || digit > 9 {
                digit = 1;
            }
            digit
        }
    };

    Ok(digit)
}

/// Modulo-10 check digit of a digitable-line field.
///
/// Weights alternate 2, 1 from the right; two-digit products contribute the
/// sum of their digits.
pub fn modulo10(digits: &str) -> Result<u32> {
    let values = digit_values(digits)?;

    let sum: u32 = values
        .iter()
        .rev()
        .zip([2u32, 1].into_iter().cycle())
        .map(|(value, weight)| {
            let product = value * weight;
            if product > 9 { product - 9 } else { product }
        })
        .sum();

    Ok((10 - sum % 10) % 10)
}

/// Own-number DV of Sisprime slips.
///
/// Computed over agency(4) + account(5) + wallet(3) + number(10) with weights
/// 2..9. Remainders 0 and 1 yield 0, anything else `11 - remainder`.
pub fn sisprime_own_number_dv(
    agency: &str,
    account: &str,
    wallet: &str,
    number: &str,
) -> Result<u32> {
    let input = format!("{agency}{account}{wallet}{number}");
    let remainder = (weighted_sum(&input, WeightCycle::STANDARD)? % 11) as u32;

    Ok(if remainder < 2 { 0 } else { 11 - remainder })
}
