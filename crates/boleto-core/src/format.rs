//! Fixed-width numeric formatting, display masks and the due-date factor.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::FormatError;

/// Base date of the due-date factor (factor 0).
pub const FACTOR_BASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1997, 10, 7) {
    Some(date) => date,
    None => panic!("invalid factor base date"),
};

/// Highest factor representable in four digits.
const FACTOR_MAX: i64 = 9999;

/// Factor value a new cycle restarts from once 9999 is exceeded.
const FACTOR_RESTART: i64 = 1000;

/// Left-pad a numeric value with zeros to exactly `width` characters.
///
/// Leading zeros of the input are not significant, so `"01"` fits a width of 1.
/// A value whose significant digits exceed `width` is rejected, never truncated.
pub fn format_fixed_width(value: impl ToString, width: usize) -> Result<String, FormatError> {
    let raw = value.to_string();
    let trimmed = raw.trim();

    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormatError::NotNumeric { value: raw });
    }

    let significant = trimmed.trim_start_matches('0');
    if significant.len() > width {
        return Err(FormatError::TooWide { value: raw, width });
    }

    Ok(format!("{:0>width$}", significant, width = width))
}

/// Apply a display mask where `#` stands for one character of `value`.
///
/// ```
/// use boleto_core::format::mask_pattern;
///
/// assert_eq!(mask_pattern("0000000123X", "##########-#").unwrap(), "0000000123-X");
/// ```
pub fn mask_pattern(value: &str, pattern: &str) -> Result<String, FormatError> {
    let expected = pattern.chars().filter(|&c| c == '#').count();
    let found = value.chars().count();

    if expected != found {
        return Err(FormatError::MaskMismatch {
            value: value.to_string(),
            pattern: pattern.to_string(),
            expected,
            found,
        });
    }

    let mut chars = value.chars();
    let masked = pattern
        .chars()
        .map(|p| match p {
            '#' => chars.next().unwrap_or('#'),
            literal => literal,
        })
        .collect();

    Ok(masked)
}

/// Compute the four-digit due-date factor for `date`.
///
/// The factor counts days since 1997-10-07. Once the count passes 9999
/// (2025-02-21) it restarts at 1000 and cycles every 9000 days, so 2025-02-22
/// is factor 1000 again. Dates before the base date map to 0, the factor used
/// by slips without a due date.
pub fn due_date_factor(date: NaiveDate) -> u16 {
    let days = (date - FACTOR_BASE_DATE).num_days();

    let factor = if days < 0 {
        0
    } else if days <= FACTOR_MAX {
        days
    } else {
        let cycle = FACTOR_MAX - FACTOR_RESTART + 1;
        (days - FACTOR_MAX - 1) % cycle + FACTOR_RESTART
    };

    factor as u16
}

/// Convert an amount in reais to an integer number of centavos.
pub fn amount_cents(amount: Decimal) -> Result<u64, FormatError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FormatError::NegativeAmount);
    }

    if amount.normalize().scale() > 2 {
        return Err(FormatError::AmountPrecision(amount.to_string()));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.trunc().to_u64())
        .ok_or_else(|| FormatError::TooWide {
            value: amount.to_string(),
            width: 10,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_fixed_width_pads() {
        assert_eq!(format_fixed_width(123, 10).unwrap(), "0000000123");
        assert_eq!(format_fixed_width("42", 4).unwrap(), "0042");
        assert_eq!(format_fixed_width("", 3).unwrap(), "000");
        assert_eq!(format_fixed_width("01", 1).unwrap(), "1");
    }

    #[test]
    fn test_format_fixed_width_rejects_overflow() {
        let err = format_fixed_width("12345", 4).unwrap_err();
        assert_eq!(
            err,
            FormatError::TooWide {
                value: "12345".to_string(),
                width: 4
            }
        );
    }

    #[test]
    fn test_format_fixed_width_rejects_non_numeric() {
        assert!(matches!(
            format_fixed_width("12-3", 6),
            Err(FormatError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_mask_pattern() {
        assert_eq!(mask_pattern("0000000123X", "##########-#").unwrap(), "0000000123-X");
        assert_eq!(
            mask_pattern("00900000001230", "###/##########-#").unwrap(),
            "009/0000000123-0"
        );
    }

    #[test]
    fn test_mask_pattern_length_mismatch() {
        let err = mask_pattern("0000000123", "##########-#").unwrap_err();
        assert_eq!(
            err,
            FormatError::MaskMismatch {
                value: "0000000123".to_string(),
                pattern: "##########-#".to_string(),
                expected: 11,
                found: 10,
            }
        );
    }

    #[test]
    fn test_due_date_factor_first_cycle() {
        assert_eq!(due_date_factor(date(1997, 10, 7)), 0);
        assert_eq!(due_date_factor(date(2000, 7, 3)), 1000);
        assert_eq!(due_date_factor(date(2025, 2, 21)), 9999);
    }

    #[test]
    fn test_due_date_factor_rollover() {
        assert_eq!(due_date_factor(date(2025, 2, 22)), 1000);
        assert_eq!(due_date_factor(date(2025, 2, 23)), 1001);
        // 9000 days after the first rollover the cycle restarts again
        let next = date(2025, 2, 22) + chrono::Duration::days(9000);
        assert_eq!(due_date_factor(next - chrono::Duration::days(1)), 9999);
        assert_eq!(due_date_factor(next), 1000);
    }

    #[test]
    fn test_due_date_factor_before_base() {
        assert_eq!(due_date_factor(date(1990, 1, 1)), 0);
    }

    #[test]
    fn test_amount_cents() {
        assert_eq!(amount_cents(Decimal::from_str("1234.56").unwrap()).unwrap(), 123456);
        assert_eq!(amount_cents(Decimal::from_str("10").unwrap()).unwrap(), 1000);
        assert_eq!(amount_cents(Decimal::from_str("0.10").unwrap()).unwrap(), 10);
        assert_eq!(amount_cents(Decimal::from_str("7.500").unwrap()).unwrap(), 750);
    }

    #[test]
    fn test_amount_cents_rejects_bad_values() {
        assert_eq!(
            amount_cents(Decimal::from_str("-1.00").unwrap()),
            Err(FormatError::NegativeAmount)
        );
        assert!(matches!(
            amount_cents(Decimal::from_str("1.005").unwrap()),
            Err(FormatError::AmountPrecision(_))
        ));
    }

    #[test]
    fn test_amount_cents_overflow_is_an_error() {
        assert_eq!(
            amount_cents(Decimal::MAX),
            Err(FormatError::TooWide {
                value: Decimal::MAX.to_string(),
                width: 10,
            })
        );
    }
}
