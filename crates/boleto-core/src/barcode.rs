//! Digitable line rendering and barcode decomposition.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::trace;

use crate::bank::expect_len;
use crate::check_digit::{StandardEngine, modulo10};
use crate::error::{BoletoError, FormatError, Result};
use crate::format::{amount_cents, format_fixed_width, mask_pattern};
use crate::models::document::ParsedFreeField;
use crate::registry::Bank;

/// Digits in a barcode.
pub const BARCODE_LEN: usize = 44;

/// Digits in a digitable line.
pub const DIGITABLE_LINE_LEN: usize = 47;

const DIGITABLE_LINE_MASK: &str = "#####.##### #####.###### #####.###### # ##############";

fn check_digits(what: &'static str, value: &str, len: usize) -> Result<()> {
    expect_len(what, value, len)?;
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::NotNumeric {
            value: value.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Render a 44-digit barcode as its digitable line.
///
/// The first three fields each get a modulo-10 DV; the barcode DV and the
/// factor/amount block follow unchanged.
pub fn digitable_line(barcode: &str) -> Result<String> {
    check_digits("barcode", barcode, BARCODE_LEN)?;

    let field1 = format!("{}{}", &barcode[0..4], &barcode[19..24]);
    let field2 = &barcode[24..34];
    let field3 = &barcode[34..44];

    let raw = format!(
        "{field1}{}{field2}{}{field3}{}{}{}",
        modulo10(&field1)?,
        modulo10(field2)?,
        modulo10(field3)?,
        &barcode[4..5],
        &barcode[5..19],
    );

    Ok(mask_pattern(&raw, DIGITABLE_LINE_MASK)?)
}

/// Rebuild the barcode behind a digitable line, checking the field DVs.
///
/// Dots and whitespace are ignored.
pub fn barcode_from_digitable_line(line: &str) -> Result<String> {
    let digits = strip_separators(line);
    check_digits("digitable line", &digits, DIGITABLE_LINE_LEN)?;

    for (what, start) in [("field 1", 0), ("field 2", 10), ("field 3", 21)] {
        let len = if start == 0 { 9 } else { 10 };
        let field = &digits[start..start + len];
        let found = u32::from(digits.as_bytes()[start + len] - b'0');
        let expected = modulo10(field)?;
        if found != expected {
            return Err(BoletoError::CheckDigitMismatch {
                what,
                expected,
                found,
            });
        }
    }

    Ok(format!(
        "{}{}{}{}{}{}",
        &digits[0..4],
        &digits[32..33],
        &digits[33..47],
        &digits[4..9],
        &digits[10..20],
        &digits[21..31],
    ))
}

fn strip_separators(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect()
}

/// Positional parts of a barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarcodeParts {
    pub bank_code: String,
    pub currency: String,
    pub check_digit: u32,
    pub due_date_factor: String,
    pub amount: Decimal,
    pub free_field: String,
}

impl BarcodeParts {
    /// Split a 44-digit barcode or a 47-digit digitable line.
    pub fn parse(input: &str) -> Result<Self> {
        let digits = strip_separators(input);
        let barcode = match digits.chars().count() {
            DIGITABLE_LINE_LEN => barcode_from_digitable_line(&digits)?,
            _ => digits,
        };
        check_digits("barcode", &barcode, BARCODE_LEN)?;

        let cents = barcode[9..19]
            .bytes()
            .fold(0i64, |acc, b| acc * 10 + i64::from(b - b'0'));

        trace!("Split barcode {}", barcode);
        Ok(Self {
            bank_code: barcode[0..3].to_string(),
            currency: barcode[3..4].to_string(),
            check_digit: u32::from(barcode.as_bytes()[4] - b'0'),
            due_date_factor: barcode[5..9].to_string(),
            amount: Decimal::new(cents, 2),
            free_field: barcode[19..44].to_string(),
        })
    }

    /// Reassemble the 44-digit barcode.
    pub fn barcode(&self) -> Result<String> {
        Ok(format!(
            "{}{}{}{}{}",
            &self.bank_code,
            &self.currency,
            self.check_digit,
            &self.due_date_factor,
            self.digits_after_factor()?,
        ))
    }

    fn digits_after_factor(&self) -> Result<String> {
        let cents = format_fixed_width(amount_cents(self.amount)?, 10)?;
        Ok(format!("{cents}{}", self.free_field))
    }

    /// Bank identified by the bank code.
    pub fn bank(&self) -> Result<Bank> {
        Bank::from_code(&self.bank_code)
    }

    /// Recompute the barcode DV with the bank's codec and compare.
    pub fn verify(&self) -> Result<Bank> {
        let bank = self.bank()?;
        let digits = format!(
            "{}{}{}{}",
            &self.bank_code,
            &self.currency,
            &self.due_date_factor,
            self.digits_after_factor()?,
        );
        let expected = bank.codec().barcode_check_digit(&digits, &StandardEngine)?;
        if expected != self.check_digit {
            return Err(BoletoError::CheckDigitMismatch {
                what: "barcode",
                expected,
                found: self.check_digit,
            });
        }
        Ok(bank)
    }

    /// Split the free field with the bank's layout.
    pub fn parse_free_field(&self) -> Result<ParsedFreeField> {
        self.bank()?.codec().parse_free_field(&self.free_field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BS2_BARCODE: &str = "21893971200000150750010001234567000000001238";
    const BS2_LINE: &str = "21890.01007 01234.567004 00000.012385 3 97120000015075";
    const EFI_BARCODE: &str = "36496000000000150751306901123456700045675001";
    const EFI_LINE: &str = "36491.30691 01123.456707 00456.750017 6 00000000015075";

    #[test]
    fn test_digitable_line() {
        assert_eq!(digitable_line(BS2_BARCODE).unwrap(), BS2_LINE);
        assert_eq!(digitable_line(EFI_BARCODE).unwrap(), EFI_LINE);
    }

    #[test]
    fn test_digitable_line_rejects_short_barcode() {
        assert!(matches!(
            digitable_line("2189"),
            Err(BoletoError::Format(FormatError::Length { found: 4, .. }))
        ));
    }

    #[test]
    fn test_barcode_from_digitable_line() {
        assert_eq!(barcode_from_digitable_line(BS2_LINE).unwrap(), BS2_BARCODE);
        assert_eq!(barcode_from_digitable_line(EFI_LINE).unwrap(), EFI_BARCODE);
    }

    #[test]
    fn test_digitable_line_field_dv_mismatch() {
        let tampered = BS2_LINE.replacen("01234.567004", "01234.567005", 1);
        assert!(matches!(
            barcode_from_digitable_line(&tampered),
            Err(BoletoError::CheckDigitMismatch { what: "field 2", expected: 4, found: 5 })
        ));
    }

    #[test]
    fn test_parse_barcode() {
        let parts = BarcodeParts::parse(BS2_BARCODE).unwrap();

        assert_eq!(parts.bank_code, "218");
        assert_eq!(parts.currency, "9");
        assert_eq!(parts.check_digit, 3);
        assert_eq!(parts.due_date_factor, "9712");
        assert_eq!(parts.amount, Decimal::new(15075, 2));
        assert_eq!(parts.free_field, "0010001234567000000001238");
        assert_eq!(parts.barcode().unwrap(), BS2_BARCODE);
        assert_eq!(parts.verify().unwrap(), Bank::Bs2);
    }

    #[test]
    fn test_parse_digitable_line() {
        let parts = BarcodeParts::parse(EFI_LINE).unwrap();
        assert_eq!(parts.barcode().unwrap(), EFI_BARCODE);
        assert_eq!(parts.verify().unwrap(), Bank::Efi);
        assert_eq!(
            parts.parse_free_field().unwrap().agreement.as_deref(),
            Some("1234567")
        );
    }

    #[test]
    fn test_verify_detects_wrong_dv() {
        let mut tampered = BS2_BARCODE.to_string();
        tampered.replace_range(4..5, "2");
        let parts = BarcodeParts::parse(&tampered).unwrap();

        assert!(matches!(
            parts.verify(),
            Err(BoletoError::CheckDigitMismatch { what: "barcode", expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert!(BarcodeParts::parse("2189197120000015075001000123456700000001236X").is_err());
    }
}
