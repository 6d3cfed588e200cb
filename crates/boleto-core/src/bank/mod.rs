//! Per-bank free-field codecs.
//!
//! Every supported bank lays out the 25-digit free field (campo livre) its own
//! way and derives the own-number (nosso número) with its own DV rule. Each
//! bank is a stateless [`BankCodec`] strategy; per-document state lives in
//! [`crate::Boleto`].

pub mod bs2;
pub mod efi;
pub mod sisprime;

pub use bs2::Bs2;
pub use efi::Efi;
pub use sisprime::Sisprime;

use std::fmt;

use crate::check_digit::{CheckDigitEngine, Modulo11};
use crate::error::{BoletoError, FormatError, Result};
use crate::format::{due_date_factor, format_fixed_width};
use crate::models::document::{Document, Field, ParsedFreeField};
use crate::registry::Bank;

/// Width of the free field.
pub const FREE_FIELD_LEN: usize = 25;

/// Fields every bank needs before a barcode can be produced.
pub const COMMON_FIELDS: &[Field] = &[
    Field::Number,
    Field::Agency,
    Field::Account,
    Field::Wallet,
    Field::DueDate,
    Field::Amount,
];

/// Bank-specific encoding strategy.
pub trait BankCodec: Send + Sync + fmt::Debug {
    /// Bank this codec encodes for.
    fn bank(&self) -> Bank;

    /// Wallet codes the bank accepts.
    fn wallets(&self) -> &'static [&'static str];

    /// Document fields that must be set before a barcode is produced.
    fn required_fields(&self) -> &'static [Field] {
        COMMON_FIELDS
    }

    /// Derive the own-number from the document.
    fn own_number(&self, doc: &Document, engine: &dyn CheckDigitEngine) -> Result<String>;

    /// Display mask for the own-number, `#` standing for a digit.
    fn own_number_mask(&self) -> Option<&'static str>;

    /// Assemble the 25-digit free field around an already computed own-number.
    fn free_field(
        &self,
        doc: &Document,
        own_number: &str,
        engine: &dyn CheckDigitEngine,
    ) -> Result<String>;

    /// Split a free field into its components.
    fn parse_free_field(&self, free_field: &str) -> Result<ParsedFreeField>;

    /// Four-digit due-date factor placed in the barcode.
    fn due_date_factor(&self, doc: &Document) -> Result<String> {
        let due_date = doc
            .due_date
            .ok_or_else(|| BoletoError::MissingField(vec![Field::DueDate.name().to_string()]))?;
        Ok(format_fixed_width(due_date_factor(due_date), 4)?)
    }

    /// General barcode DV over the 43 digits surrounding it.
    fn barcode_check_digit(&self, digits: &str, engine: &dyn CheckDigitEngine) -> Result<u32> {
        engine.modulo11(digits, Modulo11::BARCODE)
    }
}

/// Value of a required document field, or `MissingField` naming it.
pub(crate) fn require(value: Option<&str>, field: Field) -> Result<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BoletoError::MissingField(vec![field.name().to_string()]))
}

/// Fail unless `value` has exactly `expected` characters.
pub(crate) fn expect_len(what: &'static str, value: &str, expected: usize) -> Result<()> {
    let found = value.chars().count();
    if found != expected {
        return Err(FormatError::Length {
            what,
            expected,
            found,
        }
        .into());
    }
    Ok(())
}

/// Check that a free field is 25 ASCII digits.
pub(crate) fn check_free_field(free_field: &str) -> Result<()> {
    expect_len("free field", free_field, FREE_FIELD_LEN)?;
    if !free_field.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormatError::NotNumeric {
            value: free_field.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Positional slice of a validated free field.
pub(crate) fn slice(free_field: &str, start: usize, len: usize) -> Option<String> {
    free_field.get(start..start + len).map(str::to_string)
}

/// Whether `wallet` is one of `accepted`, ignoring leading zeros.
pub(crate) fn wallet_accepted(wallet: &str, accepted: &[&str]) -> bool {
    let normalize = |w: &str| w.trim().trim_start_matches('0').to_string();
    let wallet = normalize(wallet);
    accepted.iter().any(|a| normalize(a) == wallet)
}
