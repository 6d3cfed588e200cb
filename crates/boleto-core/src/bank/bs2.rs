//! Banco BS2 (218).
//!
//! Own-number: number(10) + DV, DV by the barcode modulo-11 rule.
//! Free field: `001` + account(10) + number(11) + `8`. The own-number DV is
//! printed on the slip but never enters the barcode.

use super::{BankCodec, check_free_field, require, slice};
use crate::check_digit::{CheckDigitEngine, Modulo11};
use crate::error::Result;
use crate::format::format_fixed_width;
use crate::models::document::{Document, Field, ParsedFreeField};
use crate::registry::Bank;

const PREFIX: &str = "001";
const SUFFIX: &str = "8";
const NUMBER_LEN: usize = 11;

/// Own-number DV parameters.
pub const OWN_NUMBER_DV: Modulo11 = Modulo11::BARCODE;

/// BS2 codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bs2;

impl BankCodec for Bs2 {
    fn bank(&self) -> Bank {
        Bank::Bs2
    }

    fn wallets(&self) -> &'static [&'static str] {
        &["11", "12", "21", "41"]
    }

    fn own_number(&self, doc: &Document, engine: &dyn CheckDigitEngine) -> Result<String> {
        let number = format_fixed_width(require(doc.number.as_deref(), Field::Number)?, 10)?;
        let dv = engine.modulo11(&number, OWN_NUMBER_DV)?;
        Ok(format!("{number}{dv}"))
    }

    fn own_number_mask(&self) -> Option<&'static str> {
        Some("##########-#")
    }

    fn free_field(
        &self,
        doc: &Document,
        _own_number: &str,
        _engine: &dyn CheckDigitEngine,
    ) -> Result<String> {
        let account = format_fixed_width(require(doc.account.as_deref(), Field::Account)?, 10)?;
        let number = format_fixed_width(require(doc.number.as_deref(), Field::Number)?, NUMBER_LEN)?;

        Ok(format!("{PREFIX}{account}{number}{SUFFIX}"))
    }

    fn parse_free_field(&self, free_field: &str) -> Result<ParsedFreeField> {
        check_free_field(free_field)?;

        Ok(ParsedFreeField {
            account: slice(free_field, 3, 10),
            own_number: slice(free_field, 13, NUMBER_LEN),
            ..ParsedFreeField::default()
        })
    }
}
