//! Sisprime (084).
//!
//! Own-number: wallet(3) + number(10) + DV, the DV depending on agency,
//! account, wallet and number. Free field: agency(4) + account with DV (10)
//! + number(10) + DV(1); the wallet prefix of the own-number stays out of the
//! barcode.

use super::{BankCodec, check_free_field, expect_len, require, slice};
use crate::check_digit::{CheckDigitEngine, sisprime_own_number_dv};
use crate::error::Result;
use crate::format::format_fixed_width;
use crate::models::document::{Document, Field, ParsedFreeField};
use crate::registry::Bank;

const OWN_NUMBER_LEN: usize = 14;
const WALLET_LEN: usize = 3;

/// Sisprime codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sisprime;

impl BankCodec for Sisprime {
    fn bank(&self) -> Bank {
        Bank::Sisprime
    }

    fn wallets(&self) -> &'static [&'static str] {
        &["009"]
    }

    fn own_number(&self, doc: &Document, _engine: &dyn CheckDigitEngine) -> Result<String> {
        let number = format_fixed_width(require(doc.number.as_deref(), Field::Number)?, 10)?;
        let wallet = format_fixed_width(require(doc.wallet.as_deref(), Field::Wallet)?, WALLET_LEN)?;
        let agency = format_fixed_width(require(doc.agency.as_deref(), Field::Agency)?, 4)?;
        let account = format_fixed_width(require(doc.account.as_deref(), Field::Account)?, 5)?;

        let dv = sisprime_own_number_dv(&agency, &account, &wallet, &number)?;
        Ok(format!("{wallet}{number}{dv}"))
    }

    fn own_number_mask(&self) -> Option<&'static str> {
        Some("###/##########-#")
    }

    fn free_field(
        &self,
        doc: &Document,
        own_number: &str,
        _engine: &dyn CheckDigitEngine,
    ) -> Result<String> {
        expect_len("own-number", own_number, OWN_NUMBER_LEN)?;

        let agency = format_fixed_width(require(doc.agency.as_deref(), Field::Agency)?, 4)?;
        let account = require(doc.account.as_deref(), Field::Account)?;
        let account_dv = doc.account_dv.as_deref().map(str::trim).unwrap_or("");
        let account = format_fixed_width(format!("{account}{account_dv}"), 10)?;

        let number: String = own_number.chars().skip(WALLET_LEN).collect();
        Ok(format!("{agency}{account}{number}"))
    }

    fn parse_free_field(&self, free_field: &str) -> Result<ParsedFreeField> {
        check_free_field(free_field)?;

        // Wallet, agreement and the separate account DV are not encoded.
        Ok(ParsedFreeField {
            agency: slice(free_field, 0, 4),
            account: slice(free_field, 4, 10),
            own_number: slice(free_field, 14, 10),
            own_number_dv: slice(free_field, 24, 1),
            own_number_full: slice(free_field, 14, 11),
            ..ParsedFreeField::default()
        })
    }
}
