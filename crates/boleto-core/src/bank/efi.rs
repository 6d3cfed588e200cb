//! Efí (364).
//!
//! The own-number is assigned externally and used verbatim. The free field is
//! wallet(1) + agency(4) + modality(2) + agreement(7) + own-number(7) + DV(1)
//! + installment(3), and the barcode always carries due-date factor `0000`.

use super::{BankCodec, check_free_field, require, slice};
use crate::check_digit::{CheckDigitEngine, Modulo11};
use crate::error::Result;
use crate::format::format_fixed_width;
use crate::models::document::{Document, Field, ParsedFreeField};
use crate::registry::Bank;

/// Own-number DV parameters; the raw remainder is mapped by [`own_number_dv`].
pub const OWN_NUMBER_DV: Modulo11 = Modulo11::RAW;

const FIXED_FACTOR: &str = "0000";
const DEFAULT_INSTALLMENT: u16 = 1;

/// Efí codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct Efi;

impl Efi {
    /// Agency / beneficiary code as printed on the slip: `AGENCIA/ CONVENIO(9)`.
    pub fn agency_beneficiary_code(doc: &Document) -> Result<String> {
        let agency = require(doc.agency.as_deref(), Field::Agency)?;
        let agreement = format_fixed_width(require(doc.agreement.as_deref(), Field::Agreement)?, 9)?;
        Ok(format!("{agency}/ {agreement}"))
    }
}

/// DV of the 7-digit own-number: remainders 0 and 1 give 1, others `11 - r`.
pub fn own_number_dv(number: &str, engine: &dyn CheckDigitEngine) -> Result<u32> {
    let remainder = engine.modulo11(number, OWN_NUMBER_DV)?;
    Ok(if remainder < 2 { 1 } else { 11 - remainder })
}

const REQUIRED_FIELDS: &[Field] = &[
    Field::Number,
    Field::Agency,
    Field::Account,
    Field::Wallet,
    Field::DueDate,
    Field::Amount,
    Field::Agreement,
];

impl BankCodec for Efi {
    fn bank(&self) -> Bank {
        Bank::Efi
    }

    fn wallets(&self) -> &'static [&'static str] {
        &["01"]
    }

    fn required_fields(&self) -> &'static [Field] {
        REQUIRED_FIELDS
    }

    fn own_number(&self, doc: &Document, _engine: &dyn CheckDigitEngine) -> Result<String> {
        Ok(require(doc.number.as_deref(), Field::Number)?.to_string())
    }

    fn own_number_mask(&self) -> Option<&'static str> {
        None
    }

    fn free_field(
        &self,
        doc: &Document,
        own_number: &str,
        engine: &dyn CheckDigitEngine,
    ) -> Result<String> {
        let wallet_code = require(doc.wallet.as_deref(), Field::Wallet)?;
        let wallet = format_fixed_width(wallet_code, 1)?;
        let agency = format_fixed_width(require(doc.agency.as_deref(), Field::Agency)?, 4)?;
        let modality = format_fixed_width(doc.modality.as_deref().unwrap_or(wallet_code), 2)?;
        let agreement = format_fixed_width(require(doc.agreement.as_deref(), Field::Agreement)?, 7)?;
        let number = format_fixed_width(own_number, 7)?;
        let dv = own_number_dv(&number, engine)?;
        let installment =
            format_fixed_width(doc.installment.unwrap_or(DEFAULT_INSTALLMENT), 3)?;

        Ok(format!(
            "{wallet}{agency}{modality}{agreement}{number}{dv}{installment}"
        ))
    }

    fn parse_free_field(&self, free_field: &str) -> Result<ParsedFreeField> {
        check_free_field(free_field)?;

        Ok(ParsedFreeField {
            wallet: slice(free_field, 0, 1),
            agency: slice(free_field, 1, 4),
            modality: slice(free_field, 5, 2),
            agreement: slice(free_field, 7, 7),
            own_number: slice(free_field, 14, 7),
            own_number_dv: slice(free_field, 21, 1),
            own_number_full: slice(free_field, 14, 8),
            installment: slice(free_field, 22, 3),
            ..ParsedFreeField::default()
        })
    }

    fn due_date_factor(&self, _doc: &Document) -> Result<String> {
        Ok(FIXED_FACTOR.to_string())
    }
}
