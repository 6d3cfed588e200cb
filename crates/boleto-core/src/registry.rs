//! Bank identifiers and codec selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bank::{BankCodec, Bs2, Efi, Sisprime};
use crate::error::{BoletoError, Result};
use crate::models::document::ParsedFreeField;

/// Supported banks, identified by their three-digit interbank code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Bank {
    /// Banco BS2 S.A.
    Bs2,
    /// Efí S.A.
    Efi,
    /// Sisprime do Brasil.
    Sisprime,
}

static BS2: Bs2 = Bs2;
static EFI: Efi = Efi;
static SISPRIME: Sisprime = Sisprime;

const SUPPORTED: &[Bank] = &[Bank::Sisprime, Bank::Bs2, Bank::Efi];

impl Bank {
    /// Three-digit bank code.
    pub fn code(self) -> &'static str {
        match self {
            Bank::Bs2 => "218",
            Bank::Efi => "364",
            Bank::Sisprime => "084",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Bank::Bs2 => "BS2",
            Bank::Efi => "Efí",
            Bank::Sisprime => "Sisprime",
        }
    }

    /// Look a bank up by its numeric code; leading zeros are optional.
    pub fn from_code(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        let number: u16 = trimmed
            .parse()
            .map_err(|_| BoletoError::UnsupportedBank(code.to_string()))?;

        match number {
            218 => Ok(Bank::Bs2),
            364 => Ok(Bank::Efi),
            84 => Ok(Bank::Sisprime),
            _ => Err(BoletoError::UnsupportedBank(code.to_string())),
        }
    }

    /// Codec implementing this bank's layout.
    pub fn codec(self) -> &'static dyn BankCodec {
        match self {
            Bank::Bs2 => &BS2,
            Bank::Efi => &EFI,
            Bank::Sisprime => &SISPRIME,
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Bank {
    type Err = BoletoError;

    /// Accepts a bank code ("218", "84") or a name ("bs2", "efi", "sisprime").
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bs2" => Ok(Bank::Bs2),
            "efi" | "efí" => Ok(Bank::Efi),
            "sisprime" => Ok(Bank::Sisprime),
            _ => Bank::from_code(s),
        }
    }
}

impl TryFrom<String> for Bank {
    type Error = BoletoError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Bank> for String {
    fn from(bank: Bank) -> Self {
        bank.code().to_string()
    }
}

/// Banks with a registered codec, ordered by code.
pub fn supported_banks() -> &'static [Bank] {
    SUPPORTED
}

/// Select the codec for a bank identifier.
pub fn codec_for(bank: &str) -> Result<&'static dyn BankCodec> {
    let bank: Bank = bank.parse()?;
    trace!("Selected {} codec", bank.name());
    Ok(bank.codec())
}

/// Parse a free field with the layout of the given bank.
pub fn parse_free_field(bank: &str, free_field: &str) -> Result<ParsedFreeField> {
    codec_for(bank)?.parse_free_field(free_field)
}
