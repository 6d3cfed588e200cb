//! Boleto document fields and the parsed free-field record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::DocumentDefaults;
use crate::registry::Bank;

/// Currency code of the Brazilian real.
pub const CURRENCY_REAL: &str = "9";

/// Caller-supplied data a barcode is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Issuing bank.
    #[serde(alias = "banco")]
    pub bank: Bank,

    /// Currency code (9 = real).
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "moeda")]
    pub currency: Option<String>,

    /// Due date.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "data_vencimento")]
    pub due_date: Option<NaiveDate>,

    /// Amount in reais, at most two decimal places.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "valor")]
    pub amount: Option<Decimal>,

    /// Agency (agência).
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "agencia")]
    pub agency: Option<String>,

    /// Account number (conta).
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "conta")]
    pub account: Option<String>,

    /// Account check digit.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "conta_dv")]
    pub account_dv: Option<String>,

    /// Wallet / portfolio code (carteira).
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "carteira")]
    pub wallet: Option<String>,

    /// Sequential document number the own-number is derived from.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "numero")]
    pub number: Option<String>,

    /// Agreement code (convênio) assigned by the bank.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "convenio")]
    pub agreement: Option<String>,

    /// Collection modality.
    ///
    /// Banks that encode it use the wallet code when it is unset. The wallet
    /// is formatted to the modality width, so leading zeros are dropped and
    /// `"001"` becomes `"01"`.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "modalidade")]
    pub modality: Option<String>,

    /// Installment (parcela) number.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "parcela")]
    pub installment: Option<u16>,
}

/// Document fields a bank may require before producing a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DueDate,
    Amount,
    Agency,
    Account,
    Wallet,
    Number,
    Agreement,
}

impl Field {
    /// Field name as used in documents and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Field::DueDate => "due_date",
            Field::Amount => "amount",
            Field::Agency => "agency",
            Field::Account => "account",
            Field::Wallet => "wallet",
            Field::Number => "number",
            Field::Agreement => "agreement",
        }
    }
}

impl Document {
    /// Create an empty document for `bank`.
    pub fn new(bank: Bank) -> Self {
        Self {
            bank,
            currency: None,
            due_date: None,
            amount: None,
            agency: None,
            account: None,
            account_dv: None,
            wallet: None,
            number: None,
            agreement: None,
            modality: None,
            installment: None,
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = Some(agency.into());
        self
    }

    /// Set the account and, optionally, its check digit.
    pub fn with_account(mut self, account: impl Into<String>, dv: Option<&str>) -> Self {
        self.account = Some(account.into());
        self.account_dv = dv.map(str::to_string);
        self
    }

    pub fn with_wallet(mut self, wallet: impl Into<String>) -> Self {
        self.wallet = Some(wallet.into());
        self
    }

    pub fn with_number(mut self, number: impl ToString) -> Self {
        self.number = Some(number.to_string());
        self
    }

    pub fn with_agreement(mut self, agreement: impl Into<String>) -> Self {
        self.agreement = Some(agreement.into());
        self
    }

    pub fn with_modality(mut self, modality: impl Into<String>) -> Self {
        self.modality = Some(modality.into());
        self
    }

    pub fn with_installment(mut self, installment: u16) -> Self {
        self.installment = Some(installment);
        self
    }

    /// Currency code, defaulting to the real.
    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(CURRENCY_REAL)
    }

    /// Fill fields the document left unset from configured defaults.
    pub fn apply_defaults(&mut self, defaults: &DocumentDefaults) {
        if self.currency.is_none() {
            self.currency = Some(defaults.currency.clone());
        }
        if self.installment.is_none() {
            self.installment = Some(defaults.installment);
        }
    }

    /// Names of the `required` fields that are unset or blank.
    pub fn missing_fields(&self, required: &[Field]) -> Vec<String> {
        required
            .iter()
            .filter(|field| !self.has(**field))
            .map(|field| field.name().to_string())
            .collect()
    }

    fn has(&self, field: Field) -> bool {
        fn present(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }

        match field {
            Field::DueDate => self.due_date.is_some(),
            Field::Amount => self.amount.is_some(),
            Field::Agency => present(&self.agency),
            Field::Account => present(&self.account),
            Field::Wallet => present(&self.wallet),
            Field::Number => present(&self.number),
            Field::Agreement => present(&self.agreement),
        }
    }
}

/// Components recovered from a free field.
///
/// Fields a bank's layout does not encode are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFreeField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_dv: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_dv: Option<String>,

    /// Own-number digits without the DV.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_number_dv: Option<String>,

    /// Own-number digits followed by the DV.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_number_full: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment: Option<String>,
}
