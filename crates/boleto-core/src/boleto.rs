//! Per-document codec instance with memoized derived values.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use crate::bank::{BankCodec, expect_len, wallet_accepted};
use crate::barcode;
use crate::check_digit::{CheckDigitEngine, StandardEngine};
use crate::error::{BoletoError, Result};
use crate::format::{amount_cents, format_fixed_width, mask_pattern};
use crate::models::document::{Document, Field, ParsedFreeField};

/// Length of the barcode without its check digit.
const DIGITS_WITHOUT_DV: usize = 43;

/// Write-once cell whose initializer runs at most once, even under
/// concurrent first access. A failed initialization leaves it empty.
#[derive(Debug, Default)]
struct Memo {
    value: OnceLock<String>,
    init: Mutex<()>,
}

impl Memo {
    fn seeded(value: String) -> Self {
        let memo = Self::default();
        let _ = memo.value.set(value);
        memo
    }

    fn get(&self) -> Option<&str> {
        self.value.get().map(String::as_str)
    }

    fn get_or_try_init(&self, init: impl FnOnce() -> Result<String>) -> Result<&str> {
        if let Some(value) = self.get() {
            return Ok(value);
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = self.get() {
            return Ok(value);
        }

        let computed = init()?;
        Ok(self.value.get_or_init(|| computed).as_str())
    }
}

/// A document bound to its bank codec.
///
/// Own-number, free field and barcode are computed on first access and
/// cached for the lifetime of the instance. The document cannot be changed
/// after construction; build a new instance for corrected data.
pub struct Boleto {
    document: Document,
    codec: &'static dyn BankCodec,
    engine: Arc<dyn CheckDigitEngine>,
    own_number: Memo,
    free_field: Memo,
    barcode: Memo,
}

impl Boleto {
    /// Bind `document` to the codec of its bank.
    pub fn new(document: Document) -> Self {
        Self::with_engine(document, Arc::new(StandardEngine))
    }

    /// Bind `document` using a specific check-digit engine.
    pub fn with_engine(document: Document, engine: Arc<dyn CheckDigitEngine>) -> Self {
        let codec = document.bank.codec();
        Self {
            document,
            codec,
            engine,
            own_number: Memo::default(),
            free_field: Memo::default(),
            barcode: Memo::default(),
        }
    }

    /// Use an externally supplied free field verbatim.
    pub fn with_free_field(mut self, free_field: impl Into<String>) -> Self {
        self.free_field = Memo::seeded(free_field.into());
        self
    }

    /// Use an externally supplied barcode verbatim.
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Memo::seeded(barcode.into());
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn codec(&self) -> &'static dyn BankCodec {
        self.codec
    }

    /// Check the bank's required fields and wallet.
    ///
    /// On failure returns one message per problem; missing fields are
    /// reported by name.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut messages = self.document.missing_fields(self.codec.required_fields());

        if let Some(wallet) = self.document.wallet.as_deref().filter(|w| !w.trim().is_empty()) {
            let accepted = self.codec.wallets();
            if !wallet_accepted(wallet, accepted) {
                messages.push(format!(
                    "wallet {} is not accepted by {} (expected one of {})",
                    wallet.trim(),
                    self.codec.bank().name(),
                    accepted.join(", ")
                ));
            }
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(messages)
        }
    }

    /// Own-number (nosso número).
    pub fn own_number(&self) -> Result<&str> {
        self.own_number.get_or_try_init(|| {
            let own_number = self.codec.own_number(&self.document, self.engine.as_ref())?;
            debug!("Computed own-number {} for bank {}", own_number, self.document.bank);
            Ok(own_number)
        })
    }

    /// Own-number with the bank's display mask applied.
    pub fn own_number_for_display(&self) -> Result<String> {
        let own_number = self.own_number()?;
        match self.codec.own_number_mask() {
            Some(mask) => Ok(mask_pattern(own_number, mask)?),
            None => Ok(own_number.to_string()),
        }
    }

    /// 25-digit free field (campo livre).
    pub fn free_field(&self) -> Result<&str> {
        self.free_field.get_or_try_init(|| {
            let own_number = self.own_number()?;
            let free_field =
                self.codec
                    .free_field(&self.document, own_number, self.engine.as_ref())?;
            expect_len("free field", &free_field, crate::bank::FREE_FIELD_LEN)?;
            debug!("Computed free field {} for bank {}", free_field, self.document.bank);
            Ok(free_field)
        })
    }

    /// Split a free field with this bank's layout.
    pub fn parse_free_field(&self, free_field: &str) -> Result<ParsedFreeField> {
        self.codec.parse_free_field(free_field)
    }

    /// 44-digit barcode.
    pub fn barcode(&self) -> Result<&str> {
        self.barcode.get_or_try_init(|| {
            self.validate().map_err(BoletoError::MissingField)?;

            let bank = format_fixed_width(self.document.bank.code(), 3)?;
            let currency = format_fixed_width(self.document.currency(), 1)?;
            let factor = self.codec.due_date_factor(&self.document)?;
            let amount = self
                .document
                .amount
                .ok_or_else(|| BoletoError::MissingField(vec![Field::Amount.name().to_string()]))?;
            let amount = format_fixed_width(amount_cents(amount)?, 10)?;
            let free_field = self.free_field()?;

            let digits = format!("{bank}{currency}{factor}{amount}{free_field}");
            expect_len("barcode without check digit", &digits, DIGITS_WITHOUT_DV)?;

            let dv = self.codec.barcode_check_digit(&digits, self.engine.as_ref())?;
            let barcode = format!("{}{}{}", &digits[..4], dv, &digits[4..]);
            debug!("Computed barcode {} for bank {}", barcode, self.document.bank);
            Ok(barcode)
        })
    }

    /// 47-digit digitable line (linha digitável) of the barcode.
    pub fn digitable_line(&self) -> Result<String> {
        barcode::digitable_line(self.barcode()?)
    }
}

impl std::fmt::Debug for Boleto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Boleto")
            .field("document", &self.document)
            .field("codec", &self.codec)
            .field("barcode", &self.barcode.get())
            .finish_non_exhaustive()
    }
}
