//! Error types for the boleto-core library.

use thiserror::Error;

/// Main error type for the boleto library.
#[derive(Error, Debug)]
pub enum BoletoError {
    /// A value does not fit its fixed width or display mask.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Non-numeric input handed to a check-digit routine.
    #[error("invalid digit {found:?} at position {position} in {input:?}")]
    InvalidDigit {
        input: String,
        position: usize,
        found: char,
    },

    /// A check digit read from a barcode or digitable line is wrong.
    #[error("{what} check digit is {found}, expected {expected}")]
    CheckDigitMismatch {
        what: &'static str,
        expected: u32,
        found: u32,
    },

    /// Barcode requested before the bank's mandatory fields are populated.
    #[error("required fields missing: {}", .0.join(", "))]
    MissingField(Vec<String>),

    /// No codec is registered for the bank identifier.
    #[error("unsupported bank: {0}")]
    UnsupportedBank(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the fixed-width formatter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Value is wider than the field.
    #[error("value {value:?} does not fit in {width} digits")]
    TooWide { value: String, width: usize },

    /// Value is not made of ASCII digits.
    #[error("value {value:?} is not numeric")]
    NotNumeric { value: String },

    /// Value length does not match the number of `#` placeholders.
    #[error("value {value:?} has {found} characters but mask {pattern:?} expects {expected}")]
    MaskMismatch {
        value: String,
        pattern: String,
        expected: usize,
        found: usize,
    },

    /// Amounts must be non-negative.
    #[error("amount must not be negative")]
    NegativeAmount,

    /// Amounts carry at most two decimal places.
    #[error("amount {0} has more than two decimal places")]
    AmountPrecision(String),

    /// A fixed-length string has the wrong length.
    #[error("{what} must have {expected} characters, got {found}")]
    Length {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Result type for the boleto library.
pub type Result<T> = std::result::Result<T, BoletoError>;
