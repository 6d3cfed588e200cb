//! Core library for Brazilian boleto barcodes.
//!
//! This crate provides:
//! - Check-digit routines (modulo 11 with configurable weights, modulo 10)
//! - Fixed-width formatting, display masks and the due-date factor
//! - Per-bank free field (campo livre) and own-number codecs for BS2, Efí and Sisprime
//! - The 44-digit barcode, its digitable line, and decomposition of both

pub mod bank;
pub mod barcode;
pub mod boleto;
pub mod check_digit;
pub mod error;
pub mod format;
pub mod models;
pub mod registry;

pub use bank::{BankCodec, Bs2, Efi, Sisprime};
pub use barcode::{BarcodeParts, barcode_from_digitable_line, digitable_line};
pub use boleto::Boleto;
pub use check_digit::{CheckDigitEngine, Modulo11, Remainder, StandardEngine, WeightCycle};
pub use error::{BoletoError, FormatError, Result};
pub use format::{due_date_factor, format_fixed_width, mask_pattern};
pub use models::{BoletoConfig, Document, DocumentDefaults, Field, OutputConfig, ParsedFreeField};
pub use registry::{Bank, codec_for, parse_free_field, supported_banks};
