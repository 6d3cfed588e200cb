//! Data models for boleto documents and configuration.

pub mod config;
pub mod document;

pub use config::{BoletoConfig, DocumentDefaults, OutputConfig};
pub use document::{Document, Field, ParsedFreeField, CURRENCY_REAL};
