//! Configuration structures for barcode generation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::document::CURRENCY_REAL;
use crate::error::{BoletoError, Result};

/// Main configuration for the boleto tooling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoletoConfig {
    /// Defaults applied to documents that leave fields unset.
    pub document: DocumentDefaults,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Values filled into documents that omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentDefaults {
    /// Currency code.
    pub currency: String,

    /// Installment number for banks that encode one.
    pub installment: u16,
}

impl Default for DocumentDefaults {
    fn default() -> Self {
        Self {
            currency: CURRENCY_REAL.to_string(),
            installment: 1,
        }
    }
}

/// How generated barcodes are written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json", "text" or "csv".
    pub format: String,

    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Include the 47-digit digitable line next to the barcode.
    pub include_digitable_line: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: true,
            include_digitable_line: true,
        }
    }
}

impl BoletoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values no command can honour.
    pub fn check(&self) -> Result<()> {
        if !matches!(self.output.format.as_str(), "json" | "text" | "csv") {
            return Err(BoletoError::Config(format!(
                "unknown output format: {}",
                self.output.format
            )));
        }

        if self.document.currency.len() != 1
            || !self.document.currency.chars().all(|c| c.is_ascii_digit())
        {
            return Err(BoletoError::Config(format!(
                "currency code must be a single digit, got {:?}",
                self.document.currency
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BoletoConfig = serde_json::from_str(r#"{"output": {"pretty": false}}"#).unwrap();

        assert_eq!(config.document, DocumentDefaults::default());
        assert_eq!(config.output.format, "json");
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_check_rejects_unknown_format() {
        let mut config = BoletoConfig::default();
        config.output.format = "xml".to_string();
        assert!(matches!(config.check(), Err(BoletoError::Config(_))));
    }

    #[test]
    fn test_check_rejects_bad_currency() {
        let mut config = BoletoConfig::default();
        config.document.currency = "BRL".to_string();
        assert!(config.check().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = BoletoConfig::default();
        config.document.installment = 3;
        config.save(&path).unwrap();

        let loaded = BoletoConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
