//! Generate command - derive the barcode of a single document.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use boleto_core::{Boleto, BoletoConfig, BoletoError, Document};

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Document file (JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from configuration)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    fn from_config(config: &BoletoConfig) -> Self {
        match config.output.format.as_str() {
            "csv" => OutputFormat::Csv,
            "text" => OutputFormat::Text,
            _ => OutputFormat::Json,
        }
    }
}

/// Everything derived from one document.
#[derive(Debug, Serialize)]
pub struct Generated {
    pub bank: String,
    pub bank_name: String,
    pub own_number: String,
    pub own_number_display: String,
    pub free_field: String,
    pub barcode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digitable_line: Option<String>,
}

impl Generated {
    pub fn from_boleto(boleto: &Boleto, include_digitable_line: bool) -> anyhow::Result<Self> {
        let bank = boleto.document().bank;
        let barcode = boleto.barcode().map_err(describe)?.to_string();
        let digitable_line = if include_digitable_line {
            Some(boleto.digitable_line()?)
        } else {
            None
        };

        Ok(Self {
            bank: bank.code().to_string(),
            bank_name: bank.name().to_string(),
            own_number: boleto.own_number()?.to_string(),
            own_number_display: boleto.own_number_for_display()?,
            free_field: boleto.free_field()?.to_string(),
            barcode,
            digitable_line,
        })
    }
}

fn describe(err: BoletoError) -> anyhow::Error {
    match err {
        BoletoError::MissingField(messages) => {
            anyhow::anyhow!("Document is incomplete: {}", messages.join("; "))
        }
        other => other.into(),
    }
}

/// Read a document file, fill configured defaults and derive its barcode.
pub fn generate_from_file(path: &Path, config: &BoletoConfig) -> anyhow::Result<Generated> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let mut document: Document = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid document {}: {}", path.display(), e))?;
    document.apply_defaults(&config.document);

    let boleto = Boleto::new(document);
    Generated::from_boleto(&boleto, config.output.include_digitable_line)
}

pub fn run(args: GenerateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Generating barcode for {}", args.input.display());
    let generated = generate_from_file(&args.input, &config)?;

    let format = args.format.unwrap_or_else(|| OutputFormat::from_config(&config));
    let output = format_generated(&generated, format, config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    Ok(())
}

fn format_generated(
    generated: &Generated,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(generated)?),
        OutputFormat::Json => Ok(serde_json::to_string(generated)?),
        OutputFormat::Csv => format_csv(generated),
        OutputFormat::Text => Ok(format_text(generated)),
    }
}

fn format_csv(generated: &Generated) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.serialize(generated)?;
    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(generated: &Generated) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bank:           {} {}\n", generated.bank, generated.bank_name));
    output.push_str(&format!("Own-number:     {}\n", generated.own_number_display));
    output.push_str(&format!("Free field:     {}\n", generated.free_field));
    output.push_str(&format!("Barcode:        {}\n", generated.barcode));
    if let Some(line) = &generated.digitable_line {
        output.push_str(&format!("Digitable line: {}\n", line));
    }

    output
}
