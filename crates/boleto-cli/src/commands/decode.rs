//! Decode command - split a barcode or digitable line and check its DV.

use clap::Args;
use console::style;
use serde::Serialize;

use boleto_core::{BarcodeParts, ParsedFreeField, digitable_line};

/// Arguments for the decode command.
#[derive(Args)]
pub struct DecodeArgs {
    /// 44-digit barcode or 47-digit digitable line
    #[arg(required = true, num_args = 1..)]
    input: Vec<String>,
}

#[derive(Serialize)]
struct Decoded {
    barcode: String,
    digitable_line: String,
    #[serde(flatten)]
    parts: BarcodeParts,
    bank_name: Option<&'static str>,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    free_field_parts: Option<ParsedFreeField>,
}

pub fn run(args: DecodeArgs) -> anyhow::Result<()> {
    // A digitable line is usually pasted with spaces
    let input = args.input.join(" ");
    let parts = BarcodeParts::parse(&input)?;
    let barcode = parts.barcode()?;

    let verification = parts.verify();
    let bank = parts.bank().ok();
    let decoded = Decoded {
        digitable_line: digitable_line(&barcode)?,
        barcode,
        bank_name: bank.map(|b| b.name()),
        valid: verification.is_ok(),
        free_field_parts: parts.parse_free_field().ok(),
        parts,
    };

    println!("{}", serde_json::to_string_pretty(&decoded)?);

    if let Err(e) = verification {
        eprintln!("{} {}", style("✗").red(), e);
        anyhow::bail!("Barcode is not valid");
    }

    Ok(())
}
