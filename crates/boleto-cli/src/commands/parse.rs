//! Parse command - split a free field with a bank's layout.

use clap::Args;

use boleto_core::registry;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Bank code or name (e.g. 218, efi)
    bank: String,

    /// 25-digit free field
    free_field: String,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let parsed = registry::parse_free_field(&args.bank, args.free_field.trim())?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}
