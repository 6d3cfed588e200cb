//! Banks command - list supported banks.

use console::style;

use boleto_core::supported_banks;

pub fn run() -> anyhow::Result<()> {
    println!("{}", style("Supported banks:").bold());
    println!();

    for bank in supported_banks() {
        let codec = bank.codec();
        println!("  {} {}", style(bank.code()).cyan(), bank.name());
        println!("      wallets:    {}", codec.wallets().join(", "));
        println!(
            "      own-number: {}",
            codec.own_number_mask().unwrap_or("as supplied")
        );
    }

    Ok(())
}
