//! Dv command - run the check-digit engine on a digit string.

use clap::Args;

use boleto_core::check_digit::{modulo10, modulo11};
use boleto_core::{Modulo11, Remainder, WeightCycle};

/// Arguments for the dv command.
#[derive(Args)]
pub struct DvArgs {
    /// Digits to compute the check digit of
    digits: String,

    /// Weight applied to the rightmost digit
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=11))]
    start: u32,

    /// Largest weight before the cycle resets
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(1..=11))]
    max: u32,

    /// Weight used after the largest one
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=11))]
    reset: u32,

    /// Print the raw remainder instead of a mapped digit
    #[arg(long, conflicts_with = "ten_override")]
    raw: bool,

    /// Digit replacing a result of 10
    #[arg(long, default_value_t = 0)]
    ten_override: u32,

    /// Use the modulo-10 rule of digitable-line fields
    #[arg(long, conflicts_with_all = ["raw", "start", "max", "reset", "ten_override"])]
    modulo10: bool,
}

pub fn run(args: DvArgs) -> anyhow::Result<()> {
    let digits = args.digits.trim();

    let dv = if args.modulo10 {
        modulo10(digits)?
    } else {
        let remainder = if args.raw {
            Remainder::Raw
        } else {
            Remainder::Mapped {
                ten_override: args.ten_override,
            }
        };
        let params = Modulo11::new(WeightCycle::new(args.start, args.max, args.reset), remainder);
        modulo11(digits, params)?
    };

    println!("{}", dv);
    Ok(())
}
