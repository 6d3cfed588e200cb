//! CLI application for Brazilian boleto barcodes.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{banks, batch, config, decode, dv, generate, parse};

/// Boleto - Generate and decode Brazilian bank slip barcodes
#[derive(Parser)]
#[command(name = "boleto")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the barcode of a single document
    Generate(generate::GenerateArgs),

    /// Generate barcodes for multiple documents
    Batch(batch::BatchArgs),

    /// Split a free field with a bank's layout
    Parse(parse::ParseArgs),

    /// Decode a barcode or digitable line
    Decode(decode::DecodeArgs),

    /// Compute a check digit
    Dv(dv::DvArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// List supported banks
    Banks,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Generate(args) => generate::run(args, cli.config.as_deref()),
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()),
        Commands::Parse(args) => parse::run(args),
        Commands::Decode(args) => decode::run(args),
        Commands::Dv(args) => dv::run(args),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
        Commands::Banks => banks::run(),
    }
}
