//! Batch command - generate barcodes for many document files.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use super::generate::{Generated, generate_from_file};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching document files (JSON)
    #[arg(required = true)]
    input: String,

    /// Summary CSV file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    outcome: Result<Generated, String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} documents to process",
        style("ℹ").blue(),
        files.len()
    );

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        match generate_from_file(&path, &config) {
            Ok(generated) => results.push(BatchResult {
                path,
                outcome: Ok(generated),
            }),
            Err(e) => {
                let message = e.to_string();
                if !args.continue_on_error {
                    progress.abandon();
                    error!("Failed to process {}: {}", path.display(), message);
                    anyhow::bail!("Processing {} failed: {}", path.display(), message);
                }
                warn!("Failed to process {}: {}", path.display(), message);
                results.push(BatchResult {
                    path,
                    outcome: Err(message),
                });
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();

    match &args.output {
        Some(path) => {
            write_summary(csv::Writer::from_path(path)?, &results)?;
            eprintln!(
                "{} Summary written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => write_summary(csv::Writer::from_writer(io::stdout()), &results)?,
    }

    let failed: Vec<&BatchResult> = results.iter().filter(|r| r.outcome.is_err()).collect();
    eprintln!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    for result in &failed {
        if let Err(message) = &result.outcome {
            eprintln!("  - {}: {}", result.path.display(), message);
        }
    }

    Ok(())
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or("")
}

fn write_summary<W: io::Write>(mut wtr: csv::Writer<W>, results: &[BatchResult]) -> anyhow::Result<()> {
    wtr.write_record([
        "filename",
        "status",
        "bank",
        "own_number",
        "barcode",
        "digitable_line",
        "error",
    ])?;

    for result in results {
        let filename = file_name(&result.path);
        match &result.outcome {
            Ok(generated) => wtr.write_record([
                filename,
                "success",
                generated.bank.as_str(),
                generated.own_number_display.as_str(),
                generated.barcode.as_str(),
                generated.digitable_line.as_deref().unwrap_or(""),
                "",
            ])?,
            Err(message) => wtr.write_record([filename, "error", "", "", "", "", message.as_str()])?,
        }
    }

    wtr.flush()?;
    Ok(())
}
