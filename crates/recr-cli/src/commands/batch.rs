//! Batch processing command for multiple receipt files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use recr_core::receipt::rules::format_amount;
use recr_core::{BatchProcessor, ProcessedReceipt};

use super::{default_export_path, load_config, write_export};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Export file (.csv or .xlsx); defaults to a timestamped .xlsx
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Skip writing an export file
    #[arg(long)]
    no_export: bool,

    /// Print each receipt as it is processed
    #[arg(long)]
    show_receipts: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Expand glob pattern to PDF files
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let processor = BatchProcessor::new().with_config(config.clone());

    let mut receipts: Vec<ProcessedReceipt> = Vec::with_capacity(files.len());
    let mut errors: Vec<String> = Vec::new();

    for path in &files {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("receipt.pdf")
            .to_string();
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("receipt")
            .to_string();

        let result = fs::read(path)
            .map_err(anyhow::Error::from)
            .and_then(|data| Ok(processor.process_bytes(&id, &name, &data)?));

        match result {
            Ok(receipt) => {
                if args.show_receipts {
                    pb.println(format!(
                        "  {} {}  {}  {}  {}",
                        style("✓").green(),
                        name,
                        receipt.vendor,
                        format_amount(receipt.amount),
                        receipt.category,
                    ));
                }
                receipts.push(receipt);
            }
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                errors.push(format!("{}: {}", name, e));
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        files.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(receipts.len()).green(),
        style(errors.len()).red()
    );

    if !receipts.is_empty() {
        let total: Decimal = receipts.iter().map(|r| r.amount).sum();
        println!("   Total amount: {}", format_amount(total));
    }

    if !errors.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for error in &errors {
            println!("  - {}", error);
        }
    }

    // Write export unless suppressed
    if !args.no_export && !receipts.is_empty() {
        let export_path = args.export.unwrap_or_else(default_export_path);
        write_export(&receipts, &export_path, &config)?;
        println!();
        println!(
            "{} Export written to {}",
            style("✓").green(),
            export_path.display()
        );
        debug!("Exported {} receipts", receipts.len());
    }

    Ok(())
}
