//! Process command - extract data from a single receipt file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use recr_core::receipt::rules::format_amount;
use recr_core::{BatchProcessor, ProcessedReceipt};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show the raw text preview alongside the extracted fields
    #[arg(long)]
    show_raw: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension != "pdf" {
        anyhow::bail!("Unsupported file format: {}", extension);
    }

    info!("Processing file: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let name = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("receipt.pdf")
        .to_string();
    let id = args
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("receipt")
        .to_string();

    let processor = BatchProcessor::new().with_config(config);
    let receipt = processor.process_bytes(&id, &name, &data)?;

    let output = format_receipt(&receipt, args.format, args.show_raw)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_receipt(
    receipt: &ProcessedReceipt,
    format: OutputFormat,
    show_raw: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(receipt)?),
        OutputFormat::Csv => format_csv(receipt),
        OutputFormat::Text => Ok(format_text(receipt, show_raw)),
    }
}

fn format_csv(receipt: &ProcessedReceipt) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "id",
        "file_name",
        "transaction_date",
        "vendor",
        "amount",
        "description",
        "category",
        "order_id",
        "payment_method",
    ])?;

    wtr.write_record([
        &receipt.id,
        &receipt.file_name,
        &receipt.transaction_date,
        &receipt.vendor,
        &receipt.amount.to_string(),
        &receipt.description,
        &receipt.category.to_string(),
        &receipt.order_id.clone().unwrap_or_default(),
        &receipt.payment_method.clone().unwrap_or_default(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(receipt: &ProcessedReceipt, show_raw: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("Receipt: {}\n", receipt.file_name));
    output.push_str(&format!("Date:     {}\n", receipt.transaction_date));
    output.push_str(&format!("Vendor:   {}\n", receipt.vendor));
    output.push_str(&format!("Amount:   {}\n", format_amount(receipt.amount)));
    output.push_str(&format!("Category: {}\n", receipt.category));
    output.push_str(&format!("Details:  {}\n", receipt.description));

    if let Some(order_id) = &receipt.order_id {
        output.push_str(&format!("Order ID: {}\n", order_id));
    }
    if let Some(method) = &receipt.payment_method {
        output.push_str(&format!("Paid via: {}\n", method));
    }

    if show_raw {
        if let Some(raw) = &receipt.raw_text {
            output.push_str("\n--- raw text ---\n");
            output.push_str(raw);
            output.push('\n');
        }
    }

    output
}
