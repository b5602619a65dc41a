//! Fetch command - list and download receipt PDFs from a public Google
//! Drive folder, then run the batch pipeline over them.

use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{debug, info};

use recr_core::batch::DocumentSource;
use recr_core::error::SourceError;
use recr_core::receipt::rules::format_amount;
use recr_core::{BatchProcessor, DocumentMeta};

use super::{default_export_path, load_config, write_export};

const DRIVE_API: &str = "https://www.googleapis.com/drive/v3/files";

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Folder URL or folder id
    #[arg(required = true)]
    folder: String,

    /// API key (overrides config and GOOGLE_DRIVE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Export file (.csv or .xlsx); defaults to a timestamped .xlsx
    #[arg(short, long)]
    export: Option<std::path::PathBuf>,

    /// Skip writing an export file
    #[arg(long)]
    no_export: bool,
}

/// One entry of a Drive `files.list` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    name: String,
    mime_type: String,
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DriveListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
}

pub async fn run(args: FetchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let api_key = args
        .api_key
        .or_else(|| config.source.api_key.clone())
        .or_else(|| std::env::var("GOOGLE_DRIVE_API_KEY").ok())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No API key configured. Pass --api-key, set source.api_key in the \
                 config, or export GOOGLE_DRIVE_API_KEY."
            )
        })?;

    let folder_id = folder_id_from_url(&args.folder);
    info!("Listing folder {}", folder_id);

    let client = reqwest::Client::builder()
        .user_agent("recr-cli/0.1.0")
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    // List PDFs in the folder
    let query = format!(
        "'{}' in parents and mimeType='application/pdf' and trashed=false",
        folder_id
    );
    let page_size = config.source.page_size.to_string();
    let response = client
        .get(DRIVE_API)
        .query(&[
            ("q", query.as_str()),
            ("fields", "files(id, name, mimeType, size)"),
            ("pageSize", page_size.as_str()),
            ("key", api_key.as_str()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("Failed to list files: HTTP {}", response.status());
    }

    let listing: DriveListResponse = response.json().await?;
    if listing.files.is_empty() {
        println!("{} No PDF files found in folder.", style("ℹ").blue());
        return Ok(());
    }

    println!(
        "{} Found {} PDF files",
        style("ℹ").blue(),
        listing.files.len()
    );

    // Download everything up front; the pipeline itself is synchronous
    let mut documents = Vec::with_capacity(listing.files.len());
    let mut metas = Vec::with_capacity(listing.files.len());

    for file in &listing.files {
        let size = file.size.as_deref().and_then(|s| s.parse::<u64>().ok());

        let pb = ProgressBar::new(size.unwrap_or(0));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} {msg:<30} [{bar:25.cyan/blue}] {bytes}/{total_bytes}")
                .unwrap()
                .progress_chars("=>-"),
        );
        pb.set_message(file.name.clone());

        match download_file(&client, &file.id, &api_key, &pb).await {
            Ok(bytes) => {
                pb.finish_with_message(format!("{} {}", style("✓").green(), file.name));
                documents.push((file.id.clone(), bytes));
                metas.push(DocumentMeta {
                    id: file.id.clone(),
                    name: file.name.clone(),
                    mime_type: file.mime_type.clone(),
                    size,
                });
            }
            Err(e) => {
                pb.finish_with_message(format!("{} {} - {}", style("✗").red(), file.name, e));
            }
        }
    }

    if metas.is_empty() {
        anyhow::bail!("No files could be downloaded");
    }

    // Run the pipeline over the downloaded documents
    let source = DownloadedSource { documents };
    let processor = BatchProcessor::new().with_config(config.clone());
    let outcome = processor.process(&source, &metas)?;

    println!();
    println!(
        "{} Processed {} receipts in {:?}",
        style("✓").green(),
        outcome.total_processed,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(outcome.receipts.len()).green(),
        style(outcome.errors.len()).red()
    );

    if !outcome.receipts.is_empty() {
        let total: rust_decimal::Decimal = outcome.receipts.iter().map(|r| r.amount).sum();
        println!("   Total amount: {}", format_amount(total));
    }

    if !outcome.errors.is_empty() {
        println!();
        println!("{}", style("Failed documents:").red());
        for error in &outcome.errors {
            println!("  - {}", error);
        }
    }

    if !args.no_export && !outcome.receipts.is_empty() {
        let export_path = args.export.unwrap_or_else(default_export_path);
        write_export(&outcome.receipts, &export_path, &config)?;
        println!();
        println!(
            "{} Export written to {}",
            style("✓").green(),
            export_path.display()
        );
    }

    Ok(())
}

/// Pull the folder id out of a Drive URL; bare ids pass through unchanged.
///
/// Handles both the `/folders/<id>` path form and the `id=<id>` query form.
fn folder_id_from_url(input: &str) -> String {
    for marker in ["/folders/", "id="] {
        if let Some(pos) = input.find(marker) {
            let rest = &input[pos + marker.len()..];
            let id: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect();
            if !id.is_empty() {
                return id;
            }
        }
    }
    input.to_string()
}

/// Stream one file's bytes with download progress.
async fn download_file(
    client: &reqwest::Client,
    file_id: &str,
    api_key: &str,
    pb: &ProgressBar,
) -> anyhow::Result<Vec<u8>> {
    let url = format!("{}/{}", DRIVE_API, file_id);
    let response = client
        .get(&url)
        .query(&[("alt", "media"), ("key", api_key)])
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {}", response.status());
    }

    if let Some(content_length) = response.content_length() {
        pb.set_length(content_length);
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        bytes.extend_from_slice(&chunk);
        pb.set_position(bytes.len() as u64);
    }

    debug!("Downloaded {} bytes for {}", bytes.len(), file_id);
    Ok(bytes)
}

/// Source over documents already downloaded into memory.
struct DownloadedSource {
    documents: Vec<(String, Vec<u8>)>,
}

impl DocumentSource for DownloadedSource {
    fn list(&self, _folder: &str) -> Result<Vec<DocumentMeta>, SourceError> {
        Ok(self
            .documents
            .iter()
            .map(|(id, bytes)| DocumentMeta {
                id: id.clone(),
                name: id.clone(),
                mime_type: "application/pdf".to_string(),
                size: Some(bytes.len() as u64),
            })
            .collect())
    }

    fn fetch(&self, id: &str) -> Result<Vec<u8>, SourceError> {
        self.documents
            .iter()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }
}
