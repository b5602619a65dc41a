//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod fetch;
pub mod process;

use std::path::{Path, PathBuf};

use recr_core::models::config::RecrConfig;
use recr_core::{default_export_fields, to_csv, to_xlsx, ProcessedReceipt};

/// Load the configuration from an explicit path, the default location, or
/// defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RecrConfig> {
    if let Some(path) = config_path {
        return Ok(RecrConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        return Ok(RecrConfig::from_file(&default_path)?);
    }

    Ok(RecrConfig::default())
}

/// Default export file name, timestamped like the review UI's downloads.
pub fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "receipts-{}.xlsx",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ))
}

/// Write receipts to `path`, choosing the format from the extension
/// (`.csv` or `.xlsx`).
pub fn write_export(
    receipts: &[ProcessedReceipt],
    path: &Path,
    config: &RecrConfig,
) -> anyhow::Result<()> {
    let fields = default_export_fields();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let bytes = match extension.as_str() {
        "csv" => {
            let projection = recr_core::project(receipts, &fields)?;
            to_csv(&projection)?
        }
        "xlsx" => to_xlsx(receipts, &fields, &config.export.currency_symbol)?,
        other => anyhow::bail!("Unsupported export format: {}", other),
    };

    std::fs::write(path, bytes)?;
    Ok(())
}
