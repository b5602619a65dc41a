//! Export projection: receipts + field selection -> tabular output.
//!
//! The projection is independent of the record set: many selections can
//! project the same receipts differently. When the amount column is enabled
//! the output gains a trailing aggregate row ("TOTAL" in the first column,
//! the exact sum in the amount column, everything else blank).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Color, Format, Workbook};
use tracing::debug;

use crate::error::ExportError;
use crate::models::receipt::{ExportField, ExportFieldKey, ProcessedReceipt};
use crate::receipt::rules::format_amount;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// A projected table: one header row, one row per receipt, and an optional
/// trailing total row.
#[derive(Debug, Clone)]
pub struct Projection {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_row: Option<Vec<String>>,
}

/// Spreadsheet column width per field, matching the review layout.
fn column_width(key: ExportFieldKey) -> f64 {
    match key {
        ExportFieldKey::Date => 15.0,
        ExportFieldKey::Vendor => 30.0,
        ExportFieldKey::Category => 15.0,
        ExportFieldKey::Description => 40.0,
        ExportFieldKey::Amount => 12.0,
        ExportFieldKey::OrderId => 20.0,
        ExportFieldKey::PaymentMethod => 18.0,
        ExportFieldKey::FileName => 30.0,
    }
}

/// Cell value for one receipt field, with the display defaults re-applied.
fn field_value(receipt: &ProcessedReceipt, key: ExportFieldKey) -> String {
    match key {
        ExportFieldKey::Date => {
            if receipt.transaction_date.is_empty() {
                "N/A".to_string()
            } else {
                receipt.transaction_date.clone()
            }
        }
        ExportFieldKey::Vendor => {
            if receipt.vendor.is_empty() {
                "Unknown".to_string()
            } else {
                receipt.vendor.clone()
            }
        }
        ExportFieldKey::Category => receipt.category.to_string(),
        ExportFieldKey::Description => receipt.description.clone(),
        ExportFieldKey::Amount => format_amount(receipt.amount),
        ExportFieldKey::OrderId => receipt
            .order_id
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        ExportFieldKey::PaymentMethod => receipt
            .payment_method
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        ExportFieldKey::FileName => receipt.file_name.clone(),
    }
}

/// Exact sum of the receipt amounts.
fn amount_total(receipts: &[ProcessedReceipt]) -> Decimal {
    receipts.iter().map(|r| r.amount).sum()
}

/// Project receipts through a field selection.
pub fn project(receipts: &[ProcessedReceipt], fields: &[ExportField]) -> Result<Projection> {
    let enabled: Vec<&ExportField> = fields.iter().filter(|f| f.enabled).collect();
    if enabled.is_empty() {
        return Err(ExportError::NoFields);
    }

    let header: Vec<String> = enabled.iter().map(|f| f.label.clone()).collect();

    let rows: Vec<Vec<String>> = receipts
        .iter()
        .map(|r| enabled.iter().map(|f| field_value(r, f.key)).collect())
        .collect();

    let has_amount = enabled.iter().any(|f| f.key == ExportFieldKey::Amount);
    let total_row = has_amount.then(|| {
        let total = amount_total(receipts);
        enabled
            .iter()
            .enumerate()
            .map(|(i, f)| {
                if f.key == ExportFieldKey::Amount {
                    format_amount(total)
                } else if i == 0 {
                    "TOTAL".to_string()
                } else {
                    String::new()
                }
            })
            .collect()
    });

    debug!(
        columns = header.len(),
        rows = rows.len(),
        "projected receipts"
    );

    Ok(Projection {
        header,
        rows,
        total_row,
    })
}

/// Serialize a projection to CSV bytes.
pub fn to_csv(projection: &Projection) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(&projection.header)
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    for row in &projection.rows {
        wtr.write_record(row)
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }
    if let Some(total) = &projection.total_row {
        wtr.write_record(total)
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }

    wtr.into_inner().map_err(|e| ExportError::Csv(e.to_string()))
}

/// Serialize receipts to spreadsheet bytes with the selected fields.
///
/// Header row is bold white on purple, the total row bold on gold, and
/// amount cells carry a currency number format.
pub fn to_xlsx(
    receipts: &[ProcessedReceipt],
    fields: &[ExportField],
    currency_symbol: &str,
) -> Result<Vec<u8>> {
    let enabled: Vec<&ExportField> = fields.iter().filter(|f| f.enabled).collect();
    if enabled.is_empty() {
        return Err(ExportError::NoFields);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Receipts")
        .map_err(|e| ExportError::Xlsx(e.to_string()))?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x8B5CF6));
    let amount_format = Format::new().set_num_format(format!("{}#,##0.00", currency_symbol));
    let total_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xFFD700));
    let total_amount_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xFFD700))
        .set_num_format(format!("{}#,##0.00", currency_symbol));

    for (col, field) in enabled.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, column_width(field.key))
            .map_err(|e| ExportError::Xlsx(e.to_string()))?;
        worksheet
            .write_string_with_format(0, col, field.label.as_str(), &header_format)
            .map_err(|e| ExportError::Xlsx(e.to_string()))?;
    }

    for (i, receipt) in receipts.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, field) in enabled.iter().enumerate() {
            let col = col as u16;
            if field.key == ExportFieldKey::Amount {
                let amount = receipt.amount.to_f64().unwrap_or(0.0);
                worksheet
                    .write_number_with_format(row, col, amount, &amount_format)
                    .map_err(|e| ExportError::Xlsx(e.to_string()))?;
            } else {
                worksheet
                    .write_string(row, col, field_value(receipt, field.key))
                    .map_err(|e| ExportError::Xlsx(e.to_string()))?;
            }
        }
    }

    let has_amount = enabled.iter().any(|f| f.key == ExportFieldKey::Amount);
    if has_amount {
        let row = (receipts.len() + 1) as u32;
        let total = amount_total(receipts).to_f64().unwrap_or(0.0);
        for (col, field) in enabled.iter().enumerate() {
            let col_idx = col as u16;
            if field.key == ExportFieldKey::Amount {
                worksheet
                    .write_number_with_format(row, col_idx, total, &total_amount_format)
                    .map_err(|e| ExportError::Xlsx(e.to_string()))?;
            } else if col == 0 {
                worksheet
                    .write_string_with_format(row, col_idx, "TOTAL", &total_format)
                    .map_err(|e| ExportError::Xlsx(e.to_string()))?;
            } else {
                worksheet
                    .write_string_with_format(row, col_idx, "", &total_format)
                    .map_err(|e| ExportError::Xlsx(e.to_string()))?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ExportError::Xlsx(e.to_string()))
}
