//! Receipt data models shared across extraction, categorization, and export.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spending category assigned to a transaction.
///
/// Closed set; [`Category::Other`] is the universal default when no keyword
/// rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Utilities,
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Travel,
        Category::Shopping,
        Category::Utilities,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort structured fields pulled from one receipt's text.
///
/// Every field is independently optional: absence means no pattern matched,
/// not an explicitly empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Raw matched date substring. Deliberately not parsed to a calendar
    /// type: the source locale is unknown, so D/M vs M/D stays ambiguous.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,

    /// Resolved vendor display name, or a raw header line fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Largest positive numeric candidate across all amount patterns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,

    /// Synthesized free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Order/transaction/invoice identifier token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// Payment method, first character capitalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// The persisted unit a user reviews, edits, and exports.
///
/// Built once by the batch orchestrator with defaults applied for absent
/// optional fields; the extraction and categorization engines never mutate
/// it after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedReceipt {
    /// Source document identifier.
    pub id: String,

    /// Display name of the source document.
    pub file_name: String,

    /// Transaction date as matched, or "N/A".
    pub transaction_date: String,

    /// Vendor display name, or "Unknown".
    pub vendor: String,

    /// Transaction amount, or zero when nothing matched.
    pub amount: Decimal,

    /// Synthesized description, possibly empty.
    pub description: String,

    /// Assigned spending category.
    pub category: Category,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Leading slice of the extracted text, kept for review/debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    /// Error note attached during review, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A document listing entry from a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Stable document identifier.
    pub id: String,

    /// Human-readable document name.
    pub name: String,

    /// MIME type hint, used to pre-filter to PDF-like content.
    pub mime_type: String,

    /// Size in bytes, when the source reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Outcome of one batch run: successes, per-document errors, success count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Successfully processed receipts.
    pub receipts: Vec<ProcessedReceipt>,

    /// Per-document error strings; one entry per failed document.
    pub errors: Vec<String>,

    /// Number of documents that produced a receipt.
    pub total_processed: usize,
}

/// Keys of the exportable receipt fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFieldKey {
    Date,
    Vendor,
    Category,
    Description,
    Amount,
    OrderId,
    PaymentMethod,
    FileName,
}

/// One column choice in an export field selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportField {
    /// Which receipt field this column projects.
    pub key: ExportFieldKey,

    /// Column header text.
    pub label: String,

    /// Whether the column appears in the output.
    pub enabled: bool,
}

impl ExportField {
    pub fn new(key: ExportFieldKey, label: &str, enabled: bool) -> Self {
        Self {
            key,
            label: label.to_string(),
            enabled,
        }
    }
}

/// The default export selection: the five review columns enabled, the
/// bookkeeping columns present but off.
pub fn default_export_fields() -> Vec<ExportField> {
    vec![
        ExportField::new(ExportFieldKey::Date, "Date", true),
        ExportField::new(ExportFieldKey::Vendor, "Vendor", true),
        ExportField::new(ExportFieldKey::Category, "Category", true),
        ExportField::new(ExportFieldKey::Description, "Description", true),
        ExportField::new(ExportFieldKey::Amount, "Amount", true),
        ExportField::new(ExportFieldKey::OrderId, "Order ID", false),
        ExportField::new(ExportFieldKey::PaymentMethod, "Payment Method", false),
        ExportField::new(ExportFieldKey::FileName, "File Name", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_default_is_other() {
        assert_eq!(Category::default(), Category::Other);
    }

    #[test]
    fn test_default_export_fields_order() {
        let fields = default_export_fields();
        let enabled: Vec<_> = fields.iter().filter(|f| f.enabled).map(|f| f.key).collect();
        assert_eq!(
            enabled,
            vec![
                ExportFieldKey::Date,
                ExportFieldKey::Vendor,
                ExportFieldKey::Category,
                ExportFieldKey::Description,
                ExportFieldKey::Amount,
            ]
        );
    }

    #[test]
    fn test_extraction_result_all_fields_optional() {
        let result = ExtractionResult::default();
        assert!(result.transaction_date.is_none());
        assert!(result.vendor.is_none());
        assert!(result.amount.is_none());
        assert!(result.description.is_none());
        assert!(result.order_id.is_none());
        assert!(result.payment_method.is_none());
    }
}
