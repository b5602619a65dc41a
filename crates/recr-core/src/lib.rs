//! Core library for receipt processing.
//!
//! This crate provides:
//! - PDF validation and text extraction
//! - Rule-based receipt field extraction (date, vendor, amount, description,
//!   order id, payment method)
//! - Keyword-based expense categorization
//! - Batch orchestration over a pluggable document source
//! - Tabular export projection (CSV, XLSX)

pub mod batch;
pub mod categorize;
pub mod error;
pub mod export;
pub mod models;
pub mod pdf;
pub mod receipt;

pub use batch::{BatchProcessor, DocumentSource, PdfTextConverter, TextConverter};
pub use categorize::categorize;
pub use error::{RecrError, Result};
pub use export::{project, to_csv, to_xlsx, Projection};
pub use models::config::RecrConfig;
pub use models::receipt::{
    default_export_fields, BatchOutcome, Category, DocumentMeta, ExportField, ExportFieldKey,
    ExtractionResult, ProcessedReceipt,
};
pub use pdf::{has_pdf_header, text_from_pdf, PdfDocument};
pub use receipt::{ReceiptExtractor, RuleBasedExtractor};
