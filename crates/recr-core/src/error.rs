//! Error types for the recr-core library.

use thiserror::Error;

/// Main error type for the recr library.
#[derive(Error, Debug)]
pub enum RecrError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Document source error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Batch request error.
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    /// Export serialization error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The first bytes are not the `%PDF-` magic header.
    #[error("not a valid PDF (missing %PDF- header)")]
    InvalidHeader,

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Text extraction succeeded but produced no usable text.
    #[error("no extractable text")]
    EmptyText,
}

/// Errors raised by a document source (listing/download layer).
#[derive(Error, Debug)]
pub enum SourceError {
    /// The listing call itself failed; no per-document work could begin.
    #[error("failed to list documents: {0}")]
    Listing(String),

    /// A single document could not be downloaded.
    #[error("failed to download document {id}: {reason}")]
    Download { id: String, reason: String },

    /// The requested document does not exist in the source.
    #[error("document not found: {0}")]
    NotFound(String),
}

/// Errors in the batch request itself, reported before any processing.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The request carried no document identifiers.
    #[error("document id list is required")]
    EmptyRequest,
}

/// Errors related to export projection output.
#[derive(Error, Debug)]
pub enum ExportError {
    /// No export field is enabled.
    #[error("no export fields enabled")]
    NoFields,

    /// CSV serialization failed.
    #[error("CSV serialization failed: {0}")]
    Csv(String),

    /// Spreadsheet serialization failed.
    #[error("spreadsheet serialization failed: {0}")]
    Xlsx(String),
}

/// Result type for the recr library.
pub type Result<T> = std::result::Result<T, RecrError>;
