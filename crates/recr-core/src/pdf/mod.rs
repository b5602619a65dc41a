//! PDF validation and text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use crate::error::PdfError;

/// Magic header every accepted document must start with.
pub const PDF_MAGIC: &[u8; 5] = b"%PDF-";

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Check the 5-byte magic header. Anything else is rejected before any
/// parsing is attempted.
pub fn has_pdf_header(data: &[u8]) -> bool {
    data.len() >= PDF_MAGIC.len() && &data[..PDF_MAGIC.len()] == PDF_MAGIC
}

/// A loaded PDF document ready for text extraction.
#[derive(Debug)]
pub struct PdfDocument {
    document: Document,
    raw_data: Vec<u8>,
}

impl PdfDocument {
    /// Load a PDF from bytes, validating the magic header first.
    pub fn load(data: &[u8]) -> Result<Self> {
        if !has_pdf_header(data) {
            return Err(PdfError::InvalidHeader);
        }

        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(Self {
            document: doc,
            raw_data,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Extract text from the entire document.
    pub fn extract_text(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }
}

/// Validate, load, and extract text from PDF bytes in one step.
///
/// Empty/whitespace-only text is reported as [`PdfError::EmptyText`] so
/// callers can record it as a soft, per-document failure.
pub fn text_from_pdf(data: &[u8]) -> Result<String> {
    let doc = PdfDocument::load(data)?;
    let text = doc.extract_text()?;
    if text.trim().is_empty() {
        return Err(PdfError::EmptyText);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_header_accepted() {
        assert!(has_pdf_header(b"%PDF-1.7\n..."));
    }

    #[test]
    fn test_non_pdf_header_rejected() {
        assert!(!has_pdf_header(b"PK\x03\x04zipfile"));
        assert!(!has_pdf_header(b"%PD"));
        assert!(!has_pdf_header(b""));
    }

    #[test]
    fn test_load_rejects_bad_header_before_parsing() {
        let err = PdfDocument::load(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, PdfError::InvalidHeader));
    }
}
