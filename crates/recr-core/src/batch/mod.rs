//! Batch orchestration: acquisition, validation, extraction, categorization.
//!
//! Per-document failures are isolated: each one becomes an error string and
//! the batch moves on. A batch with zero successes is still a successful
//! batch as long as the request itself was well-formed.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::categorize::categorize;
use crate::error::{BatchError, PdfError, RecrError, Result, SourceError};
use crate::models::config::RecrConfig;
use crate::models::receipt::{BatchOutcome, DocumentMeta, ProcessedReceipt};
use crate::pdf;
use crate::receipt::{ReceiptExtractor, RuleBasedExtractor};

/// A source of receipt documents: listing and download only.
///
/// The core asks for nothing beyond a stable id, raw bytes, and a MIME/size
/// hint for pre-filtering.
pub trait DocumentSource {
    /// List documents available under a folder reference.
    fn list(&self, folder: &str) -> std::result::Result<Vec<DocumentMeta>, SourceError>;

    /// Download one document's raw bytes.
    fn fetch(&self, id: &str) -> std::result::Result<Vec<u8>, SourceError>;
}

/// Document-to-text conversion, treated as a black box by the orchestrator.
pub trait TextConverter {
    /// Decode the textual content of one document.
    fn convert(&self, bytes: &[u8]) -> std::result::Result<String, PdfError>;
}

/// The default converter: embedded PDF text via pdf-extract.
pub struct PdfTextConverter;

impl TextConverter for PdfTextConverter {
    fn convert(&self, bytes: &[u8]) -> std::result::Result<String, PdfError> {
        pdf::PdfDocument::load(bytes)?.extract_text()
    }
}

/// Runs the per-document pipeline: fetch, validate, convert, extract,
/// categorize, assemble.
pub struct BatchProcessor<C, E> {
    converter: C,
    extractor: E,
    config: RecrConfig,
}

impl BatchProcessor<PdfTextConverter, RuleBasedExtractor> {
    /// Processor with the default PDF converter and rule-based extractor.
    pub fn new() -> Self {
        Self {
            converter: PdfTextConverter,
            extractor: RuleBasedExtractor::new(),
            config: RecrConfig::default(),
        }
    }
}

impl Default for BatchProcessor<PdfTextConverter, RuleBasedExtractor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E> BatchProcessor<C, E>
where
    C: TextConverter,
    E: ReceiptExtractor,
{
    /// Processor with a custom converter and extractor.
    pub fn with_parts(converter: C, extractor: E, config: RecrConfig) -> Self {
        Self {
            converter,
            extractor,
            config,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: RecrConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the full pipeline over a set of documents.
    ///
    /// An empty document list is an input error reported before any
    /// processing; everything after that is isolated per document.
    pub fn process<S: DocumentSource>(
        &self,
        source: &S,
        documents: &[DocumentMeta],
    ) -> Result<BatchOutcome> {
        if documents.is_empty() {
            return Err(RecrError::Batch(BatchError::EmptyRequest));
        }

        let mut outcome = BatchOutcome::default();

        for doc in documents {
            match self.process_document(source, doc) {
                Ok(receipt) => {
                    debug!(id = %doc.id, vendor = %receipt.vendor, "processed document");
                    outcome.receipts.push(receipt);
                }
                Err(e) => {
                    warn!(id = %doc.id, "failed to process document: {}", e);
                    outcome.errors.push(format!("{}: {}", doc.id, e));
                }
            }
        }

        outcome.total_processed = outcome.receipts.len();
        Ok(outcome)
    }

    /// Process one document end to end. Any error here is attributable to
    /// the document alone.
    fn process_document<S: DocumentSource>(
        &self,
        source: &S,
        doc: &DocumentMeta,
    ) -> Result<ProcessedReceipt> {
        let bytes = source.fetch(&doc.id)?;
        self.process_bytes(&doc.id, &doc.name, &bytes)
    }

    /// Run the validate/convert/extract/categorize pipeline over raw bytes.
    pub fn process_bytes(&self, id: &str, name: &str, bytes: &[u8]) -> Result<ProcessedReceipt> {
        // Header validation precedes any conversion attempt
        if !pdf::has_pdf_header(bytes) {
            return Err(PdfError::InvalidHeader.into());
        }

        let text = self.converter.convert(bytes)?;
        if text.trim().is_empty() {
            return Err(PdfError::EmptyText.into());
        }

        let extracted = self.extractor.extract(&text);
        let category = categorize(
            extracted.vendor.as_deref().unwrap_or(""),
            extracted.description.as_deref(),
        );

        let raw_text = if self.config.extraction.raw_text_preview > 0 {
            Some(
                text.chars()
                    .take(self.config.extraction.raw_text_preview)
                    .collect(),
            )
        } else {
            None
        };

        Ok(ProcessedReceipt {
            id: id.to_string(),
            file_name: name.to_string(),
            transaction_date: extracted
                .transaction_date
                .unwrap_or_else(|| "N/A".to_string()),
            vendor: extracted.vendor.unwrap_or_else(|| "Unknown".to_string()),
            amount: extracted.amount.unwrap_or(Decimal::ZERO),
            description: extracted.description.unwrap_or_default(),
            category,
            order_id: extracted.order_id,
            payment_method: extracted.payment_method,
            raw_text,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;
    use crate::models::receipt::Category;

    /// In-memory source used by the orchestrator tests.
    struct MemorySource {
        documents: HashMap<String, Vec<u8>>,
    }

    impl MemorySource {
        fn with_docs(docs: &[(&str, &str)]) -> Self {
            Self {
                documents: docs
                    .iter()
                    .map(|(id, content)| (id.to_string(), content.as_bytes().to_vec()))
                    .collect(),
            }
        }
    }

    impl DocumentSource for MemorySource {
        fn list(&self, _folder: &str) -> std::result::Result<Vec<DocumentMeta>, SourceError> {
            Ok(self
                .documents
                .keys()
                .map(|id| DocumentMeta {
                    id: id.clone(),
                    name: format!("{}.pdf", id),
                    mime_type: "application/pdf".to_string(),
                    size: None,
                })
                .collect())
        }

        fn fetch(&self, id: &str) -> std::result::Result<Vec<u8>, SourceError> {
            self.documents
                .get(id)
                .cloned()
                .ok_or_else(|| SourceError::NotFound(id.to_string()))
        }
    }

    /// Converter that reads the bytes after the magic header as UTF-8,
    /// standing in for real PDF decoding.
    struct HeaderStripConverter;

    impl TextConverter for HeaderStripConverter {
        fn convert(&self, bytes: &[u8]) -> std::result::Result<String, PdfError> {
            Ok(String::from_utf8_lossy(&bytes[pdf::PDF_MAGIC.len()..]).into_owned())
        }
    }

    fn meta(id: &str) -> DocumentMeta {
        DocumentMeta {
            id: id.to_string(),
            name: format!("{}.pdf", id),
            mime_type: "application/pdf".to_string(),
            size: None,
        }
    }

    fn processor() -> BatchProcessor<HeaderStripConverter, RuleBasedExtractor> {
        BatchProcessor::with_parts(
            HeaderStripConverter,
            RuleBasedExtractor::new(),
            RecrConfig::default(),
        )
    }

    #[test]
    fn test_empty_request_is_input_error() {
        let source = MemorySource::with_docs(&[]);
        let result = processor().process(&source, &[]);
        assert!(matches!(
            result,
            Err(RecrError::Batch(BatchError::EmptyRequest))
        ));
    }

    #[test]
    fn test_one_bad_header_yields_n_minus_one_successes() {
        let source = MemorySource::with_docs(&[
            ("a", "%PDF-Swiggy\nTotal: \u{20b9}120.50\n"),
            ("b", "JUNK not a pdf"),
            ("c", "%PDF-Uber\nTrip receipt\nTotal: $15.00\n"),
        ]);

        let outcome = processor()
            .process(&source, &[meta("a"), meta("b"), meta("c")])
            .unwrap();

        assert_eq!(outcome.receipts.len(), 2);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.total_processed, 2);
        assert!(outcome.errors[0].starts_with("b:"));
    }

    #[test]
    fn test_defaults_applied_and_category_assigned() {
        let source =
            MemorySource::with_docs(&[("r1", "%PDF-Swiggy\nTotal: \u{20b9}350.00\n")]);

        let outcome = processor().process(&source, &[meta("r1")]).unwrap();
        let receipt = &outcome.receipts[0];

        assert_eq!(receipt.vendor, "Swiggy");
        assert_eq!(receipt.category, Category::Food);
        assert_eq!(receipt.amount, Decimal::from_str("350.00").unwrap());
        // No date pattern matched: the sentinel applies
        assert_eq!(receipt.transaction_date, "N/A");
        assert!(receipt.raw_text.is_some());
    }

    #[test]
    fn test_empty_text_is_soft_failure() {
        let source = MemorySource::with_docs(&[("blank", "%PDF-   \n  ")]);

        let outcome = processor().process(&source, &[meta("blank")]).unwrap();
        assert!(outcome.receipts.is_empty());
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn test_missing_document_is_isolated() {
        let source = MemorySource::with_docs(&[]);

        let outcome = processor().process(&source, &[meta("ghost")]).unwrap();
        assert!(outcome.receipts.is_empty());
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn test_raw_text_preview_respects_config() {
        let mut config = RecrConfig::default();
        config.extraction.raw_text_preview = 5;
        let processor = BatchProcessor::with_parts(
            HeaderStripConverter,
            RuleBasedExtractor::new(),
            config,
        );

        let source =
            MemorySource::with_docs(&[("r1", "%PDF-Some Store\nTotal: $9.99\n")]);
        let outcome = processor.process(&source, &[meta("r1")]).unwrap();

        assert_eq!(outcome.receipts[0].raw_text.as_deref(), Some("Some "));
    }
}
