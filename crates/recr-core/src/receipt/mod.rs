//! Receipt field extraction module.

mod extractor;
pub mod rules;

pub use extractor::RuleBasedExtractor;

use crate::models::receipt::ExtractionResult;

/// Trait for receipt field extraction.
///
/// Implementations are pure functions of the text: they terminate on every
/// input and never fail. A field that no pattern matched is simply absent.
pub trait ReceiptExtractor {
    /// Extract structured fields from receipt text.
    fn extract(&self, text: &str) -> ExtractionResult;
}
