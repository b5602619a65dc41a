//! Rule-based field extractors for receipt text.

pub mod amounts;
pub mod dates;
pub mod description;
pub mod ids;
pub mod patterns;
pub mod payment;
pub mod vendor;

pub use amounts::{extract_amount, format_amount, AmountExtractor};
pub use dates::DateExtractor;
pub use description::extract_description;
pub use ids::OrderIdExtractor;
pub use payment::PaymentMethodExtractor;
pub use vendor::{extract_vendor, VendorClass, VendorDescriptor};

/// Trait for field extractors.
///
/// Extractors are pure and total: no match yields `None`, never an error.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
