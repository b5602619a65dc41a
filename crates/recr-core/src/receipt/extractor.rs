//! Rule-based receipt extractor combining the per-field sub-extractors.

use tracing::debug;

use crate::models::receipt::ExtractionResult;

use super::rules::{
    extract_amount, extract_description, extract_vendor, DateExtractor, FieldExtractor,
    OrderIdExtractor, PaymentMethodExtractor,
};
use super::ReceiptExtractor;

/// Extractor built from ordered heuristic pattern chains.
///
/// Six sub-extractors each own one field and consult only the raw text;
/// description additionally sees the resolved vendor, so vendor resolution
/// runs first.
pub struct RuleBasedExtractor {
    dates: DateExtractor,
    order_ids: OrderIdExtractor,
    payment: PaymentMethodExtractor,
}

impl RuleBasedExtractor {
    pub fn new() -> Self {
        Self {
            dates: DateExtractor::new(),
            order_ids: OrderIdExtractor::new(),
            payment: PaymentMethodExtractor::new(),
        }
    }
}

impl Default for RuleBasedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptExtractor for RuleBasedExtractor {
    fn extract(&self, text: &str) -> ExtractionResult {
        let vendor = extract_vendor(text);
        let description = extract_description(text, vendor.as_deref());

        let result = ExtractionResult {
            transaction_date: self.dates.extract(text),
            amount: extract_amount(text),
            description: Some(description),
            order_id: self.order_ids.extract(text),
            payment_method: self.payment.extract(text),
            vendor,
        };

        debug!(
            vendor = result.vendor.as_deref().unwrap_or("-"),
            amount = %result.amount.map(|a| a.to_string()).unwrap_or_else(|| "-".into()),
            "extracted receipt fields"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    use super::*;

    fn extract(text: &str) -> ExtractionResult {
        RuleBasedExtractor::new().extract(text)
    }

    #[test]
    fn test_full_food_delivery_receipt() {
        let text = "Swiggy\n\
                    Order ID: SWGY-20240115-001\n\
                    Restaurant: Biryani Palace\n\
                    Date: 15/01/2024\n\
                    Item total: ₹320.00\n\
                    Delivery fee: ₹30.00\n\
                    Grand Total: ₹350.00\n\
                    Paid via UPI\n";
        let result = extract(text);

        assert_eq!(result.vendor, Some("Swiggy".to_string()));
        assert_eq!(result.transaction_date, Some("15/01/2024".to_string()));
        assert_eq!(result.amount, Some(Decimal::from_str("350.00").unwrap()));
        assert_eq!(
            result.description,
            Some("Order from Biryani Palace".to_string())
        );
        assert_eq!(result.order_id, Some("SWGY-20240115-001".to_string()));
        assert_eq!(result.payment_method, Some("Upi".to_string()));
    }

    #[test]
    fn test_registry_priority_beats_restaurant_keyword() {
        // Both "Swiggy" and "restaurant" appear; the registry entry wins
        // over any generic fallback.
        let text = "Delivered by Swiggy from a restaurant near you\nTotal: ₹120.50";
        let result = extract(text);
        assert_eq!(result.vendor, Some("Swiggy".to_string()));
    }

    #[test]
    fn test_amount_is_maximum_candidate() {
        let text = "Total: ₹120.50\nTax: ₹10.00";
        let result = extract(text);
        assert_eq!(result.amount, Some(Decimal::from_str("120.50").unwrap()));
    }

    #[test]
    fn test_empty_text_yields_absent_fields() {
        let result = extract("");
        assert_eq!(result.transaction_date, None);
        assert_eq!(result.vendor, None);
        assert_eq!(result.amount, None);
        assert_eq!(result.order_id, None);
        assert_eq!(result.payment_method, None);
        // Description always synthesizes its terminal fallback
        assert_eq!(result.description, Some("Transaction".to_string()));
    }

    #[test]
    fn test_never_fails_on_arbitrary_text() {
        for text in [
            "\u{0}\u{1}\u{2}",
            "🧾🧾🧾",
            "a\nb\nc\nd\ne\nf\ng",
            "##########",
            "₹₹₹ $$$ ...",
        ] {
            let _ = extract(text);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Zomato order\nTotal: ₹99.00\n#ZMT-123456";
        let a = extract(text);
        let b = extract(text);
        assert_eq!(a.vendor, b.vendor);
        assert_eq!(a.amount, b.amount);
        assert_eq!(a.order_id, b.order_id);
    }
}
