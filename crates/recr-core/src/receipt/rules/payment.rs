//! Payment method extraction.

use super::patterns::PAYMENT_PATTERNS;
use super::FieldExtractor;

/// Payment method extractor: a labelled "paid via/by/using" phrase first,
/// then bare wallet/bank keywords, then card networks.
pub struct PaymentMethodExtractor;

impl PaymentMethodExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PaymentMethodExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

impl FieldExtractor for PaymentMethodExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        for (pattern, group) in PAYMENT_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(text) {
                if let Some(m) = caps.get(*group) {
                    return Some(capitalize(m.as_str().trim()));
                }
            }
        }
        None
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();
        for (pattern, group) in PAYMENT_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                if let Some(m) = caps.get(*group) {
                    let method = capitalize(m.as_str().trim());
                    if !results.contains(&method) {
                        results.push(method);
                    }
                }
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_phrase_captures_remainder() {
        let extractor = PaymentMethodExtractor::new();
        assert_eq!(
            extractor.extract("Paid via UPI\nThank you"),
            Some("Upi".to_string())
        );
    }

    #[test]
    fn test_labelled_beats_keyword() {
        let extractor = PaymentMethodExtractor::new();
        // "cash" appears first in the text but the labelled phrase wins
        assert_eq!(
            extractor.extract("cash counter\nPayment Method: Credit Card"),
            Some("Credit card".to_string())
        );
    }

    #[test]
    fn test_bare_keyword() {
        let extractor = PaymentMethodExtractor::new();
        assert_eq!(
            extractor.extract("Settled with PhonePe wallet"),
            Some("Phonepe".to_string())
        );
    }

    #[test]
    fn test_card_network_last() {
        let extractor = PaymentMethodExtractor::new();
        assert_eq!(
            extractor.extract("VISA ending 4242"),
            Some("Visa".to_string())
        );
    }

    #[test]
    fn test_recasing() {
        let extractor = PaymentMethodExtractor::new();
        assert_eq!(
            extractor.extract("paid using NET BANKING"),
            Some("Net banking".to_string())
        );
    }

    #[test]
    fn test_no_method() {
        let extractor = PaymentMethodExtractor::new();
        assert_eq!(extractor.extract("no payment info"), None);
    }
}
