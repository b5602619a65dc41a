//! Order/transaction identifier extraction.

use super::patterns::ORDER_ID_PATTERNS;
use super::FieldExtractor;

/// Order id extractor: labelled order/transaction/invoice/receipt tokens in
/// that order, then a bare `#TOKEN` of six or more characters.
pub struct OrderIdExtractor;

impl OrderIdExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OrderIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for OrderIdExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        for pattern in ORDER_ID_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(text) {
                let token = caps[1].trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
        None
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();
        for pattern in ORDER_ID_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                let token = caps[1].trim().to_string();
                if !token.is_empty() && !results.contains(&token) {
                    results.push(token);
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
    fn test_labelled_order_id() {
        let extractor = OrderIdExtractor::new();
        assert_eq!(
            extractor.extract("Order ID: SWGY-20240115-001"),
            Some("SWGY-20240115-001".to_string())
        );
    }

    #[test]
    fn test_order_label_beats_hash_token() {
        let extractor = OrderIdExtractor::new();
        assert_eq!(
            extractor.extract("#ABCDEF99\nOrder No: 7741"),
            Some("7741".to_string())
        );
    }

    #[test]
    fn test_bare_hash_token_needs_six_chars() {
        let extractor = OrderIdExtractor::new();
        assert_eq!(
            extractor.extract("Ref # TXN-88421"),
            Some("TXN-88421".to_string())
        );
        assert_eq!(extractor.extract("Seat #12"), None);
    }

    #[test]
    fn test_no_id() {
        let extractor = OrderIdExtractor::new();
        assert_eq!(extractor.extract("thanks for visiting"), None);
    }
}
