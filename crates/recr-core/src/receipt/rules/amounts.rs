//! Amount extraction.
//!
//! Every match from every pattern family is collected as a candidate; the
//! final amount is the global maximum. The policy assumes the largest number
//! on a receipt is the grand total, which can lose to an unrelated large
//! number (a phone number, a loyalty balance) on unusual layouts.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT_PATTERNS;
use super::FieldExtractor;

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut candidates = Vec::new();

        for pattern in AMOUNT_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                let cleaned = caps[1].replace(',', "");
                if let Ok(amount) = Decimal::from_str(&cleaned) {
                    // Zero and negative parses are not candidates
                    if amount > Decimal::ZERO {
                        candidates.push(amount);
                    }
                }
            }
        }

        candidates
    }
}

/// Extract the transaction amount: the maximum candidate across all
/// pattern families, or `None` if nothing matched anywhere.
pub fn extract_amount(text: &str) -> Option<Decimal> {
    AmountExtractor::new().extract_all(text).into_iter().max()
}

/// Format an amount in the fixed export style: two decimals, comma-grouped
/// thousands (12345678.9 -> "12,345,678.90").
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount);
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("{}{}.{}", sign, grouped, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_total_beats_tax_line() {
        let text = "Subtotal\nTax: ₹10.00\nTotal: ₹120.50\n";
        assert_eq!(
            extract_amount(text),
            Some(Decimal::from_str("120.50").unwrap())
        );
    }

    #[test]
    fn test_maximum_across_families() {
        let text = "Item one $12.00\nItem two $9.99\nTotal: $25.49";
        assert_eq!(
            extract_amount(text),
            Some(Decimal::from_str("25.49").unwrap())
        );
    }

    #[test]
    fn test_thousands_separator_stripped() {
        let text = "Grand Total: ₹1,234.56";
        assert_eq!(
            extract_amount(text),
            Some(Decimal::from_str("1234.56").unwrap())
        );
    }

    #[test]
    fn test_zero_discarded() {
        assert_eq!(extract_amount("Amount due: ₹0.00"), None);
    }

    #[test]
    fn test_no_amount() {
        assert_eq!(extract_amount("thanks for shopping"), None);
    }

    #[test]
    fn test_idempotent() {
        let text = "Total: ₹120.50 Tax: ₹10.00";
        assert_eq!(extract_amount(text), extract_amount(text));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(
            format_amount(Decimal::from_str("1234.5").unwrap()),
            "1,234.50"
        );
        assert_eq!(
            format_amount(Decimal::from_str("12345678.90").unwrap()),
            "12,345,678.90"
        );
        assert_eq!(format_amount(Decimal::from_str("30.5").unwrap()), "30.50");
    }
}
