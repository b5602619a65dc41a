//! Transaction date extraction.
//!
//! The matched substring is returned as-is. Receipts carry no locale hint,
//! so D/M vs M/D is never disambiguated and no calendar type is produced.

use super::patterns::DATE_PATTERNS;
use super::FieldExtractor;

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        // First family with any match wins
        for pattern in DATE_PATTERNS.iter() {
            if let Some(m) = pattern.find(text) {
                return Some(m.as_str().to_string());
            }
        }
        None
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();
        for pattern in DATE_PATTERNS.iter() {
            for m in pattern.find_iter(text) {
                let matched = m.as_str().to_string();
                if !results.contains(&matched) {
                    results.push(matched);
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
    fn test_extract_numeric_date() {
        let extractor = DateExtractor::new();
        assert_eq!(
            extractor.extract("Date: 15/01/2024 10:32"),
            Some("15/01/2024".to_string())
        );
    }

    #[test]
    fn test_extract_iso_date() {
        let extractor = DateExtractor::new();
        assert_eq!(
            extractor.extract("Issued 2024-01-15"),
            Some("2024-01-15".to_string())
        );
    }

    #[test]
    fn test_extract_month_name_dates() {
        let extractor = DateExtractor::new();
        assert_eq!(
            extractor.extract("Paid on Jan 15, 2024"),
            Some("Jan 15, 2024".to_string())
        );
        assert_eq!(
            extractor.extract("Delivered 15 January 2024"),
            Some("15 January 2024".to_string())
        );
    }

    #[test]
    fn test_numeric_family_beats_month_name() {
        // Both forms present: the numeric family is declared first
        let extractor = DateExtractor::new();
        assert_eq!(
            extractor.extract("Jan 20, 2024 and also 15/01/2024"),
            Some("15/01/2024".to_string())
        );
    }

    #[test]
    fn test_no_date() {
        let extractor = DateExtractor::new();
        assert_eq!(extractor.extract("no dates here"), None);
    }

    #[test]
    fn test_raw_substring_not_normalized() {
        let extractor = DateExtractor::new();
        // Ambiguous D/M vs M/D stays exactly as printed
        assert_eq!(
            extractor.extract("03/04/2024"),
            Some("03/04/2024".to_string())
        );
    }
}
