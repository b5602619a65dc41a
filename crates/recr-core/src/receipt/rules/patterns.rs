//! Common regex patterns for receipt field extraction.
//!
//! Pattern lists are ordered: each list encodes a priority policy (labelled
//! phrasing beats generic tokens), and reordering changes output on
//! ambiguous inputs.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Date pattern families, tried in order; first match wins.
    pub static ref DATE_PATTERNS: Vec<Regex> = vec![
        // D/M/Y or M/D/Y (left ambiguous on purpose)
        Regex::new(r"\b(\d{1,2})[/\-](\d{1,2})[/\-](\d{4})\b").unwrap(),
        // ISO Y/M/D
        Regex::new(r"\b(\d{4})[/\-](\d{1,2})[/\-](\d{1,2})\b").unwrap(),
        // Month D, Y (e.g. Jan 15, 2024)
        Regex::new(r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+(\d{1,2}),?\s+(\d{4})\b").unwrap(),
        // D Month Y (e.g. 15 January 2024)
        Regex::new(r"(?i)\b(\d{1,2})\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+(\d{4})\b").unwrap(),
    ];

    // Amount pattern families. Every match from every family is a candidate;
    // the largest positive value is assumed to be the grand total.
    pub static ref AMOUNT_PATTERNS: Vec<Regex> = vec![
        // Rupee-labelled total phrases
        Regex::new(r"(?i)(?:total|grand\s*total|amount\s*payable|net\s*amount|paid|to\s*pay)[:\s]*(?:₹|rs\.?|inr)\s*(\d+[,\d]*\.?\d{0,2})").unwrap(),
        // Bare rupee amounts
        Regex::new(r"(?i)(?:₹|rs\.?|inr)\s*(\d+[,\d]*\.?\d{0,2})(?:\s*(?:only|/\-)?)?").unwrap(),
        // Dollar-labelled total phrases
        Regex::new(r"(?i)(?:total|amount|sum|grand total|balance due)[:\s]*\$?\s*(\d+[,\d]*\.?\d{0,2})").unwrap(),
        // Bare dollar amounts with two decimals
        Regex::new(r"\$\s*(\d+[,\d]*\.\d{2})\b").unwrap(),
        // Generic two-decimal numeric tokens
        Regex::new(r"(?:^|\s)(\d+[,\d]*\.\d{2})(?:\s|$)").unwrap(),
    ];

    // Labelled order/transaction id patterns, then a bare #TOKEN form.
    pub static ref ORDER_ID_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)order\s*(?:id|no|number)?[:\s#]*([A-Z0-9\-]+)").unwrap(),
        Regex::new(r"(?i)transaction\s*(?:id|no)?[:\s#]*([A-Z0-9\-]+)").unwrap(),
        Regex::new(r"(?i)invoice\s*(?:id|no|number)?[:\s#]*([A-Z0-9\-]+)").unwrap(),
        Regex::new(r"(?i)receipt\s*(?:id|no|number)?[:\s#]*([A-Z0-9\-]+)").unwrap(),
        Regex::new(r"(?i)#\s*([A-Z0-9\-]{6,})").unwrap(),
    ];

    // Payment method patterns paired with the capture group to report:
    // the labelled phrase captures its remainder, the keyword sets report
    // the whole match.
    pub static ref PAYMENT_PATTERNS: Vec<(Regex, usize)> = vec![
        (Regex::new(r"(?i)(?:paid\s*(?:via|by|using)|payment\s*(?:method|mode))[:\s]*(.*)").unwrap(), 1),
        (Regex::new(r"(?i)\b(upi|gpay|google\s*pay|phonepe|paytm|credit\s*card|debit\s*card|cash|net\s*banking|wallet)\b").unwrap(), 0),
        (Regex::new(r"(?i)\b(visa|mastercard|amex|rupay)\b").unwrap(), 0),
    ];

    // Line filters shared by the vendor fallback and description fallback.
    pub static ref LABEL_LINE: Regex = Regex::new(
        r"(?i)^(?:order|invoice|receipt|transaction|date|time|total|amount|tax|gst)"
    ).unwrap();

    pub static ref MEANINGFUL_LABEL_LINE: Regex = Regex::new(
        r"(?i)^(?:order|invoice|receipt|transaction|date|time|total|subtotal|tax|gst|cgst|sgst|amount)"
    ).unwrap();

    pub static ref LEADING_DATE_LINE: Regex = Regex::new(r"^\d{2}[/\-]\d{2}[/\-]\d{4}").unwrap();

    pub static ref BARE_ID_LINE: Regex = Regex::new(r"^[#\d]+$").unwrap();

    pub static ref HAS_LETTER: Regex = Regex::new(r"[a-zA-Z]").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_families_in_order() {
        assert!(DATE_PATTERNS[0].is_match("15/01/2024"));
        assert!(DATE_PATTERNS[1].is_match("2024-01-15"));
        assert!(DATE_PATTERNS[2].is_match("Jan 15, 2024"));
        assert!(DATE_PATTERNS[3].is_match("15 January 2024"));
    }

    #[test]
    fn test_label_line_filter() {
        assert!(LABEL_LINE.is_match("Invoice No: 123"));
        assert!(LABEL_LINE.is_match("GST 18%"));
        assert!(!LABEL_LINE.is_match("Cafe Coffee Day"));
    }

    #[test]
    fn test_bare_id_line() {
        assert!(BARE_ID_LINE.is_match("#12345"));
        assert!(BARE_ID_LINE.is_match("00123"));
        assert!(!BARE_ID_LINE.is_match("ABC-123"));
    }
}
