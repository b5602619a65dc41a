//! Description synthesis.
//!
//! The only sub-extractor with an intra-record dependency: it dispatches on
//! the already-resolved vendor's class before falling through to generic
//! label patterns, an items-block heuristic, and a meaningful-lines
//! fallback. Always produces a value; the terminal fallback is the literal
//! "Transaction".

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{BARE_ID_LINE, LEADING_DATE_LINE, MEANINGFUL_LABEL_LINE};
use super::vendor::VendorClass;

lazy_static! {
    // Food delivery: restaurant / items / cuisine lines
    static ref FOOD_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:restaurant|from|ordered from)[:\s]+([^\n]{3,40})").unwrap(),
        Regex::new(r"(?i)(?:items?|dish|meal)[:\s]+([^\n]{3,50})").unwrap(),
        Regex::new(r"(?i)(?:cuisine|menu)[:\s]+([^\n]{3,40})").unwrap(),
    ];

    // Cinema: movie / ticket / screen lines
    static ref ENTERTAINMENT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:movie|film|show)[:\s]+([^\n]{3,50})").unwrap(),
        Regex::new(r"(?i)(?:tickets?|seats?)[:\s]+([^\n]{3,50})").unwrap(),
        Regex::new(r"(?i)(?:screen|hall|theater)[:\s]+([^\n]{3,40})").unwrap(),
    ];

    // Ride share: a pickup/drop pair searched over the whole text, then
    // generic travel phrases
    static ref TRIP_PATTERN: Regex =
        Regex::new(r"(?i)(?:from|pickup)[:\s]*([^\n,]{3,30}).*?(?:to|drop)[:\s]*([^\n]{3,30})").unwrap();

    static ref TRAVEL_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:from|pickup)[:\s]+([^\n]{3,40})(?:to|drop)[:\s]+([^\n]{3,40})").unwrap(),
        Regex::new(r"(?i)(?:trip|ride|journey)[:\s]+([^\n]{3,50})").unwrap(),
        Regex::new(r"(?i)(?:route|destination)[:\s]+([^\n]{3,40})").unwrap(),
    ];

    // Generic label patterns, scanned line by line; general before shopping
    static ref GENERAL_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:description|details)[:\s]+(.*)").unwrap(),
        Regex::new(r"(?i)(?:for|regarding)[:\s]+(.*)").unwrap(),
    ];

    static ref SHOPPING_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:product|item)[:\s]+([^\n]{3,50})").unwrap(),
        Regex::new(r"(?i)(?:brand|model)[:\s]+([^\n]{3,40})").unwrap(),
    ];

    // Items block: a line that is exactly the word item(s)/product(s)/order(s)
    static ref ITEMS_HEADER: Regex = Regex::new(r"(?i)^(?:item|product|order)s?$").unwrap();
    static ref ITEMS_EXCLUDE: Regex =
        Regex::new(r"(?i)^(?:total|subtotal|tax|amount|qty|price)").unwrap();
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Synthesize a description for the receipt, conditioned on the resolved
/// vendor when one is available.
pub fn extract_description(text: &str, vendor: Option<&str>) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    // Vendor-specific branches first
    if let Some(vendor) = vendor {
        match VendorClass::classify(vendor) {
            VendorClass::FoodDelivery => {
                for pattern in FOOD_PATTERNS.iter() {
                    for line in &lines {
                        if let Some(caps) = pattern.captures(line) {
                            let detail = &caps[1];
                            if detail.chars().count() > 3 {
                                return format!("Order from {}", detail);
                            }
                        }
                    }
                }
            }
            VendorClass::Cinema => {
                for pattern in ENTERTAINMENT_PATTERNS.iter() {
                    for line in &lines {
                        if let Some(caps) = pattern.captures(line) {
                            return format!("Movie: {}", &caps[1]);
                        }
                    }
                }
            }
            VendorClass::RideShare => {
                if let Some(caps) = TRIP_PATTERN.captures(text) {
                    return format!("Trip: {} to {}", caps[1].trim(), caps[2].trim());
                }
                for pattern in TRAVEL_PATTERNS.iter() {
                    if let Some(caps) = pattern.captures(text) {
                        return format!("Ride: {}", &caps[1]);
                    }
                }
            }
            VendorClass::Generic => {}
        }
    }

    // Generic label patterns, line by line
    for pattern in GENERAL_PATTERNS.iter().chain(SHOPPING_PATTERNS.iter()) {
        for line in &lines {
            if let Some(caps) = pattern.captures(line) {
                let detail = caps[1].trim();
                let len = detail.chars().count();
                if len > 3 && len < 100 {
                    return detail.to_string();
                }
            }
        }
    }

    // Items block: take up to three lines after an item(s)/product(s)/
    // order(s) header, excluding summary labels
    if let Some(start) = lines.iter().position(|l| ITEMS_HEADER.is_match(l)) {
        if start < lines.len() - 1 {
            let items = lines[start + 1..(start + 4).min(lines.len())]
                .iter()
                .filter(|l| {
                    let len = l.chars().count();
                    len > 2 && len < 50 && !ITEMS_EXCLUDE.is_match(l)
                })
                .copied()
                .collect::<Vec<_>>()
                .join(", ");
            if items.chars().count() > 5 {
                return truncate_chars(&items, 100);
            }
        }
    }

    // Last resort: the first two meaningful lines
    let meaningful = lines
        .iter()
        .filter(|l| {
            let len = l.chars().count();
            len > 5
                && len < 60
                && !MEANINGFUL_LABEL_LINE.is_match(l)
                && !LEADING_DATE_LINE.is_match(l)
                && !BARE_ID_LINE.is_match(l)
        })
        .take(2)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");

    let truncated = truncate_chars(&meaningful, 100);
    if truncated.is_empty() {
        "Transaction".to_string()
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_delivery_order_from() {
        let text = "Swiggy\nRestaurant: Biryani Palace\nTotal: ₹350.00";
        assert_eq!(
            extract_description(text, Some("Swiggy")),
            "Order from Biryani Palace"
        );
    }

    #[test]
    fn test_cinema_movie() {
        let text = "PVR Cinemas\nMovie: Interstellar\nScreen: Audi 3";
        assert_eq!(
            extract_description(text, Some("PVR Cinemas")),
            "Movie: Interstellar"
        );
    }

    #[test]
    fn test_ride_share_trip() {
        let text = "Uber\nPickup: MG Road, Drop: Airport Terminal 2";
        assert_eq!(
            extract_description(text, Some("Uber")),
            "Trip: MG Road to Airport Terminal 2"
        );
    }

    #[test]
    fn test_general_label_without_vendor() {
        let text = "Description: Annual plan renewal\nAmount: 999.00";
        assert_eq!(extract_description(text, None), "Annual plan renewal");
    }

    #[test]
    fn test_items_block() {
        let text = "Items\nMasala Dosa\nFilter Coffee\nTotal: 180.00";
        assert_eq!(extract_description(text, None), "Masala Dosa, Filter Coffee");
    }

    #[test]
    fn test_meaningful_lines_fallback() {
        let text = "Corner Bakery\nFresh breads daily\nGST 5%";
        assert_eq!(
            extract_description(text, None),
            "Corner Bakery, Fresh breads daily"
        );
    }

    #[test]
    fn test_terminal_fallback() {
        assert_eq!(extract_description("x\n123\n", None), "Transaction");
    }
}
