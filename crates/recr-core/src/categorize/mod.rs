//! Keyword-based expense categorization.
//!
//! The keyword table is an ordered rule list evaluated first-match-wins, not
//! an associative lookup: keywords overlap (brand names vs generic words
//! like "food"), so declaration order is the priority order and must not be
//! disturbed. Generic catch-alls sit at the end of their blocks.

use lazy_static::lazy_static;

use crate::models::receipt::Category;
use crate::models::receipt::Category::{Food, Other, Shopping, Travel, Utilities};

lazy_static! {
    /// Ordered keyword -> category rules. First keyword contained in the
    /// lowercased vendor+description text decides the category.
    pub static ref CATEGORY_KEYWORDS: Vec<(&'static str, Category)> = vec![
        // Food & dining - delivery apps
        ("swiggy", Food),
        ("zomato", Food),
        ("uber eats", Food),
        ("ubereats", Food),
        ("doordash", Food),
        ("grubhub", Food),
        ("deliveroo", Food),
        ("foodpanda", Food),
        ("dunzo", Food),
        // Food & dining - quick commerce / grocery apps
        ("bigbasket", Food),
        ("blinkit", Food),
        ("zepto", Food),
        ("instamart", Food),
        ("grofers", Food),
        ("jiomart", Food),
        ("dmart", Food),
        ("reliance fresh", Food),
        ("more supermarket", Food),
        // Food & dining - restaurants & cafes
        ("starbucks", Food),
        ("mcdonald", Food),
        ("subway", Food),
        ("pizza", Food),
        ("domino", Food),
        ("pizza hut", Food),
        ("kfc", Food),
        ("burger king", Food),
        ("restaurant", Food),
        ("cafe", Food),
        ("coffee", Food),
        ("burger", Food),
        ("kitchen", Food),
        ("dining", Food),
        ("food", Food),
        ("bakery", Food),
        ("chai", Food),
        ("biryani", Food),
        // Food & dining - grocery
        ("grocery", Food),
        ("market", Food),
        ("supermarket", Food),
        ("walmart", Shopping),
        ("costco", Shopping),
        ("target", Shopping),
        // Travel - ride sharing
        ("uber", Travel),
        ("lyft", Travel),
        ("ola", Travel),
        ("ola cabs", Travel),
        ("rapido", Travel),
        ("meru", Travel),
        ("grab", Travel),
        ("gojek", Travel),
        ("didi", Travel),
        // Travel - airlines & hotels
        ("airline", Travel),
        ("airways", Travel),
        ("indigo", Travel),
        ("air india", Travel),
        ("spicejet", Travel),
        ("vistara", Travel),
        ("emirates", Travel),
        ("hotel", Travel),
        ("oyo", Travel),
        ("airbnb", Travel),
        ("makemytrip", Travel),
        ("goibibo", Travel),
        ("booking.com", Travel),
        ("cleartrip", Travel),
        ("yatra", Travel),
        // Travel - transport
        ("rental", Travel),
        ("gas", Travel),
        ("fuel", Travel),
        ("petrol", Travel),
        ("diesel", Travel),
        ("parking", Travel),
        ("transit", Travel),
        ("train", Travel),
        ("irctc", Travel),
        ("bus", Travel),
        ("redbus", Travel),
        ("metro", Travel),
        // Shopping - e-commerce
        ("amazon", Shopping),
        ("flipkart", Shopping),
        ("myntra", Shopping),
        ("ajio", Shopping),
        ("nykaa", Shopping),
        ("meesho", Shopping),
        ("snapdeal", Shopping),
        ("ebay", Shopping),
        ("alibaba", Shopping),
        // Shopping - general
        ("store", Shopping),
        ("shop", Shopping),
        ("retail", Shopping),
        ("mall", Shopping),
        ("electronics", Shopping),
        ("croma", Shopping),
        ("reliance digital", Shopping),
        // Utilities - telecom
        ("jio", Utilities),
        ("airtel", Utilities),
        ("vodafone", Utilities),
        ("vi", Utilities),
        ("bsnl", Utilities),
        ("verizon", Utilities),
        ("at&t", Utilities),
        ("t-mobile", Utilities),
        // Utilities - internet & services
        ("electric", Utilities),
        ("electricity", Utilities),
        ("water", Utilities),
        ("internet", Utilities),
        ("broadband", Utilities),
        ("phone", Utilities),
        ("mobile", Utilities),
        ("utility", Utilities),
        ("comcast", Utilities),
        ("act fibernet", Utilities),
        // Utilities - streaming & subscriptions
        ("netflix", Utilities),
        ("prime video", Utilities),
        ("hotstar", Utilities),
        ("disney", Utilities),
        ("spotify", Utilities),
        ("apple music", Utilities),
        ("youtube", Utilities),
        // Utilities - payments & finance
        ("paytm", Utilities),
        ("phonepe", Utilities),
        ("gpay", Utilities),
        ("google pay", Utilities),
        ("bharatpe", Utilities),
    ];
}

/// Assign a category from vendor and description text.
///
/// Pure and total: scans the ordered keyword table over the lowercased
/// concatenation and returns the first hit, or [`Category::Other`].
pub fn categorize(vendor: &str, description: Option<&str>) -> Category {
    let search_text = format!("{} {}", vendor, description.unwrap_or("")).to_lowercase();

    for (keyword, category) in CATEGORY_KEYWORDS.iter() {
        if search_text.contains(keyword) {
            return *category;
        }
    }

    Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_app_is_food() {
        assert_eq!(categorize("Swiggy", None), Food);
        assert_eq!(categorize("Zomato", Some("Order from somewhere")), Food);
    }

    #[test]
    fn test_grocery_keyword_precedes_ecommerce_block() {
        // "grocery" is declared in the Food block ahead of "amazon" in the
        // Shopping block, so the earlier keyword wins.
        assert_eq!(categorize("Amazon Fresh Grocery", Some("")), Food);
        assert_eq!(categorize("Amazon", None), Shopping);
    }

    #[test]
    fn test_uber_eats_precedes_uber() {
        assert_eq!(categorize("Uber Eats", None), Food);
        assert_eq!(categorize("Uber", Some("Trip: A to B")), Travel);
    }

    #[test]
    fn test_description_contributes() {
        assert_eq!(categorize("Acme Corp", Some("office internet bill")), Utilities);
    }

    #[test]
    fn test_unknown_is_other() {
        assert_eq!(categorize("Xyzzy Pvt Ltd", None), Other);
        assert_eq!(categorize("", Some("")), Other);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize("STARBUCKS", None), Food);
    }
}
