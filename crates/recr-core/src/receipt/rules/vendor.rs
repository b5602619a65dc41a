//! Vendor resolution.
//!
//! The registry is an ordered rule list, not a lookup table: descriptors are
//! scanned in declaration order and the first one with any matching rule
//! wins. Delivery apps are declared before generic restaurant brands so a
//! delivery receipt resolves to the app, and "Uber Eats" is declared before
//! "Uber" so the ride-share rule never claims a food order.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{BARE_ID_LINE, HAS_LETTER, LABEL_LINE, LEADING_DATE_LINE};

/// One recognition rule: a positive pattern with an optional negative guard.
///
/// The guard stands in for negative lookahead, which the regex crate does
/// not support; given the registry order the observable behavior matches.
pub struct VendorRule {
    pattern: Regex,
    unless: Option<Regex>,
}

impl VendorRule {
    fn new(pattern: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            unless: None,
        }
    }

    fn guarded(pattern: &str, unless: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            unless: Some(Regex::new(unless).unwrap()),
        }
    }

    /// Test the rule against the full receipt text.
    pub fn matches(&self, text: &str) -> bool {
        if !self.pattern.is_match(text) {
            return false;
        }
        match &self.unless {
            Some(guard) => !guard.is_match(text),
            None => true,
        }
    }
}

/// A known merchant identity: display name plus its ordered rules.
pub struct VendorDescriptor {
    pub name: &'static str,
    pub rules: Vec<VendorRule>,
}

impl VendorDescriptor {
    fn new(name: &'static str, patterns: &[&str]) -> Self {
        Self {
            name,
            rules: patterns.iter().map(|p| VendorRule::new(p)).collect(),
        }
    }

    /// Whether any rule of this descriptor matches.
    pub fn matches(&self, text: &str) -> bool {
        self.rules.iter().any(|r| r.matches(text))
    }
}

lazy_static! {
    /// Known vendors in priority order. Declaration order is load-bearing.
    pub static ref VENDOR_REGISTRY: Vec<VendorDescriptor> = vec![
        // Food delivery apps
        VendorDescriptor::new("Swiggy", &[r"(?i)swiggy", r"(?i)bundl\s*technologies"]),
        VendorDescriptor::new("Zomato", &[r"(?i)zomato", r"(?i)zomato\s*media"]),
        VendorDescriptor::new("Uber Eats", &[r"(?i)uber\s*eats", r"(?i)ubereats"]),
        VendorDescriptor::new("DoorDash", &[r"(?i)doordash", r"(?i)door\s*dash"]),
        VendorDescriptor::new("Grubhub", &[r"(?i)grubhub", r"(?i)grub\s*hub"]),
        // Ride-sharing
        VendorDescriptor {
            name: "Uber",
            rules: vec![
                VendorRule::guarded(r"(?i)\buber\b", r"(?i)uber\s*eats"),
                VendorRule::new(r"(?i)uber\s*trip"),
                VendorRule::new(r"(?i)uber\s*ride"),
                VendorRule::new(r"(?i)uber\s*technologies"),
            ],
        },
        VendorDescriptor::new("Lyft", &[r"(?i)lyft"]),
        VendorDescriptor::new("Ola", &[r"(?i)\bola\b", r"(?i)ola\s*cabs", r"(?i)ani\s*technologies"]),
        VendorDescriptor::new("Rapido", &[r"(?i)rapido"]),
        // E-commerce
        VendorDescriptor::new("Amazon", &[r"(?i)amazon", r"(?i)amzn"]),
        VendorDescriptor::new("Flipkart", &[r"(?i)flipkart"]),
        VendorDescriptor::new("Myntra", &[r"(?i)myntra"]),
        VendorDescriptor::new("Walmart", &[r"(?i)walmart", r"(?i)wal-mart"]),
        VendorDescriptor::new("Target", &[r"(?i)target"]),
        VendorDescriptor::new("eBay", &[r"(?i)ebay", r"(?i)e-bay"]),
        // Food & restaurant
        VendorDescriptor::new("Starbucks", &[r"(?i)starbucks"]),
        VendorDescriptor::new("McDonalds", &[r"(?i)mcdonald", r"(?i)mc\s*donald"]),
        VendorDescriptor::new("Subway", &[r"(?i)subway"]),
        VendorDescriptor::new("Dominos", &[r"(?i)domino"]),
        VendorDescriptor::new("Pizza Hut", &[r"(?i)pizza\s*hut"]),
        VendorDescriptor::new("KFC", &[r"(?i)\bkfc\b", r"(?i)kentucky\s*fried"]),
        VendorDescriptor::new("Burger King", &[r"(?i)burger\s*king"]),
        // Grocery / quick commerce
        VendorDescriptor::new("BigBasket", &[r"(?i)bigbasket", r"(?i)big\s*basket"]),
        VendorDescriptor::new("Blinkit", &[r"(?i)blinkit", r"(?i)grofers"]),
        VendorDescriptor::new("Zepto", &[r"(?i)zepto"]),
        VendorDescriptor::new("Instamart", &[r"(?i)instamart"]),
        // Subscriptions & services
        VendorDescriptor::new("Netflix", &[r"(?i)netflix"]),
        VendorDescriptor::new("Spotify", &[r"(?i)spotify"]),
        VendorDescriptor::new("Apple", &[r"(?i)apple\s*(?:inc|store)?", r"(?i)itunes", r"(?i)app\s*store"]),
        VendorDescriptor::new("Google", &[r"(?i)google"]),
        VendorDescriptor::new("Microsoft", &[r"(?i)microsoft"]),
        // Telecom
        VendorDescriptor::new("Jio", &[r"(?i)\bjio\b", r"(?i)reliance\s*jio"]),
        VendorDescriptor::new("Airtel", &[r"(?i)airtel", r"(?i)bharti\s*airtel"]),
        VendorDescriptor::new("Vodafone", &[r"(?i)vodafone", r"(?i)vi\s"]),
        VendorDescriptor::new("Verizon", &[r"(?i)verizon"]),
        VendorDescriptor::new("AT&T", &[r"(?i)at&t", r"(?i)att\b"]),
    ];

    static ref CLASS_FOOD_DELIVERY: Regex =
        Regex::new(r"(?i)swiggy|zomato|uber eats|doordash|grubhub").unwrap();
    static ref CLASS_CINEMA: Regex =
        Regex::new(r"(?i)pvr|inox|cinepolis|amc|theater|cinema").unwrap();
    static ref CLASS_RIDE_SHARE: Regex =
        Regex::new(r"(?i)uber|ola|lyft|rapido").unwrap();
}

/// Closed vendor classification driving description extraction.
///
/// Resolved once from the vendor display name; fallback header-line vendors
/// classify too (e.g. "PVR Cinemas" is [`VendorClass::Cinema`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorClass {
    FoodDelivery,
    Cinema,
    RideShare,
    Generic,
}

impl VendorClass {
    /// Classify a vendor display name.
    pub fn classify(vendor: &str) -> Self {
        if CLASS_FOOD_DELIVERY.is_match(vendor) {
            VendorClass::FoodDelivery
        } else if CLASS_CINEMA.is_match(vendor) {
            VendorClass::Cinema
        } else if CLASS_RIDE_SHARE.is_match(vendor) {
            VendorClass::RideShare
        } else {
            VendorClass::Generic
        }
    }
}

/// Resolve the vendor for a receipt.
///
/// Scans the registry in declaration order; if nothing matches, falls back
/// to the first plausible header line: the vendor name is usually printed
/// near the top of the document with no leading label.
pub fn extract_vendor(text: &str) -> Option<String> {
    for descriptor in VENDOR_REGISTRY.iter() {
        if descriptor.matches(text) {
            return Some(descriptor.name.to_string());
        }
    }

    let lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    for line in lines.take(5) {
        let len = line.chars().count();
        if len > 2
            && len < 50
            && HAS_LETTER.is_match(line)
            && !LABEL_LINE.is_match(line)
            && !LEADING_DATE_LINE.is_match(line)
            && !BARE_ID_LINE.is_match(line)
        {
            return Some(line.to_string());
        }
    }

    None
}
