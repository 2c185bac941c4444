use serde::{Deserialize, Serialize};

/// Coarse pricing tier derived from the seat row. Never stored on a seat;
/// classification is total and recomputed on every read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FareClass {
    Business,
    PremiumEconomy,
    Economy,
}

/// Cabin bands, first match wins.
const BUSINESS_ROWS: std::ops::RangeInclusive<i32> = 1..=6;
const PREMIUM_ROWS: std::ops::RangeInclusive<i32> = 7..=14;

/// Map a seat row to its fare class.
///
/// Total over all integers: anything outside the business and premium
/// bands (including 0, negatives, and rows >= 15) is Economy.
pub fn classify(row: i32) -> FareClass {
    if BUSINESS_ROWS.contains(&row) {
        FareClass::Business
    } else if PREMIUM_ROWS.contains(&row) {
        FareClass::PremiumEconomy
    } else {
        FareClass::Economy
    }
}

impl FareClass {
    /// Fixed fare multiplier for this class.
    pub fn multiplier(&self) -> f64 {
        match self {
            FareClass::Business => 1.8,
            FareClass::PremiumEconomy => 1.4,
            FareClass::Economy => 1.0,
        }
    }

    /// Presentation tag for seat-map rendering. No business meaning.
    pub fn color_tag(&self) -> &'static str {
        match self {
            FareClass::Business => "yellow",
            FareClass::PremiumEconomy => "blue",
            FareClass::Economy => "gray",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FareClass::Business => "Business",
            FareClass::PremiumEconomy => "Premium Economy",
            FareClass::Economy => "Economy",
        }
    }
}
