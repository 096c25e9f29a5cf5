//! Linear unit conversion and display rounding.

use fairway_core::constants::YARDS_PER_METER;

pub fn meters_to_yards(meters: f64) -> f64 {
    meters * YARDS_PER_METER
}

pub fn yards_to_meters(yards: f64) -> f64 {
    yards / YARDS_PER_METER
}

/// Round to whole yards. `None` for non-finite or negative input.
pub fn round_yards(yards: f64) -> Option<u32> {
    if !yards.is_finite() || yards < 0.0 {
        return None;
    }
    Some(yards.round() as u32)
}
