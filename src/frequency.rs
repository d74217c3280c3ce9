//! Frequency bands.
//!
//! Two frequencies (per million tokens) are similar if they fall in the same
//! band and are close enough within it:
//!
//! - below 10: at most 1 apart
//! - 100 and above: any distance, as long as both are at least 100
//! - otherwise: at most 5 apart, and a candidate at or below 10 must also be
//!   at most 1 apart

/// Upper limit of the low band.
pub const LOW_LIMIT: f64 = 10.0;
/// Lower limit of the high band.
pub const HIGH_LIMIT: f64 = 100.0;
/// Tolerance in the low band.
pub const LOW_TOLERANCE: f64 = 1.0;
/// Tolerance in the middle band.
pub const MID_TOLERANCE: f64 = 5.0;

fn within(target: f64, candidate: f64, tolerance: f64) -> bool {
    target - tolerance <= candidate && candidate <= target + tolerance
}

/// Is `candidate` similar enough to the reference frequency `target`?
pub fn frequency_check(target: f64, candidate: f64) -> bool {
    if target < LOW_LIMIT {
        within(target, candidate, LOW_TOLERANCE)
    } else if target >= HIGH_LIMIT && candidate >= HIGH_LIMIT {
        true
    } else if within(target, candidate, MID_TOLERANCE) {
        candidate > LOW_LIMIT || within(target, candidate, LOW_TOLERANCE)
    } else {
        false
    }
}

/// Ranking key: absolute difference between two frequencies.
pub fn distance(target: f64, candidate: f64) -> f64 {
    (target - candidate).abs()
}

/// Human-readable tolerance for a reference frequency.
pub fn describe_band(target: f64) -> String {
    if target < LOW_LIMIT {
        format!("±{LOW_TOLERANCE} per million")
    } else if target >= HIGH_LIMIT {
        format!("any frequency ≥ {HIGH_LIMIT} per million")
    } else {
        format!("±{MID_TOLERANCE} per million")
    }
}
