//! Contamination-rate calculation for swab monitoring.
//!
//! The contamination rate of an area is the share of its swab samples
//! whose lab result is FAIL, as a percentage rounded to one decimal
//! place. An empty sample set has rate 0, never NaN and never an error.

/// Contamination rate in percent, one decimal place.
///
/// `failures` counts FAIL results within the subset; `total` counts every
/// sample in the subset (pending results included).
pub fn rate(failures: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(failures as f64 / total as f64 * 100.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
