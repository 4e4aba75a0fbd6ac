//! Medicine dosing rules.
//!
//! A prescription item carries a dosing frequency (how many times per day)
//! and a treatment duration. The dispense quantity is derived from the
//! two, never entered by hand:
//!
//! ```text
//! quantity = duration_in_days * times_per_day
//! duration_in_days = duration * {days: 1, weeks: 7, months: 30}
//! ```
//!
//! The 30-day month is a deliberate dispensing approximation and is
//! intentionally distinct from the calendar-month arithmetic used for
//! equipment servicing (see `scheduling`).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How many times per day a medicine is taken.
///
/// On the wire this is a single-character code ("1".."4"), a convention
/// inherited from prescription entry forms. Each code maps to a fixed
/// daily schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DoseFrequency {
    OnceDaily,
    TwiceDaily,
    ThriceDaily,
    FourTimesDaily,
}

impl DoseFrequency {
    /// Parses a frequency code.
    ///
    /// An unrecognised code silently falls back to [`DoseFrequency::OnceDaily`]
    /// (the Morning-only schedule). The fallback is logged so data-quality
    /// problems stay visible, but it never fails: the function is total.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => DoseFrequency::OnceDaily,
            "2" => DoseFrequency::TwiceDaily,
            "3" => DoseFrequency::ThriceDaily,
            "4" => DoseFrequency::FourTimesDaily,
            other => {
                tracing::warn!("unrecognised dose frequency code '{}', assuming once daily", other);
                DoseFrequency::OnceDaily
            }
        }
    }

    /// Number of doses per day.
    pub fn times_per_day(self) -> u32 {
        match self {
            DoseFrequency::OnceDaily => 1,
            DoseFrequency::TwiceDaily => 2,
            DoseFrequency::ThriceDaily => 3,
            DoseFrequency::FourTimesDaily => 4,
        }
    }

    /// The fixed daily schedule for this frequency.
    pub fn schedule(self) -> &'static [&'static str] {
        match self {
            DoseFrequency::OnceDaily => &["Morning"],
            DoseFrequency::TwiceDaily => &["Morning", "Night"],
            DoseFrequency::ThriceDaily => &["Morning", "Afternoon", "Night"],
            DoseFrequency::FourTimesDaily => &["Morning", "Afternoon", "Evening", "Night"],
        }
    }
}

/// Unit of a treatment duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Days,
    Weeks,
    Months,
}

impl DurationUnit {
    /// Fixed day multiplier. Months are 30 days here by convention.
    pub fn day_multiplier(self) -> u32 {
        match self {
            DurationUnit::Days => 1,
            DurationUnit::Weeks => 7,
            DurationUnit::Months => 30,
        }
    }
}

/// Parses a duration figure with fallback.
///
/// Prescription forms submit the duration as free text; a missing or
/// non-positive value defaults to 1 rather than rejecting the order. The
/// fallback is logged.
pub fn duration_or_default(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => {
            tracing::warn!("invalid treatment duration '{}', assuming 1", raw);
            1
        }
    }
}

/// Total dispense quantity for one prescription item.
///
/// Pure and total: every combination of inputs yields a positive count.
pub fn quantity(frequency: DoseFrequency, duration: u32, unit: DurationUnit) -> u32 {
    duration * unit.day_multiplier() * frequency.times_per_day()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_multiplies_duration_days_and_frequency() {
        // 2x/day for 5 days
        assert_eq!(
            quantity(DoseFrequency::TwiceDaily, 5, DurationUnit::Days),
            10
        );
        // 3x/day for 2 weeks
        assert_eq!(
            quantity(DoseFrequency::ThriceDaily, 2, DurationUnit::Weeks),
            42
        );
        // 1x/day for 1 month (30-day convention)
        assert_eq!(
            quantity(DoseFrequency::OnceDaily, 1, DurationUnit::Months),
            30
        );
        // 4x/day for 3 months
        assert_eq!(
            quantity(DoseFrequency::FourTimesDaily, 3, DurationUnit::Months),
            360
        );
    }

    #[test]
    fn test_quantity_is_idempotent() {
        let first = quantity(DoseFrequency::TwiceDaily, 7, DurationUnit::Days);
        let second = quantity(DoseFrequency::TwiceDaily, 7, DurationUnit::Days);
        assert_eq!(first, second);
    }

    #[test]
    fn test_frequency_codes_map_to_schedules() {
        assert_eq!(DoseFrequency::from_code("1").schedule(), ["Morning"]);
        assert_eq!(DoseFrequency::from_code("2").schedule(), ["Morning", "Night"]);
        assert_eq!(
            DoseFrequency::from_code("3").schedule(),
            ["Morning", "Afternoon", "Night"]
        );
        assert_eq!(
            DoseFrequency::from_code("4").schedule(),
            ["Morning", "Afternoon", "Evening", "Night"]
        );
    }

    #[test]
    fn test_unrecognised_frequency_code_falls_back_to_once_daily() {
        assert_eq!(DoseFrequency::from_code("9"), DoseFrequency::OnceDaily);
        assert_eq!(DoseFrequency::from_code(""), DoseFrequency::OnceDaily);
        assert_eq!(DoseFrequency::from_code("twice"), DoseFrequency::OnceDaily);
        assert_eq!(DoseFrequency::from_code(" 2 "), DoseFrequency::TwiceDaily);
    }

    #[test]
    fn test_duration_or_default_falls_back_to_one() {
        assert_eq!(duration_or_default("5"), 5);
        assert_eq!(duration_or_default(" 14 "), 14);
        assert_eq!(duration_or_default(""), 1);
        assert_eq!(duration_or_default("0"), 1);
        assert_eq!(duration_or_default("-3"), 1);
        assert_eq!(duration_or_default("a week"), 1);
    }

    #[test]
    fn test_day_multipliers() {
        assert_eq!(DurationUnit::Days.day_multiplier(), 1);
        assert_eq!(DurationUnit::Weeks.day_multiplier(), 7);
        assert_eq!(DurationUnit::Months.day_multiplier(), 30);
    }
}
