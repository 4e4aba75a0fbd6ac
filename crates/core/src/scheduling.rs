//! Equipment service scheduling rules.
//!
//! Maintenance is due a fixed number of *calendar* months after the last
//! service: month-length and leap-year variation is handled by chrono's
//! month increment (with end-of-month clamping), never by fixed day
//! counts. Status classification compares the due date against today with
//! two fixed thresholds: overdue below 0 days, due-soon up to 30 days
//! out, up-to-date beyond that.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upper bound of the due-soon window, in days.
pub const DUE_SOON_WINDOW_DAYS: i64 = 30;

/// Maintenance cadence of a piece of equipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceFrequency {
    Monthly,
    Quarterly,
    Yearly,
}

impl ServiceFrequency {
    /// Calendar months between services.
    pub fn months(self) -> u32 {
        match self {
            ServiceFrequency::Monthly => 1,
            ServiceFrequency::Quarterly => 3,
            ServiceFrequency::Yearly => 12,
        }
    }
}

/// Derived service status of a piece of equipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Overdue,
    DueSoon,
    UpToDate,
}

/// Computes the next service due date.
///
/// Adds the frequency's calendar months to `last_service_date`. Chrono
/// clamps to the end of the target month where needed (for example
/// 2025-01-31 + 1 month = 2025-02-28).
pub fn next_due_date(last_service_date: NaiveDate, frequency: ServiceFrequency) -> NaiveDate {
    last_service_date
        .checked_add_months(Months::new(frequency.months()))
        .unwrap_or(NaiveDate::MAX)
}

/// Classifies a due date against `today`.
///
/// Deterministic and idempotent; both boundary days (0 and 30) classify
/// as due-soon.
pub fn classify(next_due_date: NaiveDate, today: NaiveDate) -> ServiceStatus {
    let diff_days = days_until_due(next_due_date, today);
    if diff_days < 0 {
        ServiceStatus::Overdue
    } else if diff_days <= DUE_SOON_WINDOW_DAYS {
        ServiceStatus::DueSoon
    } else {
        ServiceStatus::UpToDate
    }
}

/// Whole days from `today` until the due date (negative when past due).
pub fn days_until_due(next_due_date: NaiveDate, today: NaiveDate) -> i64 {
    next_due_date.signed_duration_since(today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn test_next_due_date_adds_calendar_months() {
        assert_eq!(
            next_due_date(date(2024, 3, 10), ServiceFrequency::Monthly),
            date(2024, 4, 10)
        );
        assert_eq!(
            next_due_date(date(2024, 5, 1), ServiceFrequency::Yearly),
            date(2025, 5, 1)
        );
    }

    #[test]
    fn test_next_due_date_rolls_over_the_year() {
        assert_eq!(
            next_due_date(date(2024, 11, 15), ServiceFrequency::Quarterly),
            date(2025, 2, 15)
        );
        assert_eq!(
            next_due_date(date(2024, 12, 31), ServiceFrequency::Monthly),
            date(2025, 1, 31)
        );
    }

    #[test]
    fn test_next_due_date_clamps_to_month_end() {
        // January 31st + 1 month lands on the last day of February.
        assert_eq!(
            next_due_date(date(2025, 1, 31), ServiceFrequency::Monthly),
            date(2025, 2, 28)
        );
        // Leap year variant.
        assert_eq!(
            next_due_date(date(2024, 1, 31), ServiceFrequency::Monthly),
            date(2024, 2, 29)
        );
        assert_eq!(
            next_due_date(date(2024, 11, 30), ServiceFrequency::Quarterly),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn test_classify_boundaries() {
        let today = date(2026, 8, 6);

        // diff = 0 is due-soon, not up-to-date
        assert_eq!(classify(today, today), ServiceStatus::DueSoon);
        // diff = 30 still due-soon
        assert_eq!(classify(date(2026, 9, 5), today), ServiceStatus::DueSoon);
        // diff = 31 up-to-date
        assert_eq!(classify(date(2026, 9, 6), today), ServiceStatus::UpToDate);
        // diff = -1 overdue
        assert_eq!(classify(date(2026, 8, 5), today), ServiceStatus::Overdue);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let today = date(2026, 8, 6);
        let due = date(2026, 8, 20);
        assert_eq!(classify(due, today), classify(due, today));
    }

    #[test]
    fn test_days_until_due_sign() {
        let today = date(2026, 8, 6);
        assert_eq!(days_until_due(date(2026, 8, 9), today), 3);
        assert_eq!(days_until_due(date(2026, 8, 1), today), -5);
    }
}
