//! Periods: the forward step taken between search attempts.
//!
//! A [`Period`] has a calendar part (months and days, applied to the local
//! date so wall-clock time is preserved) and a clock part (seconds, applied to
//! the instant). Adding a period is deterministic and never moves backward.

use chrono::{Days, Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{AdjustError, Result};

/// An immutable, non-negative amount of time usable to step a point forward.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use occurrence_engine::{Period, Temporal};
///
/// let jan31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
/// // Month arithmetic clamps to the end of the target month.
/// assert_eq!(
///     jan31.plus(&Period::of_months(1)).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    months: u32,
    days: u32,
    seconds: u64,
}

impl Period {
    pub const ZERO: Period = Period {
        months: 0,
        days: 0,
        seconds: 0,
    };

    pub fn of_years(years: u32) -> Self {
        Self::of_months(years.saturating_mul(12))
    }

    pub fn of_months(months: u32) -> Self {
        Self {
            months,
            ..Self::ZERO
        }
    }

    pub fn of_weeks(weeks: u32) -> Self {
        Self::of_days(weeks.saturating_mul(7))
    }

    pub fn of_days(days: u32) -> Self {
        Self {
            days,
            ..Self::ZERO
        }
    }

    pub fn of_hours(hours: u32) -> Self {
        Self::of_seconds(u64::from(hours) * 3600)
    }

    pub fn of_minutes(minutes: u32) -> Self {
        Self::of_seconds(u64::from(minutes) * 60)
    }

    pub fn of_seconds(seconds: u64) -> Self {
        Self {
            seconds,
            ..Self::ZERO
        }
    }

    /// Combine two periods component-wise.
    pub fn plus(self, other: Period) -> Self {
        Self {
            months: self.months.saturating_add(other.months),
            days: self.days.saturating_add(other.days),
            seconds: self.seconds.saturating_add(other.seconds),
        }
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Whether the period has a sub-day component.
    pub fn has_clock_part(&self) -> bool {
        self.seconds != 0
    }

    /// Apply the calendar part (months, then days) to a local date.
    pub(crate) fn add_calendar_to(&self, date: NaiveDate) -> Result<NaiveDate> {
        let date = if self.months == 0 {
            date
        } else {
            date.checked_add_months(Months::new(self.months))
                .ok_or_else(|| out_of_range(date, self))?
        };
        if self.days == 0 {
            return Ok(date);
        }
        date.checked_add_days(Days::new(u64::from(self.days)))
            .ok_or_else(|| out_of_range(date, self))
    }

    /// The clock part as a `TimeDelta`.
    pub(crate) fn clock_delta(&self) -> Result<TimeDelta> {
        i64::try_from(self.seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| {
                AdjustError::OutOfRange(format!("{} seconds exceeds duration range", self.seconds))
            })
    }
}

fn out_of_range(date: NaiveDate, period: &Period) -> AdjustError {
    AdjustError::OutOfRange(format!("{date} + {period:?}"))
}
