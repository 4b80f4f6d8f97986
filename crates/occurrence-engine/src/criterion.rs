//! Built-in single-criterion adjustments.
//!
//! Each [`Criterion`] encodes one calendar condition ("day 31", "third
//! Thursday", "minute 30") and moves a point to satisfy it, keeping every
//! field it does not govern. A criterion that cannot hold for the input's
//! month or year reports [`AdjustError::InvalidAdjustment`] instead of
//! spilling into a neighbouring period.

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::adjuster::Adjuster;
use crate::error::{AdjustError, Result};
use crate::point::Temporal;

/// Which day begins a week for [`Criterion::DayOfWeek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeekStartDay {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    /// Month of year (1-12). The day is clamped to the target month's length.
    Month(u32),
    /// Day of month; invalid when the month is shorter.
    DayOfMonth(u32),
    /// Day of year (1-366); invalid when the year is shorter.
    DayOfYear(u32),
    FirstDayOfMonth,
    LastDayOfMonth,
    /// The given weekday within the current week.
    DayOfWeek {
        day: Weekday,
        week_start: WeekStartDay,
    },
    /// The Nth occurrence of a weekday in the current month. Positive ordinals
    /// count from the start (1 = first), negative from the end (-1 = last).
    NthWeekdayInMonth { ordinal: i32, day: Weekday },
    /// Hour of day (0-23).
    Hour(u32),
    /// Minute of hour (0-59).
    Minute(u32),
    /// Second of minute (0-59).
    Second(u32),
}

impl Criterion {
    /// The given weekday within the current ISO (Monday-first) week.
    pub fn day_of_week(day: Weekday) -> Self {
        Criterion::DayOfWeek {
            day,
            week_start: WeekStartDay::Monday,
        }
    }

    pub fn nth_weekday_in_month(ordinal: i32, day: Weekday) -> Self {
        Criterion::NthWeekdayInMonth { ordinal, day }
    }

    pub fn last_weekday_in_month(day: Weekday) -> Self {
        Criterion::NthWeekdayInMonth { ordinal: -1, day }
    }

    fn target_date(&self, date: NaiveDate) -> Result<NaiveDate> {
        match *self {
            Criterion::Month(month) => {
                if !(1..=12).contains(&month) {
                    return Err(invalid(format!("month {month} is out of range")));
                }
                let last = last_day_of_month(date.year(), month)
                    .ok_or_else(|| invalid(format!("no month {month} in year {}", date.year())))?;
                Ok(last
                    .with_day(date.day().min(last.day()))
                    .unwrap_or(last))
            }
            Criterion::DayOfMonth(day) => date
                .with_day(day)
                .ok_or_else(|| invalid(format!("{} has no day {day}", month_label(date)))),
            Criterion::DayOfYear(ordinal) => date
                .with_ordinal(ordinal)
                .ok_or_else(|| invalid(format!("{} has no day {ordinal}", date.year()))),
            Criterion::FirstDayOfMonth => date
                .with_day(1)
                .ok_or_else(|| invalid(format!("{} has no first day", month_label(date)))),
            Criterion::LastDayOfMonth => last_day_of_month(date.year(), date.month())
                .ok_or_else(|| invalid(format!("{} has no last day", month_label(date)))),
            Criterion::DayOfWeek { day, week_start } => {
                let shift = days_from_week_start(day, week_start)
                    - days_from_week_start(date.weekday(), week_start);
                date.checked_add_signed(chrono::Duration::days(shift))
                    .ok_or_else(|| AdjustError::OutOfRange(format!("{date} to {day}")))
            }
            Criterion::NthWeekdayInMonth { ordinal, day } => {
                find_nth_weekday_in_month(date.year(), date.month(), day, ordinal).ok_or_else(
                    || invalid(format!("{} has no occurrence {ordinal} of {day}", month_label(date))),
                )
            }
            Criterion::Hour(_) | Criterion::Minute(_) | Criterion::Second(_) => Ok(date),
        }
    }
}

impl<T: Temporal> Adjuster<T> for Criterion {
    fn adjust(&self, temporal: &T) -> Result<T> {
        let field_value = match *self {
            Criterion::Hour(h) => Some(("hour", h)),
            Criterion::Minute(m) => Some(("minute", m)),
            Criterion::Second(s) => Some(("second", s)),
            _ => None,
        };

        let Some((field, value)) = field_value else {
            let date = temporal.date();
            let target = self.target_date(date)?;
            return if target == date {
                Ok(temporal.clone())
            } else {
                temporal.with_date(target)
            };
        };

        let time = temporal
            .time()
            .ok_or_else(|| invalid(format!("{temporal:?} has no {field} field")))?;
        let target = match self {
            Criterion::Hour(_) => time.with_hour(value),
            Criterion::Minute(_) => time.with_minute(value),
            _ => time.with_second(value),
        }
        .ok_or_else(|| invalid(format!("{field} {value} is out of range")))?;
        if target == time {
            Ok(temporal.clone())
        } else {
            temporal.with_time(target)
        }
    }
}

fn invalid(message: String) -> AdjustError {
    AdjustError::InvalidAdjustment(message)
}

fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// The last day of `month` in `year`, found within the month itself.
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    (28..=31)
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
}

/// Find the Nth weekday in a month. ordinal < 0 means "last" (-1), "second to last" (-2), etc.
fn find_nth_weekday_in_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    ordinal: i32,
) -> Option<NaiveDate> {
    if ordinal == 0 || ordinal.unsigned_abs() > 5 {
        return None;
    }
    let target = if ordinal > 0 {
        // Forward from the first of the month
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let diff = (weekday.num_days_from_monday() as i64
            - first.weekday().num_days_from_monday() as i64
            + 7)
            % 7;
        first
            .checked_add_signed(chrono::Duration::days(diff))?
            .checked_add_signed(chrono::Duration::weeks((ordinal - 1) as i64))?
    } else {
        // Backward from the last of the month
        let last = last_day_of_month(year, month)?;
        let diff = (last.weekday().num_days_from_monday() as i64
            - weekday.num_days_from_monday() as i64
            + 7)
            % 7;
        last.checked_sub_signed(chrono::Duration::days(diff))?
            .checked_sub_signed(chrono::Duration::weeks((-ordinal - 1) as i64))?
    };
    // Verify still in the same month
    (target.month() == month).then_some(target)
}
