//! The point-in-time capability consumed by every adjustment.
//!
//! [`Temporal`] is implemented for the three `chrono` calendar types:
//!
//! | Type               | Precision       | Time of day |
//! |--------------------|-----------------|-------------|
//! | `NaiveDate`        | days            | none        |
//! | `NaiveDateTime`    | nanoseconds     | local       |
//! | `DateTime<Tz>`     | nanoseconds     | local, resolved through `Tz` |
//!
//! Field changes and period steps on a zoned value are made in local time and
//! then resolved to an instant. In a fold the value keeps its current offset
//! when that offset is still valid, otherwise the earlier instant wins. A local
//! time inside a gap moves forward by the length of the gap.

use std::fmt;

use chrono::{
    DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone,
};
use serde::{Deserialize, Serialize};

use crate::adjuster::Adjuster;
use crate::error::{AdjustError, Result};
use crate::period::Period;

/// The smallest unit a point in time can distinguish.
///
/// Every [`Temporal`] reports either `Days` or `Nanoseconds`. `Seconds` is a
/// coarser unit callers can measure in with [`Precision::between`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precision {
    Days,
    Seconds,
    Nanoseconds,
}

impl Precision {
    /// Signed distance from `from` to `to` in whole units of this precision,
    /// truncated toward zero.
    ///
    /// Positive when `to` is after `from`. Nanosecond distances beyond the
    /// `i64` range (about 292 years) saturate.
    pub fn between<T: Temporal>(self, from: &T, to: &T) -> i64 {
        let delta = from.elapsed_until(to);
        match self {
            Precision::Days => delta.num_days(),
            Precision::Seconds => delta.num_seconds(),
            Precision::Nanoseconds => delta.num_nanoseconds().unwrap_or(if delta < TimeDelta::zero() {
                i64::MIN
            } else {
                i64::MAX
            }),
        }
    }
}

/// An immutable point on the calendar that adjustments can read and rebuild.
pub trait Temporal: Clone + PartialEq + fmt::Debug + Sized {
    /// The smallest unit this value supports.
    fn precision(&self) -> Precision;

    /// The local calendar date.
    fn date(&self) -> NaiveDate;

    /// The local time of day, or `None` for date-only values.
    fn time(&self) -> Option<NaiveTime>;

    /// The same value moved to `date`, keeping the time of day.
    fn with_date(&self, date: NaiveDate) -> Result<Self>;

    /// The same value moved to `time` on the same date.
    fn with_time(&self, time: NaiveTime) -> Result<Self>;

    /// Signed elapsed time from `self` to `other`.
    fn elapsed_until(&self, other: &Self) -> TimeDelta;

    /// Add a period: the calendar part on the local date, then the clock part.
    fn plus(&self, period: &Period) -> Result<Self>;

    /// Apply an adjustment to this value.
    fn adjusted<A>(&self, adjuster: &A) -> Result<Self>
    where
        A: Adjuster<Self> + ?Sized,
    {
        adjuster.adjust(self)
    }
}

// ── NaiveDate ───────────────────────────────────────────────────────────────

impl Temporal for NaiveDate {
    fn precision(&self) -> Precision {
        Precision::Days
    }

    fn date(&self) -> NaiveDate {
        *self
    }

    fn time(&self) -> Option<NaiveTime> {
        None
    }

    fn with_date(&self, date: NaiveDate) -> Result<Self> {
        Ok(date)
    }

    fn with_time(&self, _time: NaiveTime) -> Result<Self> {
        Err(AdjustError::InvalidAdjustment(format!(
            "{self} is a date and has no time of day"
        )))
    }

    fn elapsed_until(&self, other: &Self) -> TimeDelta {
        other.signed_duration_since(*self)
    }

    fn plus(&self, period: &Period) -> Result<Self> {
        if period.has_clock_part() {
            return Err(AdjustError::UnsupportedPeriod(format!(
                "{period:?} has a time-of-day component and cannot step the date {self}"
            )));
        }
        period.add_calendar_to(*self)
    }
}

// ── NaiveDateTime ───────────────────────────────────────────────────────────

impl Temporal for NaiveDateTime {
    fn precision(&self) -> Precision {
        Precision::Nanoseconds
    }

    fn date(&self) -> NaiveDate {
        NaiveDateTime::date(self)
    }

    fn time(&self) -> Option<NaiveTime> {
        Some(NaiveDateTime::time(self))
    }

    fn with_date(&self, date: NaiveDate) -> Result<Self> {
        Ok(date.and_time(NaiveDateTime::time(self)))
    }

    fn with_time(&self, time: NaiveTime) -> Result<Self> {
        Ok(NaiveDateTime::date(self).and_time(time))
    }

    fn elapsed_until(&self, other: &Self) -> TimeDelta {
        other.signed_duration_since(*self)
    }

    fn plus(&self, period: &Period) -> Result<Self> {
        let date = period.add_calendar_to(NaiveDateTime::date(self))?;
        date.and_time(NaiveDateTime::time(self))
            .checked_add_signed(period.clock_delta()?)
            .ok_or_else(|| AdjustError::OutOfRange(format!("{self} + {period:?}")))
    }
}

// ── DateTime<Tz> ────────────────────────────────────────────────────────────

impl<Tz: TimeZone> Temporal for DateTime<Tz> {
    fn precision(&self) -> Precision {
        Precision::Nanoseconds
    }

    fn date(&self) -> NaiveDate {
        self.date_naive()
    }

    fn time(&self) -> Option<NaiveTime> {
        Some(DateTime::time(self))
    }

    fn with_date(&self, date: NaiveDate) -> Result<Self> {
        resolve_local(self, date.and_time(DateTime::time(self)))
    }

    fn with_time(&self, time: NaiveTime) -> Result<Self> {
        resolve_local(self, self.date_naive().and_time(time))
    }

    fn elapsed_until(&self, other: &Self) -> TimeDelta {
        other.naive_utc() - self.naive_utc()
    }

    fn plus(&self, period: &Period) -> Result<Self> {
        // Day-level: step the date in local time, then add the clock part on the instant.
        let local = period
            .add_calendar_to(self.date_naive())?
            .and_time(DateTime::time(self));
        let stepped = resolve_local(self, local)?;
        stepped
            .checked_add_signed(period.clock_delta()?)
            .ok_or_else(|| AdjustError::OutOfRange(format!("{self:?} + {period:?}")))
    }
}

/// Map a local time in `current`'s zone to an instant.
///
/// A fold keeps `current`'s offset if it is one of the two candidates, else
/// takes the earlier. A gap is read with the offset in force before it, which
/// lands the same distance past the transition as the gap is long.
fn resolve_local<Tz: TimeZone>(
    current: &DateTime<Tz>,
    local: NaiveDateTime,
) -> Result<DateTime<Tz>> {
    let tz = current.timezone();
    match tz.from_local_datetime(&local) {
        LocalResult::Single(resolved) => Ok(resolved),
        LocalResult::Ambiguous(earlier, later) => {
            if later.offset().fix() == current.offset().fix() {
                Ok(later)
            } else {
                Ok(earlier)
            }
        }
        LocalResult::None => {
            // One day earlier still precedes the transition.
            let before = local
                .checked_sub_signed(TimeDelta::days(1))
                .map(|day_before| tz.offset_from_utc_datetime(&day_before).fix());
            before
                .and_then(|offset| {
                    local.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
                })
                .map(|utc| tz.from_utc_datetime(&utc))
                .ok_or_else(|| AdjustError::OutOfRange(format!("no instant for local time {local}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::America::New_York;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    // ── Precision ───────────────────────────────────────────────────────

    #[test]
    fn test_precision_by_type() {
        assert_eq!(date(2026, 1, 1).precision(), Precision::Days);
        assert_eq!(datetime(2026, 1, 1, 0, 0).precision(), Precision::Nanoseconds);
        let zoned = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(zoned.precision(), Precision::Nanoseconds);
    }

    #[test]
    fn test_between_is_signed() {
        let a = date(2026, 3, 1);
        let b = date(2026, 3, 11);
        assert_eq!(Precision::Days.between(&a, &b), 10);
        assert_eq!(Precision::Days.between(&b, &a), -10);
        assert_eq!(Precision::Days.between(&a, &a), 0);
    }

    #[test]
    fn test_between_truncates_toward_zero() {
        let a = datetime(2026, 3, 1, 0, 0);
        let b = datetime(2026, 3, 1, 23, 59);
        assert_eq!(Precision::Days.between(&a, &b), 0);
        assert_eq!(Precision::Seconds.between(&a, &b), 86_340);
    }

    #[test]
    fn test_between_nanoseconds_saturates() {
        let a = datetime(1000, 1, 1, 0, 0);
        let b = datetime(2000, 1, 1, 0, 0);
        assert_eq!(Precision::Nanoseconds.between(&a, &b), i64::MAX);
        assert_eq!(Precision::Nanoseconds.between(&b, &a), i64::MIN);
    }

    // ── Field access ────────────────────────────────────────────────────

    #[test]
    fn test_date_has_no_time_of_day() {
        let d = date(2026, 6, 1);
        assert_eq!(d.time(), None);
        let err = d.with_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()).unwrap_err();
        assert!(err.is_invalid_adjustment());
    }

    #[test]
    fn test_datetime_with_date_keeps_time() {
        let dt = datetime(2026, 6, 1, 15, 10);
        let moved = dt.with_date(date(2026, 7, 4)).unwrap();
        assert_eq!(moved, datetime(2026, 7, 4, 15, 10));
    }

    #[test]
    fn test_zoned_with_time_in_dst_gap_moves_past_it() {
        // 2026-03-08 02:30 does not exist in New York (spring forward).
        let dt = New_York.with_ymd_and_hms(2026, 3, 8, 0, 0, 0).unwrap();
        let moved = Temporal::with_time(&dt, NaiveTime::from_hms_opt(2, 30, 0).unwrap()).unwrap();
        assert_eq!(moved, New_York.with_ymd_and_hms(2026, 3, 8, 3, 30, 0).unwrap());
    }

    #[test]
    fn test_zoned_with_time_in_fold_keeps_current_offset() {
        // 2026-11-01 01:30 happens twice in New York (fall back).
        let fold = date(2026, 11, 1).and_hms_opt(1, 30, 0).unwrap();
        let first = New_York.from_local_datetime(&fold).earliest().unwrap();
        let second = New_York.from_local_datetime(&fold).latest().unwrap();
        assert_ne!(first, second);

        let daylight = New_York.with_ymd_and_hms(2026, 11, 1, 0, 15, 0).unwrap();
        let standard = New_York.with_ymd_and_hms(2026, 11, 1, 3, 0, 0).unwrap();
        let half_past_one = NaiveTime::from_hms_opt(1, 30, 0).unwrap();
        assert_eq!(Temporal::with_time(&daylight, half_past_one).unwrap(), first);
        assert_eq!(Temporal::with_time(&standard, half_past_one).unwrap(), second);
    }

    #[test]
    fn test_zoned_with_date_into_fold_keeps_offset() {
        let fold = date(2026, 11, 1).and_hms_opt(1, 30, 0).unwrap();
        let summer = New_York.with_ymd_and_hms(2026, 7, 1, 1, 30, 0).unwrap();
        let winter = New_York.with_ymd_and_hms(2026, 1, 1, 1, 30, 0).unwrap();
        assert_eq!(
            Temporal::with_date(&summer, date(2026, 11, 1)).unwrap(),
            New_York.from_local_datetime(&fold).earliest().unwrap()
        );
        assert_eq!(
            Temporal::with_date(&winter, date(2026, 11, 1)).unwrap(),
            New_York.from_local_datetime(&fold).latest().unwrap()
        );
    }

    // ── Period addition ─────────────────────────────────────────────────

    #[test]
    fn test_date_plus_clock_period_is_unsupported() {
        let err = date(2026, 1, 1).plus(&Period::of_hours(1)).unwrap_err();
        assert!(matches!(err, AdjustError::UnsupportedPeriod(_)), "got: {err}");
    }

    #[test]
    fn test_datetime_plus_mixed_period() {
        let p = Period::of_days(1).plus(Period::of_minutes(90));
        let result = datetime(2026, 3, 16, 10, 0).plus(&p).unwrap();
        assert_eq!(result, datetime(2026, 3, 17, 11, 30));
    }

    #[test]
    fn test_zoned_day_step_preserves_wall_clock_across_dst() {
        // March 8 2026: US spring forward. +1d keeps 09:00 local.
        let dt = New_York.with_ymd_and_hms(2026, 3, 7, 9, 0, 0).unwrap();
        let result = dt.plus(&Period::of_days(1)).unwrap();
        assert_eq!(result, New_York.with_ymd_and_hms(2026, 3, 8, 9, 0, 0).unwrap());
        assert_eq!(Precision::Seconds.between(&dt, &result), 23 * 3600);
    }

    #[test]
    fn test_zoned_day_step_into_gap_moves_past_it() {
        let dt = New_York.with_ymd_and_hms(2026, 3, 7, 2, 30, 0).unwrap();
        let result = dt.plus(&Period::of_days(1)).unwrap();
        assert_eq!(result, New_York.with_ymd_and_hms(2026, 3, 8, 3, 30, 0).unwrap());
    }

    #[test]
    fn test_adjusted_delegates_to_adjuster() {
        use crate::criterion::Criterion;
        let d = date(2026, 2, 10);
        assert_eq!(d.adjusted(&Criterion::FirstDayOfMonth).unwrap(), date(2026, 2, 1));
    }
}
