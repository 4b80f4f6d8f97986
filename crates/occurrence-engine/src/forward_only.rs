//! Forward-only wrapper: occurrences strictly after the input.
//!
//! The wrapped adjustment is applied to the input; while its result is not
//! strictly later than the input (compared in the input's precision), the
//! candidate steps forward by one period and the adjustment is applied again.
//! The comparison is always against the caller's original input, never the
//! advancing candidate. Candidates the adjustment cannot apply to are stepped
//! over the same way.

use std::hash::{Hash, Hasher};

use tracing::{debug, trace};

use crate::adjuster::{Adjuster, Adjustment, Periodic};
use crate::config::SearchLimits;
use crate::error::{AdjustError, Result};
use crate::period::Period;
use crate::point::Temporal;

/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use occurrence_engine::{Adjuster, Criterion, ForwardOnly, Period, SimplePeriodic};
///
/// let every_monday = ForwardOnly::of(SimplePeriodic::new(
///     Criterion::day_of_week(Weekday::Mon),
///     Period::of_weeks(1),
/// ));
/// let monday = NaiveDate::from_ymd_opt(2018, 6, 18).unwrap();
/// assert_eq!(
///     every_monday.adjust(&monday).unwrap(),
///     NaiveDate::from_ymd_opt(2018, 6, 25).unwrap()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ForwardOnly<T: Temporal> {
    adjustment: Adjustment<T>,
    period: Period,
    limits: SearchLimits,
}

impl<T: Temporal> ForwardOnly<T> {
    pub fn new(adjustment: impl Into<Adjustment<T>>, period: Period) -> Self {
        Self {
            adjustment: adjustment.into(),
            period,
            limits: SearchLimits::default(),
        }
    }

    /// Wrap a periodic adjustment, stepping by its own period.
    pub fn of<P>(periodic: P) -> Self
    where
        P: Periodic<T> + Into<Adjustment<T>>,
    {
        let period = periodic.period();
        Self::new(periodic, period)
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn adjustment(&self) -> &Adjustment<T> {
        &self.adjustment
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }
}

impl<T: Temporal> Adjuster<T> for ForwardOnly<T> {
    fn adjust(&self, temporal: &T) -> Result<T> {
        let precision = temporal.precision();
        let max_attempts = self.limits.max_attempts;
        let mut candidate = temporal.clone();

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                candidate = self.next_period(&candidate)?;
            }
            match self.adjustment.adjust(&candidate) {
                Ok(result) if precision.between(temporal, &result) > 0 => return Ok(result),
                Ok(result) => trace!(attempt, result = ?result, "occurrence not after start"),
                Err(e) if e.is_invalid_adjustment() => trace!(attempt, error = %e, "no occurrence"),
                Err(e) => return Err(e),
            }
        }

        debug!(start = ?temporal, max_attempts, "forward-only search exhausted");
        Err(AdjustError::SearchExhausted {
            attempts: max_attempts,
        })
    }
}

impl<T: Temporal> Periodic<T> for ForwardOnly<T> {
    fn period(&self) -> Period {
        self.period
    }
}

impl<T: Temporal> PartialEq for ForwardOnly<T> {
    fn eq(&self, other: &Self) -> bool {
        self.adjustment == other.adjustment && self.period == other.period
    }
}

impl<T: Temporal> Eq for ForwardOnly<T> {}

impl<T: Temporal + Hash> Hash for ForwardOnly<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.adjustment.hash(state);
        self.period.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjuster::{FnAdjuster, SimplePeriodic};
    use crate::all_of::AllOf;
    use crate::criterion::Criterion;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly_monday() -> ForwardOnly<NaiveDate> {
        ForwardOnly::of(SimplePeriodic::new(
            Criterion::day_of_week(Weekday::Mon),
            Period::of_weeks(1),
        ))
    }

    #[test]
    fn test_occurrence_on_start_moves_to_next() {
        assert_eq!(weekly_monday().adjust(&date(2018, 6, 18)).unwrap(), date(2018, 6, 25));
    }

    #[test]
    fn test_occurrence_before_start_moves_to_next() {
        // Wednesday → this week's Monday is behind, next week's is ahead
        assert_eq!(weekly_monday().adjust(&date(2018, 6, 20)).unwrap(), date(2018, 6, 25));
    }

    #[test]
    fn test_occurrence_after_start_is_kept() {
        let friday = ForwardOnly::of(SimplePeriodic::new(
            Criterion::day_of_week(Weekday::Fri),
            Period::of_weeks(1),
        ));
        assert_eq!(friday.adjust(&date(2018, 6, 19)).unwrap(), date(2018, 6, 22));
    }

    #[test]
    fn test_annual_date() {
        let valentines = ForwardOnly::of(SimplePeriodic::new(
            AllOf::new(
                [Criterion::Month(2), Criterion::DayOfMonth(14)],
                Period::of_years(1),
            ),
            Period::of_years(1),
        ));
        assert_eq!(valentines.adjust(&date(2026, 2, 14)).unwrap(), date(2027, 2, 14));
        assert_eq!(valentines.adjust(&date(2026, 2, 13)).unwrap(), date(2026, 2, 14));
        assert_eq!(valentines.adjust(&date(2026, 3, 1)).unwrap(), date(2027, 2, 14));
    }

    #[test]
    fn test_wrapping_all_of_uses_its_period() {
        let thirty_first = ForwardOnly::of(AllOf::new(
            [Criterion::DayOfMonth(31)],
            Period::of_months(1),
        ));
        assert_eq!(thirty_first.period(), Period::of_months(1));
        assert_eq!(thirty_first.adjust(&date(2018, 3, 31)).unwrap(), date(2018, 5, 31));
    }

    #[test]
    fn test_invalid_candidate_is_stepped_over() {
        let thirty_first = ForwardOnly::new(Criterion::DayOfMonth(31), Period::of_months(1));
        assert_eq!(thirty_first.adjust(&date(2018, 4, 15)).unwrap(), date(2018, 5, 31));
    }

    #[test]
    fn test_identity_advances_exactly_one_period() {
        let identity = FnAdjuster::new("identity", |d: &NaiveDate| Ok(*d));
        let forward = ForwardOnly::new(identity, Period::of_days(1));
        assert_eq!(forward.adjust(&date(2026, 12, 31)).unwrap(), date(2027, 1, 1));
    }

    #[test]
    fn test_compares_in_input_precision() {
        let nine_am = ForwardOnly::new(Criterion::Hour(9), Period::of_days(1));
        let start: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let earlier: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 10, 19, 3, 0, 0).unwrap();
        assert_eq!(
            nine_am.adjust(&start).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap()
        );
        assert_eq!(nine_am.adjust(&earlier).unwrap(), start);
    }

    #[test]
    fn test_occurrence_in_dst_fold_is_not_skipped() {
        use chrono_tz::America::New_York;
        // 2026-11-01 01:30 happens twice in New York.
        let first_of_month = ForwardOnly::of(AllOf::new(
            [Criterion::DayOfMonth(1)],
            Period::of_months(1),
        ));
        let start = New_York.with_ymd_and_hms(2026, 10, 15, 1, 30, 0).unwrap();
        let fold = date(2026, 11, 1).and_hms_opt(1, 30, 0).unwrap();
        assert_eq!(
            first_of_month.adjust(&start).unwrap(),
            New_York.from_local_datetime(&fold).latest().unwrap()
        );
    }

    #[test]
    fn test_zero_limit_fails_without_trying() {
        let forward = weekly_monday().with_limits(SearchLimits::new(0));
        assert_eq!(
            forward.adjust(&date(2018, 6, 20)).unwrap_err(),
            AdjustError::SearchExhausted { attempts: 0 }
        );
    }

    #[test]
    fn test_backward_only_adjustment_exhausts() {
        let fixed = date(2000, 1, 1);
        let always_past = FnAdjuster::new("y2k", move |_: &NaiveDate| Ok(fixed));
        let forward = ForwardOnly::new(always_past, Period::of_days(1))
            .with_limits(SearchLimits::new(5));
        assert_eq!(
            forward.adjust(&date(2026, 1, 1)).unwrap_err(),
            AdjustError::SearchExhausted { attempts: 5 }
        );
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(weekly_monday().limits(), SearchLimits::default());
    }

    #[test]
    fn test_equality_by_adjustment_and_period() {
        let weekly = ForwardOnly::<NaiveDate>::new(Criterion::DayOfMonth(1), Period::of_weeks(1));
        let same = ForwardOnly::<NaiveDate>::new(Criterion::DayOfMonth(1), Period::of_weeks(1));
        let monthly = ForwardOnly::<NaiveDate>::new(Criterion::DayOfMonth(1), Period::of_months(1));
        assert_eq!(weekly, same);
        assert_ne!(weekly, monthly);
    }
}
