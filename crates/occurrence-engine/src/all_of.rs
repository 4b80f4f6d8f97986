//! All-of compound adjustment: find a point satisfying every criterion at once.
//!
//! # Algorithm
//!
//! Each attempt threads the candidate through every adjustment in list order.
//! The attempt succeeds when its result is a fixed point of the whole list:
//! re-applying any single adjustment leaves it unchanged. Otherwise (an
//! adjustment could not apply, or a later adjustment undid an earlier one)
//! the candidate steps forward by one period and the search tries again, up
//! to [`SearchLimits::max_attempts`] attempts.
//!
//! The period should match the coarsest criterion's natural cycle: weekly for
//! a weekday, monthly for a day of month, yearly when a month is named.

use std::hash::{Hash, Hasher};

use tracing::{debug, trace};

use crate::adjuster::{Adjuster, Adjustment, Periodic};
use crate::compound::AdjusterList;
use crate::config::SearchLimits;
use crate::error::{AdjustError, Result};
use crate::period::Period;
use crate::point::Temporal;

/// Adjusts to a point satisfying every member adjustment simultaneously.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use occurrence_engine::{Adjuster, AllOf, Criterion, Period};
///
/// // The next 31st, stepping month by month.
/// let thirty_first = AllOf::new([Criterion::DayOfMonth(31)], Period::of_months(1));
/// let april = NaiveDate::from_ymd_opt(2018, 4, 1).unwrap();
/// assert_eq!(
///     thirty_first.adjust(&april).unwrap(),
///     NaiveDate::from_ymd_opt(2018, 5, 31).unwrap()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AllOf<T: Temporal> {
    adjustments: AdjusterList<T>,
    period: Period,
    limits: SearchLimits,
}

impl<T: Temporal> AllOf<T> {
    pub fn new<I, A>(adjustments: I, period: Period) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Adjustment<T>>,
    {
        Self {
            adjustments: AdjusterList::new(adjustments),
            period,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn adjustments(&self) -> &AdjusterList<T> {
        &self.adjustments
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Apply every adjustment in order. `None` when one of them cannot apply.
    fn attempt(&self, candidate: &T) -> Result<Option<T>> {
        let mut adjusted = candidate.clone();
        for adjustment in &self.adjustments {
            adjusted = match adjustment.adjust(&adjusted) {
                Ok(next) => next,
                Err(e) if e.is_invalid_adjustment() => {
                    trace!(error = %e, "attempt abandoned");
                    return Ok(None);
                }
                Err(e) => return Err(e),
            };
        }
        Ok(Some(adjusted))
    }

    /// Whether every adjustment maps `temporal` to itself.
    fn is_fixed_point(&self, temporal: &T) -> Result<bool> {
        for adjustment in &self.adjustments {
            match adjustment.adjust(temporal) {
                Ok(check) if check == *temporal => {}
                Ok(_) => return Ok(false),
                Err(e) if e.is_invalid_adjustment() => return Ok(false),
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }
}

impl<T: Temporal> Adjuster<T> for AllOf<T> {
    fn adjust(&self, temporal: &T) -> Result<T> {
        let max_attempts = self.limits.max_attempts;
        let mut candidate = temporal.clone();

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                candidate = self.next_period(&candidate)?;
            }
            if let Some(result) = self.attempt(&candidate)? {
                if self.is_fixed_point(&result)? {
                    return Ok(result);
                }
                trace!(attempt, result = ?result, "criteria did not converge");
            }
        }

        debug!(
            start = ?temporal,
            max_attempts,
            criteria = self.adjustments.len(),
            "all-of search exhausted"
        );
        Err(AdjustError::SearchExhausted {
            attempts: max_attempts,
        })
    }
}

impl<T: Temporal> Periodic<T> for AllOf<T> {
    fn period(&self) -> Period {
        self.period
    }
}

// Identity is the ordered adjustment list alone.
impl<T: Temporal> PartialEq for AllOf<T> {
    fn eq(&self, other: &Self) -> bool {
        self.adjustments == other.adjustments
    }
}

impl<T: Temporal> Eq for AllOf<T> {}

impl<T: Temporal + Hash> Hash for AllOf<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.adjustments.hash(state);
    }
}
