//! Nearest-of compound adjustment: pick the closest of several alternatives.

use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::adjuster::{Adjuster, Adjustment};
use crate::compound::AdjusterList;
use crate::error::{AdjustError, Result};
use crate::point::Temporal;

/// Applies each member independently and keeps the result closest to the
/// input, measured in the input's own precision.
///
/// Members that cannot apply to the input are skipped. When two candidates
/// are equally close, the one listed first wins; callers should not rely on
/// any other tie-break property.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use occurrence_engine::{Adjuster, Criterion, NearestOf};
///
/// let mwf = NearestOf::new([
///     Criterion::day_of_week(Weekday::Mon),
///     Criterion::day_of_week(Weekday::Wed),
///     Criterion::day_of_week(Weekday::Fri),
/// ]);
/// let sunday = NaiveDate::from_ymd_opt(2018, 6, 24).unwrap();
/// assert_eq!(mwf.adjust(&sunday).unwrap(), NaiveDate::from_ymd_opt(2018, 6, 22).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct NearestOf<T: Temporal> {
    adjustments: AdjusterList<T>,
}

impl<T: Temporal> NearestOf<T> {
    pub fn new<I, A>(adjustments: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Adjustment<T>>,
    {
        Self {
            adjustments: AdjusterList::new(adjustments),
        }
    }

    pub fn adjustments(&self) -> &AdjusterList<T> {
        &self.adjustments
    }
}

impl<T: Temporal> Adjuster<T> for NearestOf<T> {
    fn adjust(&self, temporal: &T) -> Result<T> {
        let precision = temporal.precision();
        let mut nearest: Option<(u64, T)> = None;

        for adjustment in &self.adjustments {
            let candidate = match adjustment.adjust(temporal) {
                Ok(candidate) => candidate,
                Err(e) if e.is_invalid_adjustment() => {
                    trace!(error = %e, "candidate skipped");
                    continue;
                }
                Err(e) => return Err(e),
            };
            let distance = precision.between(temporal, &candidate).unsigned_abs();
            // Strict comparison keeps the earliest-listed candidate on ties.
            if nearest.as_ref().is_none_or(|(best, _)| distance < *best) {
                nearest = Some((distance, candidate));
            }
        }

        nearest
            .map(|(_, candidate)| candidate)
            .ok_or(AdjustError::NoApplicableAdjustment)
    }
}

impl<T: Temporal> PartialEq for NearestOf<T> {
    fn eq(&self, other: &Self) -> bool {
        self.adjustments == other.adjustments
    }
}

impl<T: Temporal> Eq for NearestOf<T> {}

impl<T: Temporal + Hash> Hash for NearestOf<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.adjustments.hash(state);
    }
}
