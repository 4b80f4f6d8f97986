//! The adjustment capability and the closed set of adjustment kinds.
//!
//! An [`Adjuster`] maps a point in time to another point in time, or reports
//! that it cannot apply to that input. [`Adjustment`] enumerates every kind
//! the engine knows how to combine, so compounds can store a homogeneous,
//! comparable list.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::all_of::AllOf;
use crate::criterion::Criterion;
use crate::error::Result;
use crate::forward_only::ForwardOnly;
use crate::nearest_of::NearestOf;
use crate::period::Period;
use crate::point::Temporal;

/// A pure, possibly failing mapping from one point in time to another.
///
/// Implementations must be deterministic: the same input always yields the
/// same output. The searches in this crate rely on it for convergence.
pub trait Adjuster<T: Temporal> {
    fn adjust(&self, temporal: &T) -> Result<T>;
}

impl<T: Temporal, A: Adjuster<T> + ?Sized> Adjuster<T> for &A {
    fn adjust(&self, temporal: &T) -> Result<T> {
        (**self).adjust(temporal)
    }
}

impl<T: Temporal, A: Adjuster<T> + ?Sized> Adjuster<T> for Box<A> {
    fn adjust(&self, temporal: &T) -> Result<T> {
        (**self).adjust(temporal)
    }
}

impl<T: Temporal, A: Adjuster<T> + ?Sized> Adjuster<T> for Arc<A> {
    fn adjust(&self, temporal: &T) -> Result<T> {
        (**self).adjust(temporal)
    }
}

/// An adjustment with a natural recurrence interval.
///
/// Each Monday is a week apart; each March 31 is a year apart. Searches use
/// the period to step to the next plausible occurrence.
pub trait Periodic<T: Temporal>: Adjuster<T> {
    fn period(&self) -> Period;

    /// `temporal` advanced by one period.
    fn next_period(&self, temporal: &T) -> Result<T> {
        temporal.plus(&self.period())
    }
}

// ── FnAdjuster ──────────────────────────────────────────────────────────────

type AdjustFn<T> = dyn Fn(&T) -> Result<T> + Send + Sync;

/// A caller-supplied adjustment closure.
///
/// Equality and hashing follow identity: clones of one `FnAdjuster` compare
/// equal, two wrappers built from separate closures never do.
pub struct FnAdjuster<T> {
    name: Arc<str>,
    func: Arc<AdjustFn<T>>,
}

impl<T> FnAdjuster<T> {
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&T) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Temporal> Adjuster<T> for FnAdjuster<T> {
    fn adjust(&self, temporal: &T) -> Result<T> {
        (self.func)(temporal)
    }
}

impl<T> Clone for FnAdjuster<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            func: Arc::clone(&self.func),
        }
    }
}

impl<T> fmt::Debug for FnAdjuster<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnAdjuster").field(&self.name).finish()
    }
}

impl<T> PartialEq for FnAdjuster<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<T> Eq for FnAdjuster<T> {}

impl<T> Hash for FnAdjuster<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.func) as *const () as usize).hash(state);
    }
}

// ── SimplePeriodic ──────────────────────────────────────────────────────────

/// An adjustment paired with its recurrence period.
///
/// The period does not influence the adjustment itself; it is carried for
/// wrappers such as [`ForwardOnly`] that need to step between occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimplePeriodic<T: Temporal> {
    adjustment: Adjustment<T>,
    period: Period,
}

impl<T: Temporal> SimplePeriodic<T> {
    pub fn new(adjustment: impl Into<Adjustment<T>>, period: Period) -> Self {
        Self {
            adjustment: adjustment.into(),
            period,
        }
    }

    pub fn adjustment(&self) -> &Adjustment<T> {
        &self.adjustment
    }
}

impl<T: Temporal> Adjuster<T> for SimplePeriodic<T> {
    fn adjust(&self, temporal: &T) -> Result<T> {
        self.adjustment.adjust(temporal)
    }
}

impl<T: Temporal> Periodic<T> for SimplePeriodic<T> {
    fn period(&self) -> Period {
        self.period
    }
}

// ── Adjustment ──────────────────────────────────────────────────────────────

/// Every kind of adjustment the engine can store and combine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Adjustment<T: Temporal> {
    /// A built-in single-criterion adjustment.
    Criterion(Criterion),
    /// A caller-supplied closure.
    Custom(FnAdjuster<T>),
    /// An adjustment tagged with its recurrence period.
    Simple(Box<SimplePeriodic<T>>),
    /// Satisfy every member simultaneously.
    AllOf(AllOf<T>),
    /// Whichever member lands closest to the input.
    NearestOf(NearestOf<T>),
    /// Strictly later than the input.
    ForwardOnly(Box<ForwardOnly<T>>),
}

impl<T: Temporal> Adjustment<T> {
    /// The recurrence period, for the kinds that carry one.
    pub fn period(&self) -> Option<Period> {
        match self {
            Adjustment::Simple(simple) => Some(simple.period()),
            Adjustment::AllOf(all_of) => Some(all_of.period()),
            Adjustment::ForwardOnly(forward) => Some(forward.period()),
            Adjustment::Criterion(_) | Adjustment::Custom(_) | Adjustment::NearestOf(_) => None,
        }
    }
}

impl<T: Temporal> Adjuster<T> for Adjustment<T> {
    fn adjust(&self, temporal: &T) -> Result<T> {
        match self {
            Adjustment::Criterion(criterion) => criterion.adjust(temporal),
            Adjustment::Custom(func) => func.adjust(temporal),
            Adjustment::Simple(simple) => simple.adjust(temporal),
            Adjustment::AllOf(all_of) => all_of.adjust(temporal),
            Adjustment::NearestOf(nearest_of) => nearest_of.adjust(temporal),
            Adjustment::ForwardOnly(forward) => forward.adjust(temporal),
        }
    }
}

impl<T: Temporal> From<Criterion> for Adjustment<T> {
    fn from(criterion: Criterion) -> Self {
        Adjustment::Criterion(criterion)
    }
}

impl<T: Temporal> From<FnAdjuster<T>> for Adjustment<T> {
    fn from(func: FnAdjuster<T>) -> Self {
        Adjustment::Custom(func)
    }
}

impl<T: Temporal> From<SimplePeriodic<T>> for Adjustment<T> {
    fn from(simple: SimplePeriodic<T>) -> Self {
        Adjustment::Simple(Box::new(simple))
    }
}

impl<T: Temporal> From<AllOf<T>> for Adjustment<T> {
    fn from(all_of: AllOf<T>) -> Self {
        Adjustment::AllOf(all_of)
    }
}

impl<T: Temporal> From<NearestOf<T>> for Adjustment<T> {
    fn from(nearest_of: NearestOf<T>) -> Self {
        Adjustment::NearestOf(nearest_of)
    }
}

impl<T: Temporal> From<ForwardOnly<T>> for Adjustment<T> {
    fn from(forward: ForwardOnly<T>) -> Self {
        Adjustment::ForwardOnly(Box::new(forward))
    }
}
