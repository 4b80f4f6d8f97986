//! # occurrence-engine
//!
//! Deterministic calendar search built from single-criterion adjustments.
//!
//! Small adjustments ("day 31", "third Thursday", "minute 30") are combined
//! into compound searches that return the nearest or next point in time
//! satisfying all of them. Every function is pure: the caller supplies the
//! starting point, and the same inputs always produce the same result.
//!
//! ## Modules
//!
//! - [`point`] — [`Temporal`] capability for `chrono` dates, date-times and zoned date-times
//! - [`period`] — [`Period`], the forward step between search attempts
//! - [`adjuster`] — [`Adjuster`] / [`Periodic`] traits and the [`Adjustment`] kinds
//! - [`criterion`] — Built-in single-criterion adjustments
//! - [`compound`] — Ordered adjustment list shared by compound kinds
//! - [`all_of`] — Fixed-point search satisfying every criterion at once
//! - [`nearest_of`] — Closest result among alternative criteria
//! - [`forward_only`] — Occurrences strictly after the input
//! - [`config`] — Search iteration limits
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use chrono::{NaiveDate, Weekday};
//! use occurrence_engine::{Adjuster, AllOf, Criterion, ForwardOnly, Period};
//!
//! // Every US Thanksgiving: the fourth Thursday of November.
//! let thanksgiving = ForwardOnly::of(AllOf::new(
//!     [Criterion::Month(11), Criterion::nth_weekday_in_month(4, Weekday::Thu)],
//!     Period::of_years(1),
//! ));
//! let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! assert_eq!(
//!     thanksgiving.adjust(&today).unwrap(),
//!     NaiveDate::from_ymd_opt(2026, 11, 26).unwrap()
//! );
//! ```

pub mod adjuster;
pub mod all_of;
pub mod compound;
pub mod config;
pub mod criterion;
pub mod error;
pub mod forward_only;
pub mod nearest_of;
pub mod period;
pub mod point;

pub use adjuster::{Adjuster, Adjustment, FnAdjuster, Periodic, SimplePeriodic};
pub use all_of::AllOf;
pub use compound::AdjusterList;
pub use config::{SearchLimits, DEFAULT_MAX_ATTEMPTS};
pub use criterion::{Criterion, WeekStartDay};
pub use error::{AdjustError, Result};
pub use forward_only::ForwardOnly;
pub use nearest_of::NearestOf;
pub use period::Period;
pub use point::{Precision, Temporal};
