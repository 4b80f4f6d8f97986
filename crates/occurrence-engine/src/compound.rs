//! Shared storage for compound adjustments.

use std::sync::Arc;

use crate::adjuster::Adjustment;
use crate::point::Temporal;

/// An ordered, immutable list of adjustments.
///
/// Order is significant: [`AllOf`](crate::AllOf) applies members in list order,
/// and two lists are equal only when they hold equal members in the same order.
/// Clones share the underlying storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdjusterList<T: Temporal> {
    adjustments: Arc<[Adjustment<T>]>,
}

impl<T: Temporal> AdjusterList<T> {
    pub fn new<I, A>(adjustments: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Adjustment<T>>,
    {
        Self {
            adjustments: adjustments.into_iter().map(Into::<Adjustment<T>>::into).collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Adjustment<T>> {
        self.adjustments.iter()
    }

    pub fn len(&self) -> usize {
        self.adjustments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }

    pub fn as_slice(&self) -> &[Adjustment<T>] {
        &self.adjustments
    }
}

impl<'a, T: Temporal> IntoIterator for &'a AdjusterList<T> {
    type Item = &'a Adjustment<T>;
    type IntoIter = std::slice::Iter<'a, Adjustment<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Temporal, A: Into<Adjustment<T>>> FromIterator<A> for AdjusterList<T> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self::new(iter)
    }
}
