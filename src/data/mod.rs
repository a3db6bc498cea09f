//! The payloads stored inside the trees.
//!
//! A payload is a closed span of points together with an aggregable value.
//! The trees never look at the value itself: they only move payloads around by their
//! spans, and [`combine`](AggregableRange::combine) the payloads of matching ranges
//! into a single result.

mod any;
mod interval;
mod numeric;
mod quadrant;
mod range_data;
mod span;

pub use any::*;
pub use interval::*;
pub use numeric::*;
pub use quadrant::*;
pub use range_data::*;
pub use span::*;

use std::cmp::Ordering;

/// This trait represents the data that will be stored inside the trees:
/// a span `[start, end]` of `i64` points and a value attached to the whole span.
///
/// Implementations must make sure that:
/// * `combine` merges `other`'s value into `self` and returns `self`. The merge itself
///   (sum, minimum, union, ...) is expected to be associative and commutative, but which
///   operand keeps its representation is not: it is always `self` that is changed.
/// * `clone` is a deep copy: changing the clone must not change the original.
/// * `clear` forgets the value and resets the span to [`Span::UNBOUNDED`].
pub trait AggregableRange: Clone + std::fmt::Debug {
    fn span(&self) -> Span;

    fn span_mut(&mut self) -> &mut Span;

    /// Merges `other` into `self`.
    fn combine(&mut self, other: &Self) -> &mut Self;

    /// Forgets the value and resets the span.
    fn clear(&mut self);

    /// Whether the value is the one left by [`clear`](AggregableRange::clear).
    /// For payloads without a separate empty state, such as counters, this is the
    /// neutral value, so a payload built with it is also empty. The trees never
    /// use this to skip payloads.
    fn is_empty(&self) -> bool;

    fn start(&self) -> i64 {
        self.span().start
    }

    fn end(&self) -> i64 {
        self.span().end
    }

    /// Returns a copy of this payload if its span intersects `start..=end`.
    fn query(&self, start: i64, end: i64) -> Option<Self> {
        if self.span().intersects(start, end) {
            Some(self.clone())
        } else {
            None
        }
    }

    /// Returns a copy of this payload if its span contains `index`.
    fn query_point(&self, index: i64) -> Option<Self> {
        self.query(index, index)
    }

    /// Payloads are ordered by their end point only.
    /// Two payloads with the same end compare as equal.
    fn cmp_by_end(&self, other: &Self) -> Ordering {
        self.end().cmp(&other.end())
    }

    /// A cleared copy of this payload, spanning `span`.
    fn empty_over(&self, span: Span) -> Self {
        let mut res = self.clone();
        res.clear();
        *res.span_mut() = span;
        res
    }
}

/// Adds a partial query result to the accumulated result.
/// The first result found becomes the accumulator; later ones are combined into it.
pub fn accumulate<D: AggregableRange>(acc: Option<D>, next: Option<D>) -> Option<D> {
    match (acc, next) {
        (None, next) => next,
        (acc, None) => acc,
        (Some(mut acc), Some(next)) => {
            acc.combine(&next);
            Some(acc)
        }
    }
}
