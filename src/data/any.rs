use super::*;
use std::fmt;
use tracing::trace;

/// A payload whose kind is only known at runtime.
///
/// Lets a single tree hold payloads of different kinds. Combining two payloads of the
/// same kind delegates to that kind; combining payloads of different kinds does nothing
/// and leaves `self` as it was.
#[derive(Clone, PartialEq, Debug)]
pub enum AnyPayload<V: Ord, N> {
    Interval(IntervalPayload<V>),
    Sum(RangeSumPayload<N>),
    Min(RangeMinPayload<N>),
    Max(RangeMaxPayload<N>),
    Quadrant(QuadrantPayload),
}
use AnyPayload::*;

impl<V: Ord, N> AnyPayload<V, N> {
    /// The name of the payload kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Interval(_) => "interval",
            Sum(_) => "sum",
            Min(_) => "minimum",
            Max(_) => "maximum",
            Quadrant(_) => "quadrant",
        }
    }
}

impl<V, N> AggregableRange for AnyPayload<V, N>
where
    V: Ord + Clone + fmt::Debug,
    N: Numeric,
{
    fn span(&self) -> Span {
        match self {
            Interval(p) => p.span(),
            Sum(p) => p.span(),
            Min(p) => p.span(),
            Max(p) => p.span(),
            Quadrant(p) => p.span(),
        }
    }

    fn span_mut(&mut self) -> &mut Span {
        match self {
            Interval(p) => p.span_mut(),
            Sum(p) => p.span_mut(),
            Min(p) => p.span_mut(),
            Max(p) => p.span_mut(),
            Quadrant(p) => p.span_mut(),
        }
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        match (&mut *self, other) {
            (Interval(ours), Interval(theirs)) => {
                ours.combine(theirs);
            }
            (Sum(ours), Sum(theirs)) => {
                ours.combine(theirs);
            }
            (Min(ours), Min(theirs)) => {
                ours.combine(theirs);
            }
            (Max(ours), Max(theirs)) => {
                ours.combine(theirs);
            }
            (Quadrant(ours), Quadrant(theirs)) => {
                ours.combine(theirs);
            }
            (ours, theirs) => trace!(
                ours = ours.kind_name(),
                theirs = theirs.kind_name(),
                "ignoring combine of different payload kinds"
            ),
        }
        self
    }

    fn clear(&mut self) {
        match self {
            Interval(p) => p.clear(),
            Sum(p) => p.clear(),
            Min(p) => p.clear(),
            Max(p) => p.clear(),
            Quadrant(p) => p.clear(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Interval(p) => p.is_empty(),
            Sum(p) => p.is_empty(),
            Min(p) => p.is_empty(),
            Max(p) => p.is_empty(),
            Quadrant(p) => p.is_empty(),
        }
    }
}

impl<V: Ord + fmt::Debug, N: fmt::Display> fmt::Display for AnyPayload<V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval(p) => fmt::Display::fmt(p, f),
            Sum(p) => fmt::Display::fmt(p, f),
            Min(p) => fmt::Display::fmt(p, f),
            Max(p) => fmt::Display::fmt(p, f),
            Quadrant(p) => fmt::Display::fmt(p, f),
        }
    }
}

macro_rules! any_from {
    ($($variant:ident($t:ty)),*) => {
        $(
            impl<V: Ord, N> From<$t> for AnyPayload<V, N> {
                fn from(payload: $t) -> Self {
                    $variant(payload)
                }
            }
        )*
    };
}

any_from!(
    Interval(IntervalPayload<V>),
    Sum(RangeSumPayload<N>),
    Min(RangeMinPayload<N>),
    Max(RangeMaxPayload<N>),
    Quadrant(QuadrantPayload)
);

#[cfg(test)]
type Mixed = AnyPayload<&'static str, i64>;

#[test]
fn same_kind_delegates() {
    let mut sum: Mixed = RangeSumPayload::new(0, 3, 5).into();
    sum.combine(&RangeSumPayload::new(4, 6, 6).into());
    assert_eq!(sum, Sum(RangeSumPayload::new(0, 3, 11)));

    let mut tags: Mixed = IntervalPayload::new(0, 3, "a").into();
    tags.combine(&IntervalPayload::new(2, 8, "b").into());
    assert_eq!(tags, Interval(IntervalPayload::with_values(0, 8, vec!["a", "b"])));
}

#[test]
fn different_kinds_are_ignored() {
    let mut sum: Mixed = RangeSumPayload::new(0, 3, 5).into();
    let before = sum.clone();
    sum.combine(&RangeMinPayload::new(0, 3, -100).into());
    sum.combine(&QuadrantPayload::at(1, [1, 1, 1, 1]).into());
    sum.combine(&IntervalPayload::new(-10, 10, "x").into());
    assert_eq!(sum, before);
    assert_eq!(sum.span(), Span::new(0, 3));
}
