use super::*;
use std::collections::BTreeSet;
use std::fmt;

/// A range tagged with a set of values.
///
/// Combining two interval payloads takes the union of their sets, and widens the span
/// to cover both spans. This is the payload used for stabbing queries: the result of
/// a query holds every value whose range contained the queried point.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct IntervalPayload<V: Ord> {
    span: Span,
    set: BTreeSet<V>,
}

impl<V: Ord + Clone> IntervalPayload<V> {
    /// A payload holding `value` over `start..=end`.
    pub fn new(start: i64, end: i64, value: V) -> Self {
        let mut set = BTreeSet::new();
        set.insert(value);
        IntervalPayload {
            span: Span::new(start, end),
            set,
        }
    }

    /// A payload holding `value` at the single point `index`.
    pub fn at(index: i64, value: V) -> Self {
        IntervalPayload::new(index, index, value)
    }

    /// A payload holding every value of `values` over `start..=end`.
    pub fn with_values<I: IntoIterator<Item = V>>(start: i64, end: i64, values: I) -> Self {
        IntervalPayload {
            span: Span::new(start, end),
            set: values.into_iter().collect(),
        }
    }

    /// The values, in ascending order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.set.iter()
    }

    pub fn contains(&self, value: &V) -> bool {
        self.set.contains(value)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }
}

impl<V: Ord + Clone + fmt::Debug> AggregableRange for IntervalPayload<V> {
    fn span(&self) -> Span {
        self.span
    }

    fn span_mut(&mut self) -> &mut Span {
        &mut self.span
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        self.span.widen(other.span);
        self.set.extend(other.set.iter().cloned());
        self
    }

    fn clear(&mut self) {
        self.span = Span::UNBOUNDED;
        self.set.clear();
    }

    fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl<V: Ord + fmt::Debug> fmt::Display for IntervalPayload<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} set={:?}", self.span, self.set)
    }
}

#[test]
fn interval_combine_widens_and_unites() {
    let mut a = IntervalPayload::new(2, 4, "C");
    let b = IntervalPayload::new(1, 3, "A");
    a.combine(&b);
    assert_eq!(a.span(), Span::new(1, 4));
    assert_eq!(a.values().cloned().collect::<Vec<_>>(), vec!["A", "C"]);
    // the other operand is left as it was
    assert_eq!(b, IntervalPayload::new(1, 3, "A"));

    a.combine(&IntervalPayload::with_values(0, 2, vec!["A", "B"]));
    assert_eq!(a, IntervalPayload::with_values(0, 4, vec!["A", "B", "C"]));
}

#[test]
fn interval_equality_needs_span_and_set() {
    let a = IntervalPayload::with_values(1, 5, vec![1, 2]);
    assert_eq!(a, IntervalPayload::with_values(1, 5, vec![2, 1]));
    assert_ne!(a, IntervalPayload::with_values(1, 6, vec![1, 2]));
    assert_ne!(a, IntervalPayload::with_values(1, 5, vec![1]));
}

#[test]
fn interval_query_and_clear() {
    let mut a = IntervalPayload::new(10, 20, 'x');
    assert!(a.query_point(9).is_none());
    assert_eq!(a.query(0, 10), Some(a.clone()));
    assert_eq!(a.query_point(20), Some(a.clone()));

    a.clear();
    assert!(a.is_empty());
    assert_eq!(a.span(), Span::UNBOUNDED);
    assert_eq!(IntervalPayload::at(3, 'y').to_string(), "3->3 set={'y'}");
}
