use super::*;
use std::fmt;

/// Counts of points falling into each of the four quadrants of the plane,
/// over a range.
///
/// Combining adds the counters element-wise. The span is left as it is.
/// A payload is [empty](AggregableRange::is_empty) when all four counters are zero,
/// whether it was cleared or built that way.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct QuadrantPayload {
    span: Span,
    quads: [i64; 4],
}

impl QuadrantPayload {
    pub fn new(start: i64, end: i64, quads: [i64; 4]) -> Self {
        QuadrantPayload {
            span: Span::new(start, end),
            quads,
        }
    }

    pub fn at(index: i64, quads: [i64; 4]) -> Self {
        QuadrantPayload::new(index, index, quads)
    }

    /// A range with every counter at zero.
    pub fn zeroed(start: i64, end: i64) -> Self {
        QuadrantPayload::new(start, end, [0; 4])
    }

    pub fn quads(&self) -> [i64; 4] {
        self.quads
    }

    pub fn quad(&self, index: usize) -> i64 {
        self.quads[index]
    }
}

impl AggregableRange for QuadrantPayload {
    fn span(&self) -> Span {
        self.span
    }

    fn span_mut(&mut self) -> &mut Span {
        &mut self.span
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        for (ours, theirs) in self.quads.iter_mut().zip(other.quads.iter()) {
            *ours = ours.wrapping_add(*theirs);
        }
        self
    }

    fn clear(&mut self) {
        self.span = Span::UNBOUNDED;
        self.quads = [0; 4];
    }

    fn is_empty(&self) -> bool {
        self.quads == [0; 4]
    }
}

impl fmt::Display for QuadrantPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [q0, q1, q2, q3] = self.quads;
        write!(f, "{} {},{},{},{}", self.span, q0, q1, q2, q3)
    }
}

#[test]
fn quadrants_add_up() {
    let mut a = QuadrantPayload::at(0, [1, 2, 3, 4]);
    a.combine(&QuadrantPayload::new(-5, 5, [10, 20, 30, 40]));
    assert_eq!(a.quads(), [11, 22, 33, 44]);
    assert_eq!(a.span(), Span::point(0));
    assert_eq!(a.quad(2), 33);
    assert_eq!(a.to_string(), "0->0 11,22,33,44");

    a.clear();
    assert!(a.is_empty());
    assert_eq!(a, QuadrantPayload::new(i64::MIN, i64::MAX, [0; 4]));
}

#[cfg(test)]
use crate::{DynamicSegmentTree, FlatSegmentTree, IntervalTree, RangeTree};

#[test]
fn zeroed_quadrants_are_still_found() {
    let zeroed = QuadrantPayload::zeroed(0, 4);
    assert!(zeroed.is_empty());
    let payloads = vec![zeroed, QuadrantPayload::new(5, 9, [1, 0, 0, 2])];

    let tree = IntervalTree::build(payloads.clone());
    tree.assert_correctness();
    assert_eq!(tree.query(2), Some(zeroed));

    let tree = FlatSegmentTree::build(payloads.clone()).unwrap();
    tree.assert_correctness();
    assert_eq!(tree.query(2), Some(zeroed));
    assert_eq!(tree.query(7).unwrap().quads(), [1, 0, 0, 2]);

    let tree = DynamicSegmentTree::build(payloads).unwrap();
    tree.assert_correctness();
    let found = tree.query(2).unwrap();
    assert!(found.is_empty());
    assert_eq!(found.span(), Span::point(2));
}
