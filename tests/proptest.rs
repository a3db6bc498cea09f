pub mod common;
pub use common::*;

use intervals::*;
use itertools::Itertools;
use proptest::prelude::*;

fn span_strategy(domain: i64) -> impl Strategy<Value = Span> {
    (0..domain, 0..domain / 4).prop_map(move |(start, len)| Span::new(start, (start + len).min(domain - 1)))
}

fn spans_strategy() -> impl Strategy<Value = Vec<Span>> {
    proptest::collection::vec(span_strategy(120), 0..40)
}

/// Spans that never overlap, though they may touch.
fn disjoint_spans_strategy() -> impl Strategy<Value = Vec<Span>> {
    proptest::collection::vec(0..150i64, 0..40)
        .prop_map(|mut points| {
            points.sort_unstable();
            points
                .into_iter()
                .tuples()
                .map(|(start, end)| Span::new(start, end))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn query_strategy() -> impl Strategy<Value = (i64, i64)> {
    (-5..160i64, -5..160i64).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

fn quads_strategy() -> impl Strategy<Value = [i64; 4]> {
    [-1000..1000i64, -1000..1000i64, -1000..1000i64, -1000..1000i64]
}

fn check_tree<T>(tree: &T, reference: &Reference, queries: &[(i64, i64)]) -> Result<(), TestCaseError>
where
    T: RangeTree<IntervalPayload<u32>>,
{
    tree.assert_correctness();
    let (low, high) = reference.bounds();
    for index in low..=high {
        let expected = reference.matching(index, index);
        let found = tags(tree.query(index));
        // every payload containing the point is found, and nothing is found outside of all spans
        prop_assert_eq!(found, expected);
    }
    for &(start, end) in queries {
        prop_assert_eq!(tags(tree.query_range(start, end)), reference.matching(start, end));
    }
    Ok(())
}

proptest::proptest! {
    #[test]
    fn interval_tree_proptest(spans in spans_strategy(), queries in proptest::collection::vec(query_strategy(), 0..20)) {
        let reference = Reference::new(spans);
        let tree = IntervalTree::build(reference.tagged());
        check_tree(&tree, &reference, &queries)?;
    }

    #[test]
    fn dynamic_tree_proptest(spans in spans_strategy(), queries in proptest::collection::vec(query_strategy(), 0..20)) {
        let reference = Reference::new(spans);
        let tree = DynamicSegmentTree::build(reference.tagged()).unwrap();
        check_tree(&tree, &reference, &queries)?;
    }

    #[test]
    fn flat_tree_proptest(spans in disjoint_spans_strategy(), queries in proptest::collection::vec(query_strategy(), 0..20)) {
        let reference = Reference::new(spans);
        let tree = FlatSegmentTree::build(reference.tagged()).unwrap();
        check_tree(&tree, &reference, &queries)?;
    }

    #[test]
    fn flat_tree_rejects_overlaps(mut spans in disjoint_spans_strategy(), extra in span_strategy(150)) {
        let overlapping = spans.iter().any(|span| extra.start < span.end && span.start < extra.end);
        spans.push(extra);
        let res = FlatSegmentTree::build(Reference::new(spans).tagged());
        if overlapping {
            let is_overlap_error = matches!(res, Err(TreeError::OverlappingSegments { .. }));
            prop_assert!(is_overlap_error);
        }
    }
}

proptest::proptest! {
    #[test]
    fn sum_is_associative(a in -1000..1000i64, b in -1000..1000i64, c in -1000..1000i64) {
        let (a, b, c) = (RangeSumPayload::at(0, a), RangeSumPayload::at(0, b), RangeSumPayload::at(0, c));
        let left = a.clone().combine(&b).combine(&c).clone();
        let right = a.clone().combine(b.clone().combine(&c)).clone();
        let swapped = c.clone().combine(&a).combine(&b).clone();
        prop_assert_eq!(left.sum(), right.sum());
        prop_assert_eq!(left.sum(), swapped.sum());
    }

    #[test]
    fn extremes_are_associative(a in -1000..1000i64, b in -1000..1000i64, c in -1000..1000i64) {
        let mins: Vec<_> = [a, b, c].iter().map(|&v| RangeMinPayload::at(0, v)).collect();
        let maxs: Vec<_> = [a, b, c].iter().map(|&v| RangeMaxPayload::at(0, v)).collect();
        let (smallest, largest) = (a.min(b).min(c), a.max(b).max(c));
        for order in (0..3).permutations(3) {
            let mut min = mins[order[0]].clone();
            min.combine(mins[order[1]].clone().combine(&mins[order[2]]));
            prop_assert_eq!(min.minimum(), Some(&smallest));

            let mut max = maxs[order[0]].clone();
            max.combine(&maxs[order[1]]).combine(&maxs[order[2]]);
            prop_assert_eq!(max.maximum(), Some(&largest));
        }
    }

    #[test]
    fn quadrants_are_associative(a in quads_strategy(), b in quads_strategy(), c in quads_strategy()) {
        let (a, b, c) = (QuadrantPayload::at(0, a), QuadrantPayload::at(0, b), QuadrantPayload::at(0, c));
        let left = a.clone().combine(&b).combine(&c).quads();
        let right = a.clone().combine(c.clone().combine(&b)).quads();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn combining_a_copy(value in -1000..1000i64, span in span_strategy(100)) {
        let sum = RangeSumPayload::new(span.start, span.end, value);
        let doubled = sum.clone().combine(&sum.clone()).clone();
        let twice = 2 * value;
        prop_assert_eq!(doubled.sum(), Some(&twice));
        prop_assert_eq!(doubled.span(), span);

        let min = RangeMinPayload::new(span.start, span.end, value);
        prop_assert_eq!(min.clone().combine(&min.clone()).clone(), min);

        let max = RangeMaxPayload::new(span.start, span.end, value);
        prop_assert_eq!(max.clone().combine(&max.clone()).clone(), max);
    }

    #[test]
    fn numbers_promote_consistently(a in -1000..1000i32, b in -1000..1000i64) {
        let sum = Number::Int(a).add(&Number::Long(b));
        prop_assert_eq!(sum.clone(), Number::Long(a as i64 + b));
        prop_assert_eq!(sum, Number::Long(b).add(&Number::Int(a)));
    }
}
