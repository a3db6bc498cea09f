mod common;
use common::*;

use intervals::*;

const NUM_ROUNDS: usize = if cfg!(not(miri)) { 50 } else { 3 }; // miri is too slow
const NUM_RANGES: usize = 100;

#[test]
fn interval_tree_consistency() {
    for round in 0..NUM_ROUNDS {
        let reference = Reference::new(random_spans(round + 1, 200));
        let tree: IntervalTree<_> = reference.tagged().into_iter().collect();
        assert_eq!(tree.len(), round + 1);
        check_against_reference(&tree, &reference, NUM_RANGES);
    }
}

#[test]
fn dynamic_tree_consistency() {
    for round in 0..NUM_ROUNDS {
        let reference = Reference::new(random_spans(round + 1, 200));
        let tree = DynamicSegmentTree::build(reference.tagged()).unwrap();
        check_against_reference(&tree, &reference, NUM_RANGES);
    }
}

#[test]
fn flat_tree_consistency() {
    for round in 0..NUM_ROUNDS {
        let reference = Reference::new(random_disjoint_spans(round + 1, 300));
        let tree = FlatSegmentTree::build(reference.tagged()).unwrap();
        check_against_reference(&tree, &reference, NUM_RANGES);
    }
}

#[test]
fn interval_tree_over_disjoint_spans() {
    for round in 0..NUM_ROUNDS {
        let reference = Reference::new(random_disjoint_spans(round + 1, 300));
        let tree = IntervalTree::build(reference.tagged());
        check_against_reference(&tree, &reference, NUM_RANGES);
    }
}

#[test]
fn point_sums_agree() {
    for round in 0..NUM_ROUNDS {
        let reference = Reference::new(random_disjoint_spans(round + 1, 300));
        let values = random_values(round + 1);
        let interval = IntervalTree::build(reference.summed(&values));
        let flat = FlatSegmentTree::build(reference.summed(&values)).unwrap();
        let dynamic = DynamicSegmentTree::build(reference.summed(&values)).unwrap();

        let (low, high) = reference.bounds();
        for index in low..=high {
            let expected = reference.sum_at(&values, index);
            let sum = |found: Option<RangeSumPayload<i64>>| found.and_then(|p| p.sum().cloned());
            assert_eq!(sum(interval.query(index)), expected);
            assert_eq!(sum(flat.query(index)), expected);
            assert_eq!(sum(dynamic.query(index)), expected);
        }
    }
}

#[test]
fn overlapping_point_sums() {
    for round in 0..NUM_ROUNDS {
        let reference = Reference::new(random_spans(round + 1, 100));
        let values = random_values(round + 1);
        let interval = IntervalTree::build(reference.summed(&values));
        let dynamic = DynamicSegmentTree::build(reference.summed(&values)).unwrap();

        let (low, high) = reference.bounds();
        for index in low..=high {
            let expected = reference.sum_at(&values, index);
            assert_eq!(interval.query(index).and_then(|p| p.sum().cloned()), expected);
            assert_eq!(dynamic.query(index).and_then(|p| p.sum().cloned()), expected);
        }
    }
}

#[test]
fn interval_tree_range_sums() {
    // every payload is met exactly once on the way down
    for round in 0..NUM_ROUNDS {
        let reference = Reference::new(random_spans(round + 1, 100));
        let values = random_values(round + 1);
        let tree = IntervalTree::build(reference.summed(&values));
        for _ in 0..NUM_RANGES {
            let (start, end) = random_query(&reference);
            let expected = reference
                .matching(start, end)
                .into_iter()
                .map(|i| values[i as usize])
                .fold(None, |acc, value| Some(acc.unwrap_or(0) + value));
            assert_eq!(tree.query_range(start, end).and_then(|p| p.sum().cloned()), expected);
        }
    }
}

#[test]
fn leaf_buckets_answer_points() {
    for min_length in [2, 3, 7, 64].iter() {
        let config = TreeConfig::new().with_min_length(*min_length);
        for round in 0..NUM_ROUNDS / 5 {
            let reference = Reference::new(random_disjoint_spans(round + 1, 200));
            let flat = FlatSegmentTree::build_with(reference.tagged(), &config).unwrap();
            let dynamic = DynamicSegmentTree::build_with(reference.tagged(), &config).unwrap();
            flat.assert_correctness();
            dynamic.assert_correctness();

            let (low, high) = reference.bounds();
            for index in low..=high {
                let expected = reference.matching(index, index);
                assert_eq!(tags(flat.query(index)), expected);
                assert_eq!(tags(dynamic.query(index)), expected);
            }
        }
    }
}

#[test]
fn extremes_at_points() {
    let reference = Reference::new(random_spans(40, 100));
    let values = random_values(40);
    let min_tree = DynamicSegmentTree::build(
        reference
            .spans
            .iter()
            .zip(values.iter())
            .map(|(span, &value)| RangeMinPayload::new(span.start, span.end, value))
            .collect(),
    )
    .unwrap();
    let max_tree: IntervalTree<_> = reference
        .spans
        .iter()
        .zip(values.iter())
        .map(|(span, &value)| RangeMaxPayload::new(span.start, span.end, value))
        .collect();

    let (low, high) = reference.bounds();
    for index in low..=high {
        let found: Vec<i64> = reference
            .matching(index, index)
            .into_iter()
            .map(|i| values[i as usize])
            .collect();
        assert_eq!(
            min_tree.query(index).and_then(|p| p.minimum().cloned()),
            found.iter().cloned().min()
        );
        assert_eq!(
            max_tree.query(index).and_then(|p| p.maximum().cloned()),
            found.iter().cloned().max()
        );
    }
}

#[test]
fn mixed_payload_kinds() {
    type Mixed = AnyPayload<&'static str, Number>;
    let tree = IntervalTree::<Mixed>::build(vec![
        RangeSumPayload::new(0, 10, Number::Int(1)).into(),
        RangeSumPayload::new(5, 15, Number::Double(0.5)).into(),
        IntervalPayload::new(0, 20, "tag").into(),
    ]);
    tree.assert_correctness();
    // whichever payload is met first decides the kind, the rest of the other kind is ignored
    let found = tree.query(7).unwrap();
    match found {
        AnyPayload::Sum(sum) => assert_eq!(sum.sum(), Some(&Number::Double(1.5))),
        AnyPayload::Interval(tags) => assert_eq!(tags.values().cloned().collect::<Vec<_>>(), vec!["tag"]),
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn trees_are_shareable() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}
    let tree = FlatSegmentTree::build(vec![RangeSumPayload::new(0, 3, 1i64)]).unwrap();
    assert_send_sync(&tree);
    let tree = std::sync::Arc::new(tree);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tree = tree.clone();
            std::thread::spawn(move || tree.query(i).and_then(|p| p.sum().cloned()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(1));
    }
}
