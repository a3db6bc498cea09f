use super::*;
use crate::trees::printer::write_tree;
use crate::trees::RangeTree;
use tracing::{debug, trace};

/// A segment tree over possibly overlapping ranges.
///
/// Every segment keeps an index of the payload pieces intersecting it, so the
/// ranges don't need to be disjoint. The domain reaches one point past the
/// ranges on each side.
///
/// The span of a query result is always the queried range:
///```
/// use intervals::*;
///
/// let tree = DynamicSegmentTree::build(vec![
///     RangeMinPayload::new(0, 10, 5),
///     RangeMinPayload::new(3, 7, 2),
/// ])
/// .unwrap();
/// let found = tree.query(5).unwrap();
/// assert_eq!(found.minimum(), Some(&2));
/// assert_eq!(found.span(), Span::point(5));
/// # tree.assert_correctness();
///```
#[derive(Clone, Debug)]
pub struct DynamicSegmentTree<D> {
    root: Option<Segment<D>>,
    len: usize,
}

impl<D: AggregableRange> DynamicSegmentTree<D> {
    /// Builds a tree with the default configuration.
    pub fn build(payloads: Vec<D>) -> Result<Self, TreeError> {
        DynamicSegmentTree::build_with(payloads, &TreeConfig::default())
    }

    pub fn build_with(mut payloads: Vec<D>, config: &TreeConfig) -> Result<Self, TreeError> {
        if payloads.is_empty() {
            if config.reject_empty {
                return Err(TreeError::EmptyInput);
            }
            return Ok(DynamicSegmentTree { root: None, len: 0 });
        }

        let len = payloads.len();
        payloads.sort_by_key(|payload| payload.start());
        payloads.sort_by(|a, b| a.cmp_by_end(b));

        let min_start = payloads.iter().map(|p| p.start()).min().unwrap_or_default();
        let max_end = payloads[len - 1].end();
        let too_large = TreeError::DomainTooLarge {
            start: min_start,
            end: max_end,
        };
        let start = min_start.checked_sub(1).ok_or_else(|| too_large.clone())?;
        let end = max_end.checked_add(1).ok_or(too_large)?;
        domain_length(start, end)?;

        let mut pieces = Vec::with_capacity(len + 2);
        pieces.push(Piece::sentinel(Span::point(start)));
        pieces.extend(payloads.into_iter().map(Piece::source));
        pieces.push(Piece::sentinel(Span::point(end)));

        let root = Segment::build(pieces, Span::new(start, end), config, Layout::Dynamic);
        debug!(
            payloads = len,
            nodes = root.node_count(),
            domain = %root.span,
            "built dynamic segment tree"
        );
        Ok(DynamicSegmentTree {
            root: Some(root),
            len,
        })
    }

    /// The number of payloads the tree was built from.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The span covered by the tree, including the point of padding on each side.
    pub fn domain(&self) -> Option<Span> {
        self.root.as_ref().map(|root| root.span)
    }
}

impl<D: AggregableRange> Segment<D> {
    fn dynamic_query(&self, start: i64, end: i64) -> Option<D> {
        if start == self.start() && end == self.end() {
            return self.indexed_query(start, end);
        }

        match &self.children {
            None => {
                if !self.span.intersects(start, end) {
                    return None;
                }
                self.indexed_query(start, end)
            }
            Some(children) => {
                let [left, right] = &**children;
                let middle = self.middle();
                if start < middle && end >= middle {
                    accumulate(
                        left.dynamic_query(start, middle - 1),
                        right.dynamic_query(middle, end),
                    )
                } else if end < middle {
                    left.dynamic_query(start, end)
                } else {
                    right.dynamic_query(start, end)
                }
            }
        }
    }

    fn indexed_query(&self, start: i64, end: i64) -> Option<D> {
        self.pieces
            .iter()
            .filter(|piece| piece.span.intersects(start, end))
            .filter_map(Piece::payload)
            .fold(None, |acc, payload| accumulate(acc, payload.query(start, end)))
    }

    /// Every segment indexes exactly the payload pieces intersecting it.
    fn assert_indexed(&self) {
        for piece in self.pieces.iter() {
            assert!(piece.payload().is_some());
        }
        if let Some(children) = &self.children {
            let [left, right] = &**children;
            let below: usize = children.iter().map(|child| child.pieces.len()).sum();
            let crossing = self
                .pieces
                .iter()
                .filter(|piece| piece.start() < right.start() && piece.end() >= right.start())
                .count();
            assert_eq!(below, self.pieces.len() + crossing);
            left.assert_indexed();
            right.assert_indexed();
        }
    }
}

impl<D: AggregableRange> RangeTree<D> for DynamicSegmentTree<D> {
    fn query_range(&self, start: i64, end: i64) -> Option<D> {
        let root = self.root.as_ref()?;
        trace!(start, end, "dynamic segment tree query");
        let clamped_start = start.max(root.start());
        let clamped_end = end.min(root.end());
        if clamped_start > clamped_end {
            return None;
        }
        let mut result = root.dynamic_query(clamped_start, clamped_end)?;
        *result.span_mut() = Span::new(start, end);
        Some(result)
    }

    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn assert_correctness(&self) {
        match &self.root {
            None => assert_eq!(self.len, 0),
            Some(root) => {
                root.assert_correctness();
                root.assert_split_at_boundaries();
                root.assert_indexed();
                assert_eq!(root.pieces.len(), self.len);
            }
        }
    }
}

impl<D: fmt::Display> fmt::Display for DynamicSegmentTree<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self.root.as_ref())
    }
}

#[cfg(test)]
use crate::data::{IntervalPayload, Number, RangeMinPayload, RangeSumPayload};

#[test]
fn minimum_at_a_point() {
    let tree = DynamicSegmentTree::build(vec![
        RangeMinPayload::new(0, 10, 5i64),
        RangeMinPayload::new(3, 7, 2),
    ])
    .unwrap();
    tree.assert_correctness();
    assert_eq!(tree.query(5).unwrap().minimum(), Some(&2));
    assert_eq!(tree.query(1).unwrap().minimum(), Some(&5));
    assert_eq!(tree.query(10).unwrap().minimum(), Some(&5));
    assert_eq!(tree.query(11), None);
    assert_eq!(tree.query(-1), None);
    assert_eq!(tree.query(-40), None);
    assert_eq!(tree.domain(), Some(Span::new(-1, 11)));
}

#[test]
fn overlapping_sums() {
    let tree = DynamicSegmentTree::build(vec![
        RangeSumPayload::new(5, 14, 2i32),
        RangeSumPayload::new(0, 9, 1),
        RangeSumPayload::at(12, 4),
    ])
    .unwrap();
    tree.assert_correctness();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.query(2).unwrap().sum(), Some(&1));
    assert_eq!(tree.query(6).unwrap().sum(), Some(&3));
    assert_eq!(tree.query(12).unwrap().sum(), Some(&6));
    assert_eq!(tree.query(13).unwrap().sum(), Some(&2));
    assert_eq!(tree.query(20), None);
}

#[test]
fn result_spans_the_query() {
    let tree = DynamicSegmentTree::build(vec![
        RangeSumPayload::new(0, 9, 1i64),
        RangeSumPayload::new(20, 29, 1),
    ])
    .unwrap();
    assert_eq!(tree.query(5).unwrap().span(), Span::point(5));
    let found = tree.query_range(-50, 2).unwrap();
    assert_eq!(found.span(), Span::new(-50, 2));
    assert_eq!(found.sum(), Some(&1));
    assert_eq!(tree.query_range(12, 18), None);
}

#[test]
fn stabbing_with_tags() {
    let tree = DynamicSegmentTree::build(vec![
        IntervalPayload::new(1, 3, "A"),
        IntervalPayload::new(5, 8, "B"),
        IntervalPayload::new(2, 4, "C"),
    ])
    .unwrap();
    tree.assert_correctness();
    let found = tree.query(3).unwrap();
    assert_eq!(found, IntervalPayload::with_values(3, 3, vec!["A", "C"]));
    assert_eq!(tree.query(9), None);
}

#[test]
fn wide_payloads_stay_small() {
    let wide = 1i64 << 40;
    let tree = DynamicSegmentTree::build(vec![
        IntervalPayload::new(0, wide, 'a'),
        IntervalPayload::new(wide / 2, 2 * wide, 'b'),
    ])
    .unwrap();
    tree.assert_correctness();
    let nodes = tree.root.as_ref().unwrap().node_count();
    assert!(nodes < 1000, "{} segments", nodes);

    let values = |found: Option<IntervalPayload<char>>| -> String {
        found.map(|p| p.values().collect()).unwrap_or_default()
    };
    assert_eq!(values(tree.query(7)), "a");
    assert_eq!(values(tree.query(wide / 2 + 3)), "ab");
    assert_eq!(values(tree.query(wide + 1)), "b");
    assert_eq!(tree.query(-1), None);
    assert_eq!(tree.query(2 * wide + 1), None);

    let found = tree.query_range(3, wide).unwrap();
    assert_eq!(found, IntervalPayload::with_values(3, wide, vec!['a', 'b']));
}

#[test]
fn leaf_buckets_give_the_same_answers() {
    let payloads = vec![
        RangeMinPayload::new(0, 10, Number::Int(5)),
        RangeMinPayload::new(3, 7, Number::Long(2)),
        RangeMinPayload::new(6, 20, Number::Double(-1.5)),
    ];
    let plain = DynamicSegmentTree::build(payloads.clone()).unwrap();
    let bucketed =
        DynamicSegmentTree::build_with(payloads, &TreeConfig::new().with_min_length(5)).unwrap();
    plain.assert_correctness();
    bucketed.assert_correctness();
    for index in -3..25 {
        assert_eq!(plain.query(index), bucketed.query(index));
    }
    assert_eq!(plain.query(6).unwrap().minimum(), Some(&Number::Double(-1.5)));
}

#[test]
fn empty_and_oversized_input() {
    let tree = DynamicSegmentTree::<RangeSumPayload<i32>>::build(vec![]).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.query_range(i64::MIN, i64::MAX), None);
    tree.assert_correctness();

    let res = DynamicSegmentTree::<RangeSumPayload<i32>>::build_with(
        vec![],
        &TreeConfig::new().rejecting_empty(),
    );
    assert_eq!(res.unwrap_err(), TreeError::EmptyInput);

    let res = DynamicSegmentTree::build(vec![RangeSumPayload::at(i64::MAX, 1i32)]);
    assert_eq!(
        res.unwrap_err(),
        TreeError::DomainTooLarge {
            start: i64::MAX,
            end: i64::MAX
        }
    );
}

#[test]
fn printing() {
    let tree = DynamicSegmentTree::build(vec![RangeSumPayload::at(0, 1i32)]).unwrap();
    assert_eq!(
        tree.to_string(),
        "└── -1->1 Length=3 Data={0->0 sum=1} Pieces=[0->0]\n    \
         ├── -1->-1 Length=1 Data={}\n    \
         └── 0->1 Length=2 Data={0->0 sum=1} Pieces=[0->0]\n        \
         ├── 0->0 Length=1 Data={0->0 sum=1} Pieces=[0->0]\n        \
         └── 1->1 Length=1 Data={}\n"
    );
}
