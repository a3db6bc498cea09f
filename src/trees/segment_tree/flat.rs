use super::*;
use crate::trees::printer::write_tree;
use crate::trees::RangeTree;
use itertools::Itertools;
use tracing::{debug, trace};

/// A segment tree over non-overlapping ranges.
///
/// The ranges are sorted by their end points, and every hole between two consecutive
/// ranges is filled, so that the leaves of the tree cover the whole domain
/// from the first start to the last end. The filler never appears in query results.
///
/// Every segment stores the combination of the payloads inside it, so a query
/// matching a segment exactly is answered without descending further.
///
///```
/// use intervals::*;
///
/// let tree = FlatSegmentTree::build(vec![
///     RangeSumPayload::new(0, 4, 10),
///     RangeSumPayload::new(5, 9, 20),
/// ])
/// .unwrap();
/// assert_eq!(tree.query_range(2, 6).unwrap().sum(), Some(&30));
/// # tree.assert_correctness();
///```
#[derive(Clone, Debug)]
pub struct FlatSegmentTree<D> {
    root: Option<Segment<D>>,
    len: usize,
}

impl<D: AggregableRange> FlatSegmentTree<D> {
    /// Builds a tree with the default configuration.
    pub fn build(payloads: Vec<D>) -> Result<Self, TreeError> {
        FlatSegmentTree::build_with(payloads, &TreeConfig::default())
    }

    /// Builds a tree from `payloads`, which must not overlap.
    /// Ranges touching at a single point, where one ends and the next starts, are allowed.
    pub fn build_with(mut payloads: Vec<D>, config: &TreeConfig) -> Result<Self, TreeError> {
        if payloads.is_empty() {
            if config.reject_empty {
                return Err(TreeError::EmptyInput);
            }
            return Ok(FlatSegmentTree { root: None, len: 0 });
        }

        // by end, and by start among equal ends
        payloads.sort_by_key(|payload| payload.start());
        payloads.sort_by(|a, b| a.cmp_by_end(b));
        if let Some((first, second)) = payloads
            .iter()
            .tuple_windows()
            .find(|(prev, next)| prev.end() > next.start())
        {
            debug!(first = %first.span(), second = %second.span(), "overlapping segments");
            return Err(TreeError::OverlappingSegments {
                first: first.span(),
                second: second.span(),
            });
        }

        let len = payloads.len();
        let (start, end) = (payloads[0].start(), payloads[len - 1].end());
        domain_length(start, end)?;

        let pieces = pieces_with_gaps(payloads);
        let root = Segment::build(pieces, Span::new(start, end), config, Layout::Flat);
        debug!(
            payloads = len,
            nodes = root.node_count(),
            domain = %root.span,
            "built flat segment tree"
        );
        Ok(FlatSegmentTree {
            root: Some(root),
            len,
        })
    }

    /// The number of payloads the tree was built from.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The span covered by the tree, from the first start to the last end.
    pub fn domain(&self) -> Option<Span> {
        self.root.as_ref().map(|root| root.span)
    }
}

impl<D: AggregableRange> Segment<D> {
    fn flat_query(&self, start: i64, end: i64) -> Option<D> {
        if start == self.start() && end == self.end() {
            return self.data.as_ref()?.query(start, end);
        }

        let children = match &self.children {
            Some(children) => children,
            None => return self.bucket_query(start, end),
        };
        let [left, right] = &**children;
        if start <= left.end() && end > left.end() {
            accumulate(
                left.flat_query(start, left.end()),
                right.flat_query(right.start(), end),
            )
        } else if start <= left.end() {
            left.flat_query(start, end)
        } else {
            right.flat_query(start, end)
        }
    }

    /// Scans a leaf's pieces. Only pieces inside the query, or covering all of it, count.
    fn bucket_query(&self, start: i64, end: i64) -> Option<D> {
        if !self.span.intersects(start, end) {
            return None;
        }
        let query = Span::new(start, end);
        let mut result = None;
        for piece in self.pieces.iter() {
            if let Some(payload) = piece.payload() {
                if query.contains(piece.span) || piece.span.contains(query) {
                    result = accumulate(result, payload.query(start, end));
                }
            }
        }
        result
    }
}

impl<D: AggregableRange> RangeTree<D> for FlatSegmentTree<D> {
    fn query_range(&self, start: i64, end: i64) -> Option<D> {
        let root = self.root.as_ref()?;
        let start = start.max(root.start());
        let end = end.min(root.end());
        trace!(start, end, "flat segment tree query");
        if start > end {
            return None;
        }
        root.flat_query(start, end)
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
                root.assert_flat();
            }
        }
    }
}

impl<D: AggregableRange> Segment<D> {
    /// Only leaves hold pieces, and a leaf's pieces are sorted by end.
    fn assert_flat(&self) {
        match &self.children {
            Some(children) => {
                assert!(self.pieces.is_empty());
                children.iter().for_each(Segment::assert_flat);
            }
            None => {
                assert!(self
                    .pieces
                    .windows(2)
                    .all(|pair| pair[0].end() <= pair[1].end()));
                for piece in self.pieces.iter() {
                    assert!(self.span.contains(piece.span));
                }
            }
        }
    }
}

impl<D: fmt::Display> fmt::Display for FlatSegmentTree<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self.root.as_ref())
    }
}

#[cfg(test)]
use crate::data::{IntervalPayload, QuadrantPayload, RangeMaxPayload, RangeSumPayload};

#[cfg(test)]
fn two_halves() -> FlatSegmentTree<RangeSumPayload<i64>> {
    let tree = FlatSegmentTree::build(vec![
        RangeSumPayload::new(5, 9, 20),
        RangeSumPayload::new(0, 4, 10),
    ])
    .unwrap();
    tree.assert_correctness();
    tree
}

#[test]
fn sums_across_segments() {
    let tree = two_halves();
    assert_eq!(tree.query_range(2, 6).unwrap().sum(), Some(&30));
    assert_eq!(tree.query_range(0, 9).unwrap().sum(), Some(&30));
    assert_eq!(tree.query_range(-100, 100).unwrap().sum(), Some(&30));
    assert_eq!(tree.query(3).unwrap().sum(), Some(&10));
    assert_eq!(tree.query(7).unwrap().sum(), Some(&20));
    assert_eq!(tree.domain(), Some(Span::new(0, 9)));
    assert_eq!(tree.len(), 2);
}

#[test]
fn covered_segments_are_not_split() {
    // 0..=4 holds a single payload covering all of it, so it is a leaf
    let tree = two_halves();
    assert_eq!(tree.query_range(0, 2).unwrap().sum(), Some(&10));
    assert_eq!(tree.root.as_ref().unwrap().node_count(), 3);
}

#[test]
fn split_payload_counts_once_per_side() {
    // 3..=6 crosses the middle of 0..=10, where the first payload was cut in two
    let tree = FlatSegmentTree::build(vec![
        RangeSumPayload::new(0, 9, 1i64),
        RangeSumPayload::at(10, 1),
    ])
    .unwrap();
    tree.assert_correctness();
    assert_eq!(tree.query_range(3, 6).unwrap().sum(), Some(&2));
    assert_eq!(tree.query(6).unwrap().sum(), Some(&1));
}

#[test]
fn wide_payloads_stay_small() {
    let wide = 1i64 << 40;
    let tree = FlatSegmentTree::build(vec![
        RangeSumPayload::new(0, wide, 1i64),
        RangeSumPayload::at(wide + (1 << 30), 2),
    ])
    .unwrap();
    tree.assert_correctness();
    let nodes = tree.root.as_ref().unwrap().node_count();
    assert!(nodes < 1000, "{} segments", nodes);

    assert_eq!(tree.query(12345).unwrap().sum(), Some(&1));
    assert_eq!(tree.query(wide).unwrap().sum(), Some(&1));
    assert_eq!(tree.query(wide + 1), None);
    assert_eq!(tree.query(wide + (1 << 30)).unwrap().sum(), Some(&2));
    assert_eq!(tree.query_range(5, wide / 2).unwrap().sum(), Some(&1));
}

#[test]
fn outside_the_domain() {
    let tree = two_halves();
    assert_eq!(tree.query(-1), None);
    assert_eq!(tree.query(10), None);
    assert_eq!(tree.query_range(20, 30), None);
    assert_eq!(tree.query_range(6, 2), None);
}

#[test]
fn overlapping_payloads_are_rejected() {
    let res = FlatSegmentTree::build(vec![
        RangeSumPayload::new(0, 5, 1i64),
        RangeSumPayload::new(3, 8, 2),
    ]);
    assert_eq!(
        res.unwrap_err(),
        TreeError::OverlappingSegments {
            first: Span::new(0, 5),
            second: Span::new(3, 8),
        }
    );

    // the last pair is checked too
    let res = FlatSegmentTree::build(vec![
        RangeSumPayload::new(0, 1, 1i64),
        RangeSumPayload::new(2, 3, 1),
        RangeSumPayload::new(4, 9, 1),
        RangeSumPayload::new(8, 12, 1),
    ]);
    assert!(matches!(
        res,
        Err(TreeError::OverlappingSegments { .. })
    ));

    // touching at a single point is fine
    let tree = FlatSegmentTree::build(vec![
        RangeSumPayload::new(0, 5, 1i64),
        RangeSumPayload::new(5, 8, 2),
    ])
    .unwrap();
    tree.assert_correctness();
}

#[test]
fn gaps_contribute_nothing() {
    let tree = FlatSegmentTree::build(vec![
        RangeMaxPayload::new(0, 2, 7i32),
        RangeMaxPayload::new(10, 12, 3),
    ])
    .unwrap();
    tree.assert_correctness();
    assert_eq!(tree.query(5), None);
    assert_eq!(tree.query_range(3, 9), None);
    assert_eq!(tree.query_range(5, 11).unwrap().maximum(), Some(&3));
    assert_eq!(tree.query_range(0, 12).unwrap().maximum(), Some(&7));
}

#[test]
fn leaf_buckets() {
    let config = TreeConfig::new().with_min_length(8);
    let tree = FlatSegmentTree::build_with(
        vec![
            IntervalPayload::new(0, 1, 'a'),
            IntervalPayload::new(2, 2, 'b'),
            IntervalPayload::new(4, 5, 'c'),
        ],
        &config,
    )
    .unwrap();
    tree.assert_correctness();
    // the whole domain is a single leaf
    assert_eq!(tree.to_string().lines().count(), 1);

    assert_eq!(tree.query(2).unwrap(), IntervalPayload::new(2, 2, 'b'));
    assert_eq!(tree.query(3), None);
    let found = tree.query_range(1, 3).unwrap();
    assert_eq!(found.values().collect::<String>(), "b");
    let found = tree.query_range(0, 2).unwrap();
    assert_eq!(found.values().collect::<String>(), "ab");
}

#[test]
fn empty_input() {
    let tree = FlatSegmentTree::<QuadrantPayload>::build(vec![]).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.query(0), None);
    assert_eq!(tree.domain(), None);
    tree.assert_correctness();
    assert_eq!(tree.to_string(), "Tree has no nodes.\n");

    let res = FlatSegmentTree::<QuadrantPayload>::build_with(
        vec![],
        &TreeConfig::new().rejecting_empty(),
    );
    assert_eq!(res.unwrap_err(), TreeError::EmptyInput);
}

#[test]
fn quadrants() {
    let tree = FlatSegmentTree::build(vec![
        QuadrantPayload::at(0, [1, 2, 3, 4]),
        QuadrantPayload::at(1, [10, 20, 30, 40]),
        QuadrantPayload::at(3, [100, 0, 0, 0]),
    ])
    .unwrap();
    tree.assert_correctness();
    assert_eq!(tree.query_range(0, 1).unwrap().quads(), [11, 22, 33, 44]);
    assert_eq!(tree.query_range(0, 3).unwrap().quads(), [111, 22, 33, 44]);
}

#[test]
fn domain_too_large() {
    let res = FlatSegmentTree::build(vec![
        RangeSumPayload::at(i64::MIN, 1i32),
        RangeSumPayload::at(i64::MAX, 1),
    ]);
    assert_eq!(
        res.unwrap_err(),
        TreeError::DomainTooLarge {
            start: i64::MIN,
            end: i64::MAX
        }
    );
}

#[test]
fn printing() {
    let tree = FlatSegmentTree::build(vec![
        RangeSumPayload::at(0, 1i32),
        RangeSumPayload::at(1, 2),
    ])
    .unwrap();
    assert_eq!(
        tree.to_string(),
        "└── 0->1 Length=2 Data={0->0 sum=3}\n    \
         ├── 0->0 Length=1 Data={0->0 sum=1} Pieces=[0->0]\n    \
         └── 1->1 Length=1 Data={1->1 sum=2} Pieces=[1->1]\n"
    );
}
