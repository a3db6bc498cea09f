//! Implementation of interval trees.
//!
//! An interval tree holds ranges, and finds all ranges that contain a given point,
//! or that intersect a given range.
//!
//! Every node has a center point. The ranges that contain the center are kept at the node,
//! the ranges entirely before it go to the left subtree, and the ranges entirely after it
//! go to the right subtree. The center is taken from the range in the middle of the
//! (unsorted) input list, so the tree is balanced on a best-effort basis only.
//!
//!```
//! use intervals::*;
//!
//! let tree: IntervalTree<_> = vec![
//!     IntervalPayload::new(0, 10, 'a'),
//!     IntervalPayload::new(20, 30, 'b'),
//! ]
//! .into_iter()
//! .collect();
//!
//! let found = tree.query_range(5, 25).unwrap();
//! assert_eq!(found.values().collect::<String>(), "ab");
//! assert!(tree.query(15).is_none());
//! # tree.assert_correctness();
//!```

use super::printer::{write_tree, PrintNode};
use super::RangeTree;
use crate::data::{accumulate, AggregableRange};
use crate::{TreeConfig, TreeError};
use std::fmt;
use tracing::{debug, trace};

/// An interval tree. Might be empty.
#[derive(Clone, Debug)]
pub struct IntervalTree<D> {
    root: Subtree<D>,
    len: usize,
}

#[derive(Clone, Debug)]
enum Subtree<D> {
    Empty,
    Root(Box<IntervalNode<D>>),
}
use Subtree::*;

#[derive(Clone, Debug)]
struct IntervalNode<D> {
    center: i64,
    left: Subtree<D>,
    right: Subtree<D>,
    /// The ranges containing `center`, by ascending start.
    overlap: Vec<D>,
    /// Indices into `overlap`, by descending end.
    by_end: Vec<usize>,
}

impl<D: AggregableRange> IntervalTree<D> {
    /// Creates an empty tree. Every query on it returns `None`.
    pub fn new() -> Self {
        IntervalTree {
            root: Empty,
            len: 0,
        }
    }

    /// Builds a tree holding all of `payloads`.
    /// An empty list gives an empty tree.
    pub fn build(payloads: Vec<D>) -> Self {
        let len = payloads.len();
        let root = Subtree::from_list(payloads);
        debug!(payloads = len, depth = root.depth(), "built interval tree");
        IntervalTree { root, len }
    }

    /// Builds a tree holding all of `payloads`, failing on empty input if
    /// the configuration says so.
    pub fn build_with(payloads: Vec<D>, config: &TreeConfig) -> Result<Self, TreeError> {
        if payloads.is_empty() && config.reject_empty {
            return Err(TreeError::EmptyInput);
        }
        Ok(IntervalTree::build(payloads))
    }

    /// The number of payloads stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of nodes on the longest path from the root.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

impl<D> Subtree<D> {
    fn node(&self) -> Option<&IntervalNode<D>> {
        match self {
            Empty => None,
            Root(node) => Some(node),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Empty => 0,
            Root(node) => 1 + std::cmp::max(node.left.depth(), node.right.depth()),
        }
    }
}

impl<D: AggregableRange> Subtree<D> {
    fn from_list(intervals: Vec<D>) -> Subtree<D> {
        if intervals.is_empty() {
            return Empty;
        }

        // the pivot always stays at this node, even if its range is malformed
        let pivot = intervals.len() / 2;
        let center = intervals[pivot].span().center();

        let mut left = vec![];
        let mut right = vec![];
        let mut overlap = vec![];
        for (i, interval) in intervals.into_iter().enumerate() {
            if i != pivot && interval.end() < center {
                left.push(interval);
            } else if i != pivot && interval.start() > center {
                right.push(interval);
            } else {
                overlap.push(interval);
            }
        }

        Root(Box::new(IntervalNode::new(
            center,
            overlap,
            Subtree::from_list(left),
            Subtree::from_list(right),
        )))
    }
}

impl<D: AggregableRange> IntervalNode<D> {
    fn new(center: i64, mut overlap: Vec<D>, left: Subtree<D>, right: Subtree<D>) -> Self {
        overlap.sort_by_key(|interval| interval.start());
        let mut by_end: Vec<usize> = (0..overlap.len()).collect();
        by_end.sort_by(|&a, &b| overlap[b].end().cmp(&overlap[a].end()));
        IntervalNode {
            center,
            left,
            right,
            overlap,
            by_end,
        }
    }

    fn query_range(&self, start: i64, end: i64) -> Option<D> {
        let mut result = None;
        for interval in self.overlap.iter().take_while(|i| i.start() <= end) {
            result = accumulate(result, interval.query(start, end));
        }

        if start < self.center {
            if let Some(left) = self.left.node() {
                result = accumulate(result, left.query_range(start, end));
            }
        }
        if end > self.center {
            if let Some(right) = self.right.node() {
                result = accumulate(result, right.query_range(start, end));
            }
        }
        result
    }

    /// Checks this subtree, where every start must be above `min_start` and
    /// every end below `max_end`. Returns the number of payloads in the subtree.
    fn assert_correctness(&self, min_start: Option<i64>, max_end: Option<i64>) -> usize {
        for interval in self.overlap.iter() {
            assert!(
                interval.start() <= self.center && self.center <= interval.end(),
                "range {} is stored at center {}",
                interval.span(),
                self.center
            );
            if let Some(min_start) = min_start {
                assert!(interval.start() > min_start);
            }
            if let Some(max_end) = max_end {
                assert!(interval.end() < max_end);
            }
        }
        assert!(self
            .overlap
            .windows(2)
            .all(|pair| pair[0].start() <= pair[1].start()));
        assert_eq!(self.by_end.len(), self.overlap.len());
        assert!(self
            .by_end
            .windows(2)
            .all(|pair| self.overlap[pair[0]].end() >= self.overlap[pair[1]].end()));

        let mut count = self.overlap.len();
        if let Some(left) = self.left.node() {
            count += left.assert_correctness(min_start, Some(self.center));
        }
        if let Some(right) = self.right.node() {
            count += right.assert_correctness(Some(self.center), max_end);
        }
        count
    }
}

impl<D: AggregableRange> RangeTree<D> for IntervalTree<D> {
    fn query(&self, index: i64) -> Option<D> {
        trace!(index, "interval tree stabbing query");
        let mut result = None;
        let mut current = self.root.node();
        while let Some(node) = current {
            if index < node.center {
                // every range here ends at or after the center
                for interval in node.overlap.iter().take_while(|i| i.start() <= index) {
                    result = accumulate(result, interval.query_point(index));
                }
                current = node.left.node();
            } else {
                // every range here starts at or before the center
                let by_end = node.by_end.iter().map(|&i| &node.overlap[i]);
                for interval in by_end.take_while(|i| i.end() >= index) {
                    result = accumulate(result, interval.query_point(index));
                }
                current = node.right.node();
            }
        }
        result
    }

    fn query_range(&self, start: i64, end: i64) -> Option<D> {
        trace!(start, end, "interval tree range query");
        self.root.node()?.query_range(start, end)
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn assert_correctness(&self) {
        let count = match self.root.node() {
            None => 0,
            Some(node) => node.assert_correctness(None, None),
        };
        assert_eq!(count, self.len);
    }
}

impl<D: AggregableRange> Default for IntervalTree<D> {
    fn default() -> Self {
        IntervalTree::new()
    }
}

impl<D: AggregableRange> std::iter::FromIterator<D> for IntervalTree<D> {
    fn from_iter<T: IntoIterator<Item = D>>(iter: T) -> Self {
        IntervalTree::build(iter.into_iter().collect())
    }
}

impl<D: fmt::Display> PrintNode for IntervalNode<D> {
    fn write_label(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Center={} Set=[", self.center)?;
        for (i, interval) in self.overlap.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", interval)?;
        }
        write!(f, "]")
    }

    fn children(&self) -> Vec<&Self> {
        self.left.node().into_iter().chain(self.right.node()).collect()
    }
}

impl<D: fmt::Display> fmt::Display for IntervalTree<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self.root.node())
    }
}

#[cfg(test)]
use crate::data::{IntervalPayload, RangeSumPayload, Span};

#[test]
fn stabbing_combines_matching_ranges() {
    let tree = IntervalTree::build(vec![
        IntervalPayload::new(1, 3, "A"),
        IntervalPayload::new(5, 8, "B"),
        IntervalPayload::new(2, 4, "C"),
    ]);
    tree.assert_correctness();

    let found = tree.query(3).unwrap();
    assert_eq!(found.values().cloned().collect::<Vec<_>>(), vec!["A", "C"]);
    assert_eq!(found.span(), Span::new(1, 4));
    assert_eq!(tree.query(10), None);

    assert_eq!(
        tree.query(5).unwrap(),
        IntervalPayload::new(5, 8, "B")
    );
    assert_eq!(
        tree.query(4).unwrap(),
        IntervalPayload::new(2, 4, "C")
    );
    assert_eq!(tree.query(0), None);
}

#[test]
fn range_query_collects_intersecting_ranges() {
    let tree = IntervalTree::build(vec![
        IntervalPayload::new(1, 3, "A"),
        IntervalPayload::new(5, 8, "B"),
        IntervalPayload::new(2, 4, "C"),
        IntervalPayload::new(12, 14, "D"),
    ]);
    tree.assert_correctness();

    let found = tree.query_range(4, 6).unwrap();
    assert_eq!(found, IntervalPayload::with_values(2, 8, vec!["B", "C"]));
    let found = tree.query_range(-100, 100).unwrap();
    assert_eq!(found.len(), 4);
    assert_eq!(tree.query_range(9, 11), None);
    assert_eq!(tree.query_range(15, 20), None);
}

#[test]
fn range_query_ending_at_a_center() {
    // the root is centered at 5, with 0..=2 on its left and 8..=9 on its right
    let tree = IntervalTree::build(vec![
        IntervalPayload::new(0, 2, "A"),
        IntervalPayload::new(4, 6, "B"),
        IntervalPayload::new(8, 9, "C"),
    ]);
    tree.assert_correctness();
    assert_eq!(tree.depth(), 2);

    let found = tree.query_range(2, 5).unwrap();
    assert_eq!(found, IntervalPayload::with_values(0, 6, vec!["A", "B"]));
    assert_eq!(tree.query_range(5, 5).unwrap(), IntervalPayload::new(4, 6, "B"));
    let found = tree.query_range(5, 8).unwrap();
    assert_eq!(found, IntervalPayload::with_values(4, 9, vec!["B", "C"]));
    assert_eq!(tree.query_range(7, 7), None);
}

#[test]
fn empty_tree_has_no_results() {
    let tree: IntervalTree<IntervalPayload<u32>> = IntervalTree::build(vec![]);
    assert!(tree.is_empty());
    assert_eq!(tree.query(0), None);
    assert_eq!(tree.query_range(i64::MIN, i64::MAX), None);
    tree.assert_correctness();
    assert_eq!(tree.to_string(), "Tree has no nodes.\n");

    let rejected = IntervalTree::<IntervalPayload<u32>>::build_with(
        vec![],
        &TreeConfig::new().rejecting_empty(),
    );
    assert_eq!(rejected.unwrap_err(), TreeError::EmptyInput);
}

#[test]
fn works_with_any_payload() {
    let tree = IntervalTree::build(vec![
        RangeSumPayload::new(0, 10, 1i64),
        RangeSumPayload::new(5, 15, 2),
        RangeSumPayload::new(20, 30, 4),
    ]);
    tree.assert_correctness();
    assert_eq!(tree.query(7).unwrap().sum(), Some(&3));
    assert_eq!(tree.query_range(0, 25).unwrap().sum(), Some(&7));
    assert_eq!(tree.len(), 3);
}

#[test]
fn printing() {
    let tree = IntervalTree::build(vec![
        RangeSumPayload::new(0, 2, 1i32),
        RangeSumPayload::new(4, 6, 2),
    ]);
    assert_eq!(
        tree.to_string(),
        "└── Center=5 Set=[4->6 sum=2]\n    └── Center=1 Set=[0->2 sum=1]\n"
    );
}
