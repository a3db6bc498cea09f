//! This module contains the tree structures: the interval tree and the two segment trees.
//!
//! All of them are static: they are built once from a list of payloads, and
//! afterwards only answer queries. Queries take `&self`, so a built tree can be
//! shared between threads if its payload type can.

pub mod interval_tree;
mod printer;
pub mod segment_tree;

pub use interval_tree::IntervalTree;
pub use segment_tree::{DynamicSegmentTree, FlatSegmentTree};

use crate::data::AggregableRange;

/// The queries every tree answers.
///
/// Both queries return the combination of all the matching payloads, or `None` if
/// no payload matched. Querying outside of the stored ranges is not an error.
pub trait RangeTree<D: AggregableRange> {
    /// Stabbing query: combines the payloads whose range contains `index`.
    fn query(&self, index: i64) -> Option<D> {
        self.query_range(index, index)
    }

    /// Range query: combines the payloads whose range intersects `start..=end`.
    fn query_range(&self, start: i64, end: i64) -> Option<D>;

    /// Whether the tree was built from an empty payload list.
    fn is_empty(&self) -> bool;

    /// Checks that the structural invariants of the tree hold.
    /// If they don't, panics.
    fn assert_correctness(&self);
}
