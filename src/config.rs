//! Build configuration shared by every tree type.

use std::convert::TryFrom;

/// Parameters used when building a tree.
///
/// The default configuration splits segments down to single points and
/// builds an empty tree from an empty payload list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TreeConfig {
    /// Segments shorter than this are not split further, and instead keep
    /// their pieces in a leaf bucket that is scanned linearly.
    /// Values below `1` behave like `1`. Ignored by the interval tree.
    pub min_length: usize,
    /// If set, building from an empty payload list fails with
    /// [`crate::TreeError::EmptyInput`] instead of producing an empty tree.
    pub reject_empty: bool,
}

impl TreeConfig {
    pub fn new() -> Self {
        TreeConfig {
            min_length: 1,
            reject_empty: false,
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn rejecting_empty(mut self) -> Self {
        self.reject_empty = true;
        self
    }

    /// Whether a segment of `length` points should be split into two children.
    pub(crate) fn splits(&self, length: i64) -> bool {
        let min_length = self.min_length.max(1);
        // a bucket size beyond i64::MAX means never split
        length >= 2 && i64::try_from(min_length).map_or(false, |min| length >= min)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig::new()
    }
}

#[test]
fn split_threshold() {
    let config = TreeConfig::default();
    assert!(!config.splits(1));
    assert!(config.splits(2));

    let config = TreeConfig::new().with_min_length(4);
    assert!(!config.splits(3));
    assert!(config.splits(4));
    assert!(config.splits(5));

    // zero behaves like one
    let config = TreeConfig::new().with_min_length(0);
    assert!(!config.splits(1));
    assert!(config.splits(2));
}
