use crate::data::Span;
use thiserror::Error;

/// Error type returned by tree construction.
///
/// Queries never fail: a query outside of the stored ranges returns `None`.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum TreeError {
    /// The payload list was empty and the configuration rejects empty input.
    #[error("cannot build a tree from an empty payload list")]
    EmptyInput,

    /// Two payloads given to a flat segment tree overlap.
    #[error("segments {first} and {second} are overlapping")]
    OverlappingSegments {
        /// The payload with the smaller end point.
        first: Span,
        /// The payload that starts before `first` ends.
        second: Span,
    },

    /// The domain covered by the tree has more points than fit in an `i64`.
    #[error("domain {start}->{end} is too large to be indexed")]
    DomainTooLarge {
        /// First point of the domain.
        start: i64,
        /// Last point of the domain.
        end: i64,
    },
}
