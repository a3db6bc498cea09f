//! Segment trees over a domain of `i64` points.
//!
//! The domain covered by the payloads is halved recursively: every segment
//! is split at its middle into two children, until it is shorter than the
//! configured `min_length` (or a single point). A payload whose range crosses
//! the middle of a segment is cut into two pieces, one for each child. Both pieces
//! keep the whole payload: the value isn't divided, only the range is.
//!
//! There are two variants:
//! * [`FlatSegmentTree`] stores non-overlapping ranges, and keeps the pieces only in
//!   its leaves.
//! * [`DynamicSegmentTree`] allows overlapping ranges, and every segment keeps an index
//!   of all the pieces inside it.
//!
//! A segment is only split if some payload starts or ends strictly inside it. Below
//! that, every child would hold the same payloads as its parent, so the number of
//! segments grows with the number of payloads and the depth stays below 64, however
//! wide the domain is.

mod dynamic;
mod flat;

pub use dynamic::DynamicSegmentTree;
pub use flat::FlatSegmentTree;

use super::printer::PrintNode;
use crate::data::{accumulate, AggregableRange, Span};
use crate::{TreeConfig, TreeError};
use std::fmt;
use std::sync::Arc;

/// What a piece of the domain holds.
#[derive(Clone, Debug)]
enum Fill<D> {
    /// A part of one of the payloads the tree was built from.
    Source(Arc<D>),
    /// A hole between two payloads, filled with a cleared copy of the payload before it.
    Gap(Arc<D>),
    /// Padding just outside of the payloads.
    Sentinel,
}

/// A part of the domain, as seen by a segment.
#[derive(Clone, Debug, destructure)]
struct Piece<D> {
    span: Span,
    fill: Fill<D>,
}

impl<D: AggregableRange> Piece<D> {
    fn source(payload: D) -> Self {
        Piece {
            span: payload.span(),
            fill: Fill::Source(Arc::new(payload)),
        }
    }

    fn sentinel(span: Span) -> Self {
        Piece {
            span,
            fill: Fill::Sentinel,
        }
    }

    /// The payload of this piece, if it contributes to queries.
    /// Gaps and sentinels never do.
    fn payload(&self) -> Option<&D> {
        match &self.fill {
            Fill::Source(payload) => Some(payload),
            Fill::Gap(_) | Fill::Sentinel => None,
        }
    }

    fn start(&self) -> i64 {
        self.span.start
    }

    fn end(&self) -> i64 {
        self.span.end
    }

    /// Cuts the piece into `start..middle` and `middle..=end`.
    /// Both halves share the same fill.
    fn split_at(self, middle: i64) -> (Piece<D>, Piece<D>) {
        let (span, fill) = self.destructure();
        let left = Piece {
            span: Span::new(span.start, middle - 1),
            fill: fill.clone(),
        };
        let right = Piece {
            span: Span::new(middle, span.end),
            fill,
        };
        (left, right)
    }
}

impl<D> fmt::Display for Piece<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fill {
            Fill::Source(_) => write!(f, "{}", self.span),
            Fill::Gap(_) => write!(f, "{} (gap)", self.span),
            Fill::Sentinel => write!(f, "{} (sentinel)", self.span),
        }
    }
}

/// Turns payloads into pieces, in the given order. Wherever a payload is followed by one
/// starting more than one point after it ends, the hole between them is filled by a gap.
fn pieces_with_gaps<D: AggregableRange>(payloads: Vec<D>) -> Vec<Piece<D>> {
    let mut pieces = Vec::with_capacity(payloads.len());
    let mut payloads = payloads.into_iter().peekable();
    while let Some(payload) = payloads.next() {
        let gap = match payloads.peek() {
            Some(next) if next.start() as i128 - payload.end() as i128 > 1 => {
                let span = Span::new(payload.end() + 1, next.start() - 1);
                Some(Piece {
                    span,
                    fill: Fill::Gap(Arc::new(payload.empty_over(span))),
                })
            }
            _ => None,
        };
        pieces.push(Piece::source(payload));
        pieces.extend(gap);
    }
    pieces
}

/// The number of points of `start..=end`, if it can be indexed.
fn domain_length(start: i64, end: i64) -> Result<i64, TreeError> {
    Span::new(start, end)
        .len()
        .ok_or(TreeError::DomainTooLarge { start, end })
}

/// Which segments keep pieces.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Layout {
    /// Only leaves keep their pieces, gaps included.
    Flat,
    /// Every segment keeps an index of the payload pieces intersecting it.
    Dynamic,
}

/// A node of a segment tree, covering `span`.
#[derive(Clone, Debug)]
struct Segment<D> {
    span: Span,
    length: i64,
    /// Offset of the second child's start. Zero for leaves.
    half: i64,
    /// The combination of all payload pieces inside this segment.
    data: Option<D>,
    children: Option<Box<[Segment<D>; 2]>>,
    pieces: Vec<Piece<D>>,
}

impl<D: AggregableRange> Segment<D> {
    /// Builds the segment covering `span` from the pieces inside it.
    /// `span` must be indexable, see [`domain_length`].
    fn build(pieces: Vec<Piece<D>>, span: Span, config: &TreeConfig, layout: Layout) -> Self {
        let length = span.end - span.start + 1;
        let data = pieces
            .iter()
            .filter(|piece| span.contains(piece.span))
            .filter_map(Piece::payload)
            .fold(None, |acc, payload| accumulate(acc, Some(payload.clone())));

        if config.splits(length) && Segment::has_boundary_inside(&pieces, span) {
            let half = length / 2;
            let middle = span.start + half;
            let kept = match layout {
                Layout::Flat => vec![],
                Layout::Dynamic => Segment::index_of(&pieces, span),
            };

            let mut left = vec![];
            let mut right = vec![];
            for piece in pieces {
                if piece.end() < middle {
                    left.push(piece);
                } else if piece.start() >= middle {
                    right.push(piece);
                } else {
                    let (l, r) = piece.split_at(middle);
                    left.push(l);
                    right.push(r);
                }
            }

            let children = [
                Segment::build(left, Span::new(span.start, middle - 1), config, layout),
                Segment::build(right, Span::new(middle, span.end), config, layout),
            ];
            Segment {
                span,
                length,
                half,
                data,
                children: Some(Box::new(children)),
                pieces: kept,
            }
        } else {
            let pieces = match layout {
                Layout::Flat => {
                    let mut pieces = pieces;
                    pieces.sort_by_key(Piece::end);
                    pieces
                }
                Layout::Dynamic => Segment::index_of(&pieces, span),
            };
            Segment {
                span,
                length,
                half: 0,
                data,
                children: None,
                pieces,
            }
        }
    }

    /// Whether some payload piece doesn't cover all of `span`.
    /// Gaps and sentinels don't count.
    fn has_boundary_inside(pieces: &[Piece<D>], span: Span) -> bool {
        pieces
            .iter()
            .any(|piece| piece.payload().is_some() && !piece.span.contains(span))
    }

    /// The payload pieces intersecting `span`.
    fn index_of(pieces: &[Piece<D>], span: Span) -> Vec<Piece<D>> {
        pieces
            .iter()
            .filter(|piece| piece.payload().is_some() && span.intersects(piece.start(), piece.end()))
            .cloned()
            .collect()
    }

    fn start(&self) -> i64 {
        self.span.start
    }

    fn end(&self) -> i64 {
        self.span.end
    }

    fn middle(&self) -> i64 {
        self.span.start + self.half
    }

    fn node_count(&self) -> usize {
        match &self.children {
            None => 1,
            Some(children) => 1 + children[0].node_count() + children[1].node_count(),
        }
    }

    /// Checks that the segment's children halve it exactly, and that its pieces
    /// lie inside it. If not, panics.
    fn assert_correctness(&self) {
        assert_eq!(Some(self.length), self.span.len());
        for piece in self.pieces.iter() {
            assert!(
                self.span.intersects(piece.start(), piece.end()),
                "piece {} is outside of segment {}",
                piece,
                self.span
            );
        }

        if let Some(children) = &self.children {
            let [left, right] = &**children;
            assert_eq!(self.half, self.length / 2);
            assert!(self.start() <= self.middle() - 1);
            assert!(self.middle() - 1 < self.start() + self.length - 1);
            assert_eq!(self.start() + self.length - 1, self.end());
            assert_eq!(left.span, Span::new(self.start(), self.middle() - 1));
            assert_eq!(right.span, Span::new(self.middle(), self.end()));
            left.assert_correctness();
            right.assert_correctness();
        } else {
            assert_eq!(self.half, 0);
        }
    }

    /// Checks that only segments with a payload starting or ending inside them were split.
    fn assert_split_at_boundaries(&self) {
        let mut spans = vec![];
        self.collect_payload_spans(&mut spans);
        self.assert_split_within(&spans);
    }

    fn collect_payload_spans(&self, spans: &mut Vec<Span>) {
        match &self.children {
            None => spans.extend(self.pieces.iter().filter_map(Piece::payload).map(D::span)),
            Some(children) => children.iter().for_each(|child| child.collect_payload_spans(spans)),
        }
    }

    fn assert_split_within(&self, spans: &[Span]) {
        if let Some(children) = &self.children {
            assert!(
                spans.iter().any(|span| {
                    span.intersects(self.start(), self.end()) && !span.contains(self.span)
                }),
                "segment {} was split without a boundary inside it",
                self.span
            );
            children.iter().for_each(|child| child.assert_split_within(spans));
        }
    }
}

impl<D: fmt::Display> PrintNode for Segment<D> {
    fn write_label(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Length={} Data={{", self.span, self.length)?;
        if let Some(data) = &self.data {
            write!(f, "{}", data)?;
        }
        write!(f, "}}")?;
        if !self.pieces.is_empty() {
            write!(f, " Pieces=[")?;
            for (i, piece) in self.pieces.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", piece)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }

    fn children(&self) -> Vec<&Self> {
        match &self.children {
            None => vec![],
            Some(children) => children.iter().collect(),
        }
    }
}

#[cfg(test)]
use crate::data::RangeSumPayload;

#[test]
fn gaps_are_filled_between_consecutive_payloads() {
    let pieces = pieces_with_gaps(vec![
        RangeSumPayload::new(0, 2, 1i32),
        RangeSumPayload::new(3, 4, 2),
        RangeSumPayload::new(8, 9, 3),
    ]);
    let spans: Vec<_> = pieces.iter().map(|piece| piece.span).collect();
    assert_eq!(
        spans,
        vec![Span::new(0, 2), Span::new(3, 4), Span::new(5, 7), Span::new(8, 9)]
    );
    assert!(pieces[2].payload().is_none());
    match &pieces[2].fill {
        Fill::Gap(gap) => assert_eq!(**gap, RangeSumPayload::empty(5, 7)),
        _ => panic!("expected a gap"),
    }
}

#[test]
fn splitting_shares_the_payload() {
    let piece = Piece::source(RangeSumPayload::new(0, 9, 10i64));
    let (left, right) = piece.split_at(5);
    assert_eq!(left.span, Span::new(0, 4));
    assert_eq!(right.span, Span::new(5, 9));
    assert_eq!(left.payload(), right.payload());
    assert_eq!(left.payload().unwrap().span(), Span::new(0, 9));
}

#[test]
fn domain_length_overflow() {
    assert_eq!(domain_length(-5, 5), Ok(11));
    assert_eq!(
        domain_length(i64::MIN, 0),
        Err(TreeError::DomainTooLarge {
            start: i64::MIN,
            end: 0
        })
    );
}
