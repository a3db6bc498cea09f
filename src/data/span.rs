use std::fmt;

/// A closed range of points `start..=end`.
///
/// `start <= end` is assumed by every query, but not enforced.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    /// The span of a cleared payload.
    pub const UNBOUNDED: Span = Span {
        start: i64::MIN,
        end: i64::MAX,
    };

    pub fn new(start: i64, end: i64) -> Span {
        Span { start, end }
    }

    /// A span containing only `index`.
    pub fn point(index: i64) -> Span {
        Span::new(index, index)
    }

    /// Whether `start..=end` shares at least one point with this span.
    pub fn intersects(&self, start: i64, end: i64) -> bool {
        !(end < self.start || start > self.end)
    }

    /// Whether `other` lies entirely inside this span.
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Number of points in the span, or `None` if it doesn't fit in an `i64`.
    pub fn len(&self) -> Option<i64> {
        self.end.checked_sub(self.start)?.checked_add(1)
    }

    /// Grows this span to also cover `other`.
    pub fn widen(&mut self, other: Span) {
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
    }

    /// The point the interval tree uses to partition around this span.
    /// Rounds towards zero, and never overflows.
    pub fn center(&self) -> i64 {
        ((self.start as i128 + self.end as i128) / 2) as i64
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::UNBOUNDED
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.start, self.end)
    }
}

#[test]
fn span_basics() {
    let span = Span::new(2, 6);
    assert!(span.intersects(6, 9));
    assert!(span.intersects(0, 2));
    assert!(!span.intersects(7, 9));
    assert!(span.contains(Span::new(3, 4)));
    assert!(!span.contains(Span::new(3, 7)));
    assert_eq!(span.len(), Some(5));
    assert_eq!(Span::UNBOUNDED.len(), None);
    assert_eq!(span.to_string(), "2->6");
}

#[test]
fn center_rounds_towards_zero() {
    assert_eq!(Span::new(1, 4).center(), 2);
    assert_eq!(Span::new(-4, -1).center(), -2);
    assert_eq!(Span::new(i64::MAX - 1, i64::MAX).center(), i64::MAX - 1);
    assert_eq!(Span::UNBOUNDED.center(), 0);
}
