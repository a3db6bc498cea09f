//! Numeric payloads: the sum, minimum or maximum of the values in a range.
//!
//! Unlike [`IntervalPayload`], combining numeric payloads never changes the span
//! of the payload that is combined into. A payload without a value acts as the
//! identity: combining it into anything changes nothing, and combining anything
//! into it adopts the other value.

use super::*;
use std::cmp::Ordering;
use std::fmt;

/// The sum of the values in a range.
#[derive(Clone, PartialEq, Debug)]
pub struct RangeSumPayload<N> {
    span: Span,
    sum: Option<N>,
}

impl<N: Numeric> RangeSumPayload<N> {
    pub fn new(start: i64, end: i64, sum: N) -> Self {
        RangeSumPayload {
            span: Span::new(start, end),
            sum: Some(sum),
        }
    }

    pub fn at(index: i64, sum: N) -> Self {
        RangeSumPayload::new(index, index, sum)
    }

    /// A range without any value.
    pub fn empty(start: i64, end: i64) -> Self {
        RangeSumPayload {
            span: Span::new(start, end),
            sum: None,
        }
    }

    pub fn sum(&self) -> Option<&N> {
        self.sum.as_ref()
    }
}

impl<N: Numeric> AggregableRange for RangeSumPayload<N> {
    fn span(&self) -> Span {
        self.span
    }

    fn span_mut(&mut self) -> &mut Span {
        &mut self.span
    }

    fn combine(&mut self, other: &Self) -> &mut Self {
        match (&self.sum, &other.sum) {
            (_, None) => (),
            (None, Some(theirs)) => self.sum = Some(theirs.clone()),
            (Some(ours), Some(theirs)) => self.sum = Some(ours.add(theirs)),
        }
        self
    }

    fn clear(&mut self) {
        self.span = Span::UNBOUNDED;
        self.sum = None;
    }

    fn is_empty(&self) -> bool {
        self.sum.is_none()
    }
}

impl<N: fmt::Display> fmt::Display for RangeSumPayload<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sum=", self.span)?;
        write_optional(f, self.sum.as_ref())
    }
}

fn write_optional<N: fmt::Display>(f: &mut fmt::Formatter<'_>, value: Option<&N>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{}", value),
        None => write!(f, "none"),
    }
}

/// Defines a payload keeping one extreme value of its range.
/// The stored value is replaced only if the other value is strictly `$wins` compared
/// to it, so on ties the value that was already there stays.
macro_rules! extremum_payload {
    ($(#[$doc:meta])* $name:ident, $field:ident, $wins:path) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Debug)]
        pub struct $name<N> {
            span: Span,
            $field: Option<N>,
        }

        impl<N: Numeric> $name<N> {
            pub fn new(start: i64, end: i64, $field: N) -> Self {
                $name {
                    span: Span::new(start, end),
                    $field: Some($field),
                }
            }

            pub fn at(index: i64, $field: N) -> Self {
                $name::new(index, index, $field)
            }

            /// A range without any value.
            pub fn empty(start: i64, end: i64) -> Self {
                $name {
                    span: Span::new(start, end),
                    $field: None,
                }
            }

            pub fn $field(&self) -> Option<&N> {
                self.$field.as_ref()
            }
        }

        impl<N: Numeric> AggregableRange for $name<N> {
            fn span(&self) -> Span {
                self.span
            }

            fn span_mut(&mut self) -> &mut Span {
                &mut self.span
            }

            fn combine(&mut self, other: &Self) -> &mut Self {
                match (&self.$field, &other.$field) {
                    (_, None) => (),
                    (None, Some(theirs)) => self.$field = Some(theirs.clone()),
                    (Some(ours), Some(theirs)) => {
                        if theirs.compare(ours) == $wins {
                            self.$field = Some(theirs.clone());
                        }
                    }
                }
                self
            }

            fn clear(&mut self) {
                self.span = Span::UNBOUNDED;
                self.$field = None;
            }

            fn is_empty(&self) -> bool {
                self.$field.is_none()
            }
        }

        impl<N: fmt::Display> fmt::Display for $name<N> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}=", self.span, stringify!($field))?;
                write_optional(f, self.$field.as_ref())
            }
        }
    };
}

extremum_payload!(
    /// The minimum of the values in a range.
    RangeMinPayload,
    minimum,
    Ordering::Less
);

extremum_payload!(
    /// The maximum of the values in a range.
    RangeMaxPayload,
    maximum,
    Ordering::Greater
);

#[test]
fn sum_combines_and_keeps_span() {
    let mut a = RangeSumPayload::new(0, 4, 10i64);
    a.combine(&RangeSumPayload::new(5, 9, 20));
    assert_eq!(a, RangeSumPayload::new(0, 4, 30));

    // no value is the identity, in both directions
    a.combine(&RangeSumPayload::empty(0, 100));
    assert_eq!(a.sum(), Some(&30));
    let mut empty = RangeSumPayload::empty(3, 3);
    empty.combine(&a);
    assert_eq!(empty, RangeSumPayload::new(3, 3, 30));
    assert_eq!(empty.to_string(), "3->3 sum=30");
    assert_eq!(RangeSumPayload::<i32>::empty(1, 2).to_string(), "1->2 sum=none");
}

#[test]
fn doubling_a_copy() {
    let sum = RangeSumPayload::new(1, 1, 7i32);
    assert_eq!(sum.clone().combine(&sum.clone()).sum(), Some(&14));

    let min = RangeMinPayload::new(1, 1, -3.5f64);
    assert_eq!(min.clone().combine(&min.clone()).minimum(), Some(&-3.5));

    let max = RangeMaxPayload::new(1, 1, 8i64);
    assert_eq!(max.clone().combine(&max.clone()).maximum(), Some(&8));
}

#[test]
fn extremes_keep_existing_value_on_ties() {
    let mut min = RangeMinPayload::at(0, Number::Long(2));
    min.combine(&RangeMinPayload::at(0, Number::Int(2)));
    assert_eq!(min.minimum(), Some(&Number::Long(2)));
    min.combine(&RangeMinPayload::at(0, Number::Int(1)));
    assert_eq!(min.minimum(), Some(&Number::Int(1)));

    let mut max = RangeMaxPayload::at(0, Number::Double(4.0));
    max.combine(&RangeMaxPayload::at(0, Number::Float(4.0)));
    assert_eq!(max.maximum(), Some(&Number::Double(4.0)));
    max.combine(&RangeMaxPayload::at(0, Number::Long(5)));
    assert_eq!(max.maximum(), Some(&Number::Long(5)));
    assert_eq!(max.to_string(), "0->0 maximum=5");
}
