//! Number kinds usable as range sum/minimum/maximum values.
//!
//! Each primitive kind implements [`Numeric`] directly, so a payload like
//! `RangeSumPayload<i64>` resolves its arithmetic at compile time. Payloads that
//! need to mix kinds at runtime use [`Number`], which promotes the operands
//! to a common kind before each operation.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

/// The arithmetic needed by the numeric payloads.
pub trait Numeric: Clone + PartialEq + fmt::Debug + fmt::Display {
    fn kind(&self) -> NumberKind;

    /// `self + other`. Fixed width integers wrap around on overflow.
    fn add(&self, other: &Self) -> Self;

    /// A total order. Floats use the IEEE total order, so `-0.0 < 0.0`
    /// and `NaN` sorts above every other positive value.
    fn compare(&self, other: &Self) -> Ordering;
}

/// The kinds of numbers, in promotion order: when two numbers of different kinds
/// meet, both are converted to the greater kind.
///
/// Note that `Long` ranks above `Double`, so mixing the two truncates the double.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum NumberKind {
    Int,
    Float,
    Double,
    Long,
    BigInteger,
    Decimal,
}

macro_rules! integer_numeric {
    ($($t:ty => $kind:ident),*) => {
        $(
            impl Numeric for $t {
                fn kind(&self) -> NumberKind {
                    NumberKind::$kind
                }

                fn add(&self, other: &Self) -> Self {
                    self.wrapping_add(*other)
                }

                fn compare(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

macro_rules! float_numeric {
    ($($t:ty => $kind:ident),*) => {
        $(
            impl Numeric for $t {
                fn kind(&self) -> NumberKind {
                    NumberKind::$kind
                }

                fn add(&self, other: &Self) -> Self {
                    self + other
                }

                fn compare(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }
            }
        )*
    };
}

integer_numeric!(i32 => Int, i64 => Long);
float_numeric!(f32 => Float, f64 => Double);

impl Numeric for BigInt {
    fn kind(&self) -> NumberKind {
        NumberKind::BigInteger
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Numeric for BigDecimal {
    fn kind(&self) -> NumberKind {
        NumberKind::Decimal
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// A number whose kind is only known at runtime.
#[derive(Clone, PartialEq, Debug)]
pub enum Number {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigInteger(BigInt),
    Decimal(BigDecimal),
}
use Number::*;

impl Number {
    /// Converts this number to `kind`.
    ///
    /// Floats are truncated towards zero when converted to integer kinds, and
    /// values that don't fit saturate. Non finite floats become zero when
    /// converted to the arbitrary precision kinds.
    pub fn promote(&self, kind: NumberKind) -> Number {
        if self.kind() == kind {
            return self.clone();
        }
        match kind {
            NumberKind::Int => Int(self.to_long() as i32),
            NumberKind::Long => Long(self.to_long()),
            NumberKind::Float => Float(self.to_double() as f32),
            NumberKind::Double => Double(self.to_double()),
            NumberKind::BigInteger => BigInteger(self.to_big_integer()),
            NumberKind::Decimal => Decimal(self.to_decimal()),
        }
    }

    fn to_long(&self) -> i64 {
        fn saturate(negative: bool) -> i64 {
            if negative {
                i64::MIN
            } else {
                i64::MAX
            }
        }
        match self {
            Int(v) => *v as i64,
            Long(v) => *v,
            Float(v) => *v as i64,
            Double(v) => *v as i64,
            BigInteger(v) => v.to_i64().unwrap_or_else(|| saturate(v.sign() == Sign::Minus)),
            Decimal(v) => v
                .to_i64()
                .unwrap_or_else(|| saturate(v < &BigDecimal::zero())),
        }
    }

    fn to_double(&self) -> f64 {
        match self {
            Int(v) => *v as f64,
            Long(v) => *v as f64,
            Float(v) => *v as f64,
            Double(v) => *v,
            BigInteger(v) => v.to_f64().unwrap_or(f64::NAN),
            Decimal(v) => v.to_f64().unwrap_or(f64::NAN),
        }
    }

    fn to_big_integer(&self) -> BigInt {
        match self {
            Int(v) => BigInt::from(*v),
            Long(v) => BigInt::from(*v),
            Float(v) => BigInt::from_f32(*v).unwrap_or_else(BigInt::zero),
            Double(v) => BigInt::from_f64(*v).unwrap_or_else(BigInt::zero),
            BigInteger(v) => v.clone(),
            Decimal(v) => v.with_scale(0).into_bigint_and_exponent().0,
        }
    }

    fn to_decimal(&self) -> BigDecimal {
        match self {
            Int(v) => BigDecimal::new(BigInt::from(*v), 0),
            Long(v) => BigDecimal::new(BigInt::from(*v), 0),
            Float(v) => BigDecimal::from_f32(*v).unwrap_or_else(BigDecimal::zero),
            Double(v) => BigDecimal::from_f64(*v).unwrap_or_else(BigDecimal::zero),
            BigInteger(v) => BigDecimal::new(v.clone(), 0),
            Decimal(v) => v.clone(),
        }
    }
}

impl Numeric for Number {
    fn kind(&self) -> NumberKind {
        match self {
            Int(_) => NumberKind::Int,
            Long(_) => NumberKind::Long,
            Float(_) => NumberKind::Float,
            Double(_) => NumberKind::Double,
            BigInteger(_) => NumberKind::BigInteger,
            Decimal(_) => NumberKind::Decimal,
        }
    }

    fn add(&self, other: &Self) -> Self {
        let kind = self.kind().max(other.kind());
        match (self.promote(kind), other.promote(kind)) {
            (Int(a), Int(b)) => Int(a.add(&b)),
            (Long(a), Long(b)) => Long(a.add(&b)),
            (Float(a), Float(b)) => Float(a.add(&b)),
            (Double(a), Double(b)) => Double(a.add(&b)),
            (BigInteger(a), BigInteger(b)) => BigInteger(a.add(&b)),
            (Decimal(a), Decimal(b)) => Decimal(a.add(&b)),
            _ => unreachable!("both operands were promoted to {:?}", kind),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        let kind = self.kind().max(other.kind());
        match (self.promote(kind), other.promote(kind)) {
            (Int(a), Int(b)) => a.compare(&b),
            (Long(a), Long(b)) => a.compare(&b),
            (Float(a), Float(b)) => a.compare(&b),
            (Double(a), Double(b)) => a.compare(&b),
            (BigInteger(a), BigInteger(b)) => a.compare(&b),
            (Decimal(a), Decimal(b)) => a.compare(&b),
            _ => unreachable!("both operands were promoted to {:?}", kind),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Int(v) => fmt::Display::fmt(v, f),
            Long(v) => fmt::Display::fmt(v, f),
            Float(v) => fmt::Display::fmt(v, f),
            Double(v) => fmt::Display::fmt(v, f),
            BigInteger(v) => fmt::Display::fmt(v, f),
            Decimal(v) => fmt::Display::fmt(v, f),
        }
    }
}

macro_rules! number_from {
    ($($t:ty => $variant:ident),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Number {
                    $variant(value)
                }
            }
        )*
    };
}

number_from!(i32 => Int, i64 => Long, f32 => Float, f64 => Double,
    BigInt => BigInteger, BigDecimal => Decimal);

#[test]
fn fixed_width_addition_wraps() {
    assert_eq!(i32::MAX.add(&1), i32::MIN);
    assert_eq!(Number::Long(i64::MAX).add(&Number::Int(1)), Number::Long(i64::MIN));
}

#[test]
fn mixed_kinds_promote() {
    assert_eq!(Number::Int(2).add(&Number::Long(3)), Number::Long(5));
    assert_eq!(Number::Int(2).add(&Number::Float(0.5)), Number::Float(2.5));
    // long outranks double
    assert_eq!(Number::Double(2.75).add(&Number::Long(1)), Number::Long(3));
    assert_eq!(
        Number::Long(7).add(&Number::BigInteger(BigInt::from(3))),
        Number::BigInteger(BigInt::from(10))
    );
    let decimal = Number::Decimal(BigDecimal::new(BigInt::from(15), 1));
    assert_eq!(
        decimal.add(&Number::Int(1)),
        Number::Decimal(BigDecimal::new(BigInt::from(25), 1))
    );
}

#[test]
fn float_ordering_is_total() {
    assert_eq!((-0.0f64).compare(&0.0), Ordering::Less);
    assert_eq!(f64::NAN.compare(&f64::INFINITY), Ordering::Greater);
    assert_eq!(1.5f32.compare(&1.5), Ordering::Equal);
    assert_eq!(Number::Int(2).compare(&Number::Long(2)), Ordering::Equal);
    assert_eq!(Number::Double(1.5).compare(&Number::Float(2.0)), Ordering::Less);
}
