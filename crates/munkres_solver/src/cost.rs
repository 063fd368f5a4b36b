use std::fmt;
use std::ops::{Add, Sub};

/// Why a value cannot be used as a cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inadmissible {
    Negative,
    NotANumber,
    Infinite,
}

/// Signed accumulator for row and column potentials, reduced values and
/// totals. Wide enough that sums of N costs and the potentials built from
/// them do not overflow.
pub trait Widened:
    Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + fmt::Debug + fmt::Display
{
}

impl Widened for i64 {}
impl Widened for i128 {}
impl Widened for f64 {}

/// Numeric element of a cost matrix.
///
/// Admissible values are finite and non-negative, which makes them totally
/// ordered under `PartialOrd`. Reductions only ever subtract a value that is
/// `<=` the operand, so admissible matrices stay admissible. Everything that
/// can grow past the largest input (potentials, totals) is computed in
/// [`Cost::Wide`].
pub trait Cost:
    Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + fmt::Debug + fmt::Display
{
    type Wide: Widened;

    const ZERO: Self;

    fn widen(self) -> Self::Wide;

    fn check(self) -> Result<(), Inadmissible>;

    fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

macro_rules! impl_cost_signed {
    ($($t:ty => $w:ty),*) => {
        $(
            impl Cost for $t {
                type Wide = $w;

                const ZERO: Self = 0;

                fn widen(self) -> $w {
                    <$w>::from(self)
                }

                fn check(self) -> Result<(), Inadmissible> {
                    if self < 0 { Err(Inadmissible::Negative) } else { Ok(()) }
                }
            }
        )*
    };
}

macro_rules! impl_cost_unsigned {
    ($($t:ty => $w:ty),*) => {
        $(
            impl Cost for $t {
                type Wide = $w;

                const ZERO: Self = 0;

                fn widen(self) -> $w {
                    // lossless: every source type is at most 64 bits wide
                    self as $w
                }

                fn check(self) -> Result<(), Inadmissible> {
                    Ok(())
                }
            }
        )*
    };
}

macro_rules! impl_cost_float {
    ($($t:ty),*) => {
        $(
            impl Cost for $t {
                type Wide = f64;

                const ZERO: Self = 0.0;

                fn widen(self) -> f64 {
                    f64::from(self)
                }

                fn check(self) -> Result<(), Inadmissible> {
                    if self.is_nan() {
                        Err(Inadmissible::NotANumber)
                    } else if self.is_infinite() {
                        Err(Inadmissible::Infinite)
                    } else if self < 0.0 {
                        Err(Inadmissible::Negative)
                    } else {
                        Ok(())
                    }
                }
            }
        )*
    };
}

impl_cost_signed!(i32 => i64, i64 => i128);
impl_cost_unsigned!(u32 => i64, u64 => i128, usize => i128);
impl_cost_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, Ok(()))]
    #[case(-0.0, Ok(()))]
    #[case(3.5, Ok(()))]
    #[case(-1e-12, Err(Inadmissible::Negative))]
    #[case(f64::NAN, Err(Inadmissible::NotANumber))]
    #[case(f64::INFINITY, Err(Inadmissible::Infinite))]
    #[case(f64::NEG_INFINITY, Err(Inadmissible::Infinite))]
    fn float_admissibility(#[case] value: f64, #[case] expected: Result<(), Inadmissible>) {
        assert_eq!(value.check(), expected);
    }

    #[test]
    fn integer_admissibility() {
        assert_eq!(0i64.check(), Ok(()));
        assert_eq!((-3i32).check(), Err(Inadmissible::Negative));
        assert_eq!(u32::MAX.check(), Ok(()));
    }

    #[test]
    fn widening_keeps_the_largest_values() {
        assert_eq!(u32::MAX.widen() + u32::MAX.widen(), 2 * i64::from(u32::MAX));
        assert_eq!(u64::MAX.widen(), i128::from(u64::MAX));
        assert_eq!(i64::MAX.widen() + 1, i128::from(i64::MAX) + 1);
        assert_eq!(usize::MAX.widen(), usize::MAX as i128);
        assert_eq!(0.5f32.widen(), 0.5f64);
    }

    #[test]
    fn negative_zero_is_zero() {
        assert!((-0.0f64).is_zero());
        assert!(!1u64.is_zero());
    }
}
