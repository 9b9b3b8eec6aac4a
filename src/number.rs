use num_traits::{Num, NumCast};
use std::fmt;

/// Numeric type an expression evaluates to.
///
/// Integer implementations report overflow through `None` from the `checked_*`
/// family; floating implementations follow IEEE semantics and never fail.
pub trait Number:
    Num + NumCast + Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// True for integer types, whose division truncates.
    const INTEGER: bool = false;

    /// Parses a literal made of ASCII digits and at most one `.`.
    ///
    /// Integer types truncate the fractional part.
    fn parse_literal(literal: &str) -> Option<Self>;

    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    fn checked_mul(self, rhs: Self) -> Option<Self>;
    fn checked_neg(self) -> Option<Self>;

    /// `self / rhs` for a nonzero `rhs`.
    fn checked_quotient(self, rhs: Self) -> Option<Self>;

    /// `self % rhs` for a nonzero `rhs`.
    fn checked_remainder(self, rhs: Self) -> Option<Self>;

    /// Quotient truncated toward zero, for a nonzero `rhs`.
    fn checked_truncated_quotient(self, rhs: Self) -> Option<Self>;

    fn is_integral(self) -> bool;

    /// Power with a non-integral exponent. Integer types never have one.
    fn fractional_power(self, exponent: Self) -> Option<Self>;

    /// True once a floating value can no longer change under multiplication.
    fn is_saturated(self) -> bool {
        false
    }

    fn from_bool(value: bool) -> Self {
        if value {
            Self::one()
        } else {
            Self::zero()
        }
    }

    fn is_truthy(self) -> bool {
        !self.is_zero()
    }
}

fn has_digits(literal: &str) -> bool {
    literal.bytes().any(|b| b.is_ascii_digit())
}

macro_rules! impl_integer_number {
    ($($t:ty),*) => {$(
        impl Number for $t {
            const INTEGER: bool = true;

            fn parse_literal(literal: &str) -> Option<Self> {
                if !has_digits(literal) {
                    return None;
                }
                match literal.split('.').next() {
                    Some(whole) if !whole.is_empty() => whole.parse().ok(),
                    _ => Some(0),
                }
            }

            fn checked_add(self, rhs: Self) -> Option<Self> {
                <$t>::checked_add(self, rhs)
            }

            fn checked_sub(self, rhs: Self) -> Option<Self> {
                <$t>::checked_sub(self, rhs)
            }

            fn checked_mul(self, rhs: Self) -> Option<Self> {
                <$t>::checked_mul(self, rhs)
            }

            fn checked_neg(self) -> Option<Self> {
                <$t>::checked_neg(self)
            }

            fn checked_quotient(self, rhs: Self) -> Option<Self> {
                <$t>::checked_div(self, rhs)
            }

            fn checked_remainder(self, rhs: Self) -> Option<Self> {
                <$t>::checked_rem(self, rhs)
            }

            fn checked_truncated_quotient(self, rhs: Self) -> Option<Self> {
                <$t>::checked_div(self, rhs)
            }

            fn is_integral(self) -> bool {
                true
            }

            fn fractional_power(self, _exponent: Self) -> Option<Self> {
                None
            }
        }
    )*};
}

macro_rules! impl_float_number {
    ($($t:ty),*) => {$(
        impl Number for $t {
            fn parse_literal(literal: &str) -> Option<Self> {
                if !has_digits(literal) {
                    return None;
                }
                literal.parse().ok()
            }

            fn checked_add(self, rhs: Self) -> Option<Self> {
                Some(self + rhs)
            }

            fn checked_sub(self, rhs: Self) -> Option<Self> {
                Some(self - rhs)
            }

            fn checked_mul(self, rhs: Self) -> Option<Self> {
                Some(self * rhs)
            }

            fn checked_neg(self) -> Option<Self> {
                Some(-self)
            }

            fn checked_quotient(self, rhs: Self) -> Option<Self> {
                Some(self / rhs)
            }

            fn checked_remainder(self, rhs: Self) -> Option<Self> {
                Some(self % rhs)
            }

            fn checked_truncated_quotient(self, rhs: Self) -> Option<Self> {
                Some((self / rhs).trunc())
            }

            fn is_integral(self) -> bool {
                self.is_finite() && self.fract() == 0.0
            }

            fn fractional_power(self, exponent: Self) -> Option<Self> {
                Some(self.powf(exponent))
            }

            fn is_saturated(self) -> bool {
                self.is_infinite() || self.is_nan()
            }
        }
    )*};
}

impl_integer_number!(i32, i64);
impl_float_number!(f32, f64);
