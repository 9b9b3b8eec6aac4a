use super::{InfixOperator, PostfixOperator, PrefixOperator};
use crate::error::{EvalError, Result};
use crate::number::Number;
use num_traits::NumCast;
use std::cmp::Ordering;

impl InfixOperator {
    pub fn apply<N: Number>(&self, lhs: N, rhs: N) -> Result<N> {
        match self {
            InfixOperator::Add => self.checked(lhs.checked_add(rhs)),
            InfixOperator::Subtract => self.checked(lhs.checked_sub(rhs)),
            InfixOperator::Multiply => self.checked(lhs.checked_mul(rhs)),
            InfixOperator::Divide => {
                ensure_nonzero(rhs)?;
                self.checked(lhs.checked_quotient(rhs))
            }
            InfixOperator::Modulo => {
                ensure_nonzero(rhs)?;
                self.checked(lhs.checked_remainder(rhs))
            }
            InfixOperator::IntegerDivide => {
                ensure_nonzero(rhs)?;
                self.checked(lhs.checked_truncated_quotient(rhs))
            }
            InfixOperator::Power => power(lhs, rhs),

            InfixOperator::Equal => Ok(N::from_bool(lhs == rhs)),
            InfixOperator::NotEqual => Ok(N::from_bool(lhs != rhs)),
            InfixOperator::Greater => Ok(N::from_bool(lhs > rhs)),
            InfixOperator::GreaterOrEqual => Ok(N::from_bool(lhs >= rhs)),
            InfixOperator::Less => Ok(N::from_bool(lhs < rhs)),
            InfixOperator::LessOrEqual => Ok(N::from_bool(lhs <= rhs)),
            InfixOperator::Spaceship => match lhs.partial_cmp(&rhs) {
                Some(Ordering::Less) => self.checked(N::one().checked_neg()),
                Some(Ordering::Equal) => Ok(N::zero()),
                Some(Ordering::Greater) => Ok(N::one()),
                None => Err(EvalError::DomainError(format!(
                    "`{lhs} <=> {rhs}` compares unordered values"
                ))),
            },

            InfixOperator::And => Ok(N::from_bool(lhs.is_truthy() && rhs.is_truthy())),
            InfixOperator::Or => Ok(N::from_bool(lhs.is_truthy() || rhs.is_truthy())),
            InfixOperator::Xor => Ok(N::from_bool(lhs.is_truthy() != rhs.is_truthy())),

            InfixOperator::BitAnd => self.bitwise(lhs, rhs, |a, b| Ok(a & b)),
            InfixOperator::BitOr => self.bitwise(lhs, rhs, |a, b| Ok(a | b)),
            InfixOperator::BitXor => self.bitwise(lhs, rhs, |a, b| Ok(a ^ b)),
            InfixOperator::ShiftLeft => {
                self.bitwise(lhs, rhs, |a, b| Ok(a << shift_amount(b)?))
            }
            InfixOperator::ShiftRight => {
                self.bitwise(lhs, rhs, |a, b| Ok(a >> shift_amount(b)?))
            }
        }
    }

    fn checked<N: Number>(&self, value: Option<N>) -> Result<N> {
        value.ok_or_else(|| EvalError::Overflow(self.spelling().to_string()))
    }

    fn bitwise<N, F>(&self, lhs: N, rhs: N, op: F) -> Result<N>
    where
        N: Number,
        F: Fn(i64, i64) -> Result<i64>,
    {
        let (a, b) = (to_bits(self.spelling(), lhs)?, to_bits(self.spelling(), rhs)?);
        from_bits(self.spelling(), op(a, b)?)
    }
}

impl PrefixOperator {
    pub fn apply<N: Number>(&self, value: N) -> Result<N> {
        match self {
            PrefixOperator::Negate => value
                .checked_neg()
                .ok_or_else(|| EvalError::Overflow(self.spelling().to_string())),
            PrefixOperator::Not => Ok(N::from_bool(!value.is_truthy())),
            PrefixOperator::BitNot => from_bits(self.spelling(), !to_bits(self.spelling(), value)?),
        }
    }
}

impl PostfixOperator {
    pub fn apply<N: Number>(&self, value: N) -> Result<N> {
        match self {
            PostfixOperator::Factorial => factorial(value),
        }
    }
}

fn ensure_nonzero<N: Number>(rhs: N) -> Result<()> {
    if rhs.is_zero() {
        Err(EvalError::DivisionByZero)
    } else {
        Ok(())
    }
}

fn to_bits<N: Number>(spelling: &str, value: N) -> Result<i64> {
    if !value.is_integral() {
        return Err(EvalError::DomainError(format!(
            "`{spelling}` requires integral operands, got {value}"
        )));
    }
    value
        .to_i64()
        .ok_or_else(|| EvalError::Overflow(spelling.to_string()))
}

fn from_bits<N: Number>(spelling: &str, bits: i64) -> Result<N> {
    <N as NumCast>::from(bits).ok_or_else(|| EvalError::Overflow(spelling.to_string()))
}

fn shift_amount(amount: i64) -> Result<u32> {
    u32::try_from(amount)
        .ok()
        .filter(|shift| *shift < i64::BITS)
        .ok_or_else(|| EvalError::DomainError(format!("shift amount {amount} out of range")))
}

fn power<N: Number>(base: N, exponent: N) -> Result<N> {
    let overflow = || EvalError::Overflow(InfixOperator::Power.spelling().to_string());

    if !exponent.is_integral() {
        return base.fractional_power(exponent).ok_or_else(|| {
            EvalError::DomainError(format!("non-integral exponent {exponent}"))
        });
    }
    // Integral floats beyond i64 range.
    let Some(exponent) = exponent.to_i64() else {
        return base.fractional_power(exponent).ok_or_else(overflow);
    };

    if exponent < 0 && N::INTEGER {
        return integer_reciprocal_power(base, exponent);
    }

    let magnitude = repeated_multiplication(base, exponent.unsigned_abs()).ok_or_else(overflow)?;
    if exponent >= 0 {
        return Ok(magnitude);
    }
    ensure_nonzero(magnitude)?;
    N::one().checked_quotient(magnitude).ok_or_else(overflow)
}

// Truncated `1 / base ** -exponent`: only a base of 1 or -1 keeps a nonzero result.
fn integer_reciprocal_power<N: Number>(base: N, exponent: i64) -> Result<N> {
    ensure_nonzero(base)?;
    let minus_one = N::zero() - N::one();
    if base == N::one() || (base == minus_one && exponent % 2 == 0) {
        Ok(N::one())
    } else if base == minus_one {
        Ok(minus_one)
    } else {
        Ok(N::zero())
    }
}

fn repeated_multiplication<N: Number>(base: N, mut exponent: u64) -> Option<N> {
    let mut result = N::one();
    let mut factor = base;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.checked_mul(factor)?;
        }
        exponent >>= 1;
        if exponent > 0 {
            factor = factor.checked_mul(factor)?;
        }
    }
    Some(result)
}

fn factorial<N: Number>(value: N) -> Result<N> {
    if value < N::zero() || !value.is_integral() {
        return Err(EvalError::DomainError(format!(
            "factorial of {value}, expected a non-negative integer"
        )));
    }

    let mut result = N::one();
    let mut counter = N::one();
    while counter < value {
        counter = counter + N::one();
        result = result
            .checked_mul(counter)
            .ok_or_else(|| EvalError::Overflow(PostfixOperator::Factorial.spelling().to_string()))?;
        if result.is_saturated() {
            break;
        }
    }
    Ok(result)
}
