use crate::evaluator::Evaluator;
use crate::mathexpr_fn;
use crate::number::Number;

pub fn register<N: Number>(evaluator: &Evaluator<N>) {
    evaluator.connect("abs", abs::<N>());
    evaluator.connect("min", min::<N>());
    evaluator.connect("max", max::<N>());
    evaluator.connect("sign", sign::<N>());
    evaluator.connect("gcd", gcd::<N>());
}

fn magnitude<N: Number>(x: N) -> Result<N, String> {
    if x < N::zero() {
        x.checked_neg()
            .ok_or_else(|| format!("Magnitude of {x} overflows"))
    } else {
        Ok(x)
    }
}

#[mathexpr_fn]
fn abs<N: Number>(x: N) -> Result<N, String> {
    magnitude(x)
}

#[mathexpr_fn]
fn min<N: Number>(a: N, b: N) -> N {
    if b < a {
        b
    } else {
        a
    }
}

#[mathexpr_fn]
fn max<N: Number>(a: N, b: N) -> N {
    if b > a {
        b
    } else {
        a
    }
}

/// -1, 0 or 1; NaN is returned unchanged.
#[mathexpr_fn]
fn sign<N: Number>(x: N) -> N {
    if x > N::zero() {
        N::one()
    } else if x < N::zero() {
        N::zero() - N::one()
    } else {
        x
    }
}

#[mathexpr_fn]
fn gcd<N: Number>(a: N, b: N) -> Result<N, String> {
    if !a.is_integral() || !b.is_integral() {
        return Err(format!("Expected integers, got {a} and {b}"));
    }
    let (mut a, mut b) = (magnitude(a)?, magnitude(b)?);
    while !b.is_zero() {
        let remainder = a
            .checked_remainder(b)
            .ok_or_else(|| format!("Remainder of {a} by {b} overflows"))?;
        a = b;
        b = remainder;
    }
    Ok(a)
}
