use crate::evaluator::Evaluator;
use crate::mathexpr_fn;
use crate::number::Number;
use num_traits::Float;

pub fn register<N: Number + Float>(evaluator: &Evaluator<N>) {
    evaluator.connect("sin", |x: N| x.sin());
    evaluator.connect("cos", |x: N| x.cos());
    evaluator.connect("tan", |x: N| x.tan());
    evaluator.connect("asin", asin::<N>());
    evaluator.connect("acos", acos::<N>());
    evaluator.connect("atan", |x: N| x.atan());
    evaluator.connect("atan2", |y: N, x: N| y.atan2(x));
}

fn ensure_unit_range<N: Number + Float>(x: N) -> Result<N, String> {
    if x.abs() > N::one() || x.is_nan() {
        Err(format!("{x} is outside [-1, 1]"))
    } else {
        Ok(x)
    }
}

#[mathexpr_fn]
fn asin<N: Number + Float>(x: N) -> Result<N, String> {
    ensure_unit_range(x).map(Float::asin)
}

#[mathexpr_fn]
fn acos<N: Number + Float>(x: N) -> Result<N, String> {
    ensure_unit_range(x).map(Float::acos)
}
