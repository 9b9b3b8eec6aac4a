use crate::evaluator::Evaluator;
use crate::mathexpr_fn;
use crate::number::Number;
use num_traits::{Float, FloatConst};

pub fn register<N: Number + Float + FloatConst>(evaluator: &Evaluator<N>) {
    evaluator.connect("sqrt", sqrt::<N>());
    evaluator.connect("exp", |x: N| x.exp());
    evaluator.connect("ln", ln::<N>());
    evaluator.connect("log10", log10::<N>());
    evaluator.connect("log", log::<N>());
    evaluator.connect("hypot", |x: N, y: N| x.hypot(y));

    evaluator.set_constant("pi", N::PI());
    evaluator.set_constant("e", N::E());
}

fn ensure_positive<N: Number + Float>(x: N) -> Result<N, String> {
    if x > N::zero() {
        Ok(x)
    } else {
        Err(format!("Logarithm of non-positive {x}"))
    }
}

#[mathexpr_fn]
fn sqrt<N: Number + Float>(x: N) -> Result<N, String> {
    if x < N::zero() {
        return Err(format!("Square root of negative {x}"));
    }
    Ok(x.sqrt())
}

#[mathexpr_fn]
fn ln<N: Number + Float>(x: N) -> Result<N, String> {
    ensure_positive(x).map(Float::ln)
}

#[mathexpr_fn]
fn log10<N: Number + Float>(x: N) -> Result<N, String> {
    ensure_positive(x).map(Float::log10)
}

/// Logarithm of `x` in `base`.
#[mathexpr_fn]
fn log<N: Number + Float>(x: N, base: N) -> Result<N, String> {
    let x = ensure_positive(x)?;
    let base = ensure_positive(base)?;
    if base == N::one() {
        return Err("Logarithm in base 1".to_string());
    }
    Ok(x.log(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, EvalError};

    fn evaluator() -> Evaluator<f64> {
        let evaluator = Evaluator::new();
        register(&evaluator);
        evaluator
    }

    #[test]
    fn test_constants() {
        let evaluator = evaluator();
        assert_eq!(evaluator.evaluate("pi"), Ok(std::f64::consts::PI));
        assert_eq!(evaluator.evaluate("ln(e)"), Ok(1.0));
    }

    #[test]
    fn test_powers_and_logarithms() {
        let evaluator = evaluator();
        assert_eq!(evaluator.evaluate("sqrt(16) + log10(1000)"), Ok(7.0));
        assert_eq!(evaluator.evaluate("log(8, 2)"), Ok(3.0));
        assert_eq!(evaluator.evaluate("exp(0)"), Ok(1.0));
        assert_eq!(evaluator.evaluate("hypot(5, 12)"), Ok(13.0));
    }

    #[test]
    fn test_domain_failures() {
        let evaluator = evaluator();
        assert_eq!(
            evaluator.evaluate("sqrt(-4)"),
            Err(EvalError::FunctionFailed {
                name: "sqrt".to_string(),
                message: "Square root of negative -4".to_string(),
            })
        );
        for expression in ["ln(0)", "log10(-1)", "log(4, 1)"] {
            assert_eq!(
                evaluator.evaluate(expression).map_err(|e| e.code()),
                Err(ErrorCode::FunctionFailed)
            );
        }
    }
}
