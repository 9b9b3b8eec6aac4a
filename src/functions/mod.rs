//! Ready-made functions and constants for an [`Evaluator`].

mod common;
mod exponential;
mod rounding;
mod trigonometric;

use crate::evaluator::Evaluator;
use crate::number::Number;
use num_traits::{Float, FloatConst};

/// Registers the floating-point prelude: `abs`, `min`, `max`, `sign`, `gcd`, the
/// trigonometric, exponential and rounding functions, and the constants `pi` and `e`.
pub fn register_functions<N: Number + Float + FloatConst>(evaluator: &Evaluator<N>) {
    common::register(evaluator);
    trigonometric::register(evaluator);
    exponential::register(evaluator);
    rounding::register(evaluator);
}

/// Registers `abs`, `min`, `max`, `sign` and `gcd`, which work for every number type.
pub fn register_integer_functions<N: Number>(evaluator: &Evaluator<N>) {
    common::register(evaluator);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_prelude_names() {
        let evaluator = Evaluator::<f64>::new();
        register_functions(&evaluator);
        let names = evaluator.function_names();
        for name in ["abs", "sin", "atan2", "sqrt", "log", "floor", "gcd"] {
            assert!(names.iter().any(|n| n == name), "missing `{name}`");
        }
        assert_eq!(evaluator.constant_names(), vec!["e", "pi"]);
    }

    #[test]
    fn test_prelude_in_expressions() {
        let evaluator = Evaluator::<f64>::new();
        register_functions(&evaluator);
        assert_eq!(evaluator.evaluate("floor(pi) + max(abs(-2), 1)"), Ok(5.0));
        assert_eq!(evaluator.evaluate("hypot(3, 4) ** 2"), Ok(25.0));
        assert_eq!(
            evaluator.evaluate("sqrt(0 - 1)").map_err(|e| e.code()),
            Err(ErrorCode::FunctionFailed)
        );
    }

    #[test]
    fn test_integer_prelude() {
        let evaluator = Evaluator::<i64>::new();
        register_integer_functions(&evaluator);
        assert_eq!(evaluator.evaluate("gcd(12, 18) * sign(-4)"), Ok(-6));
        assert_eq!(evaluator.evaluate("min(3, 9) + max(3, 9)"), Ok(12));
        assert!(!evaluator.is_connected("sin"));
    }
}
