extern crate self as mathexpr_rs;

pub mod error;
pub mod evaluator;
pub mod functions;
pub mod number;
pub mod operators;
pub mod shunting_yard;
pub mod token;
pub mod tokenizer;

pub use error::{ErrorCode, EvalError, Result};
pub use evaluator::{Callback, Evaluator, IntoCallback};
pub use mathexpr_macros::mathexpr_fn;
pub use number::Number;
pub use token::Token;

/// Evaluates `expression` with no functions or constants registered.
///
/// ```
/// assert_eq!(mathexpr_rs::evaluate::<f64>("2 * (3 + 7)"), Ok(20.0));
/// assert_eq!(mathexpr_rs::evaluate::<i64>("7 // 2"), Ok(3));
/// ```
pub fn evaluate<N: Number>(expression: &str) -> Result<N> {
    Evaluator::new().evaluate(expression)
}
