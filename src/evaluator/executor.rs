use super::registry::Registry;
use crate::error::{EvalError, Result};
use crate::number::Number;
use crate::token::Token;

/// Stack machine running a postfix token sequence.
pub(crate) struct Executor<'a, N> {
    registry: &'a Registry<N>,
    stack: Vec<N>,
}

impl<'a, N: Number> Executor<'a, N> {
    pub(crate) fn new(registry: &'a Registry<N>) -> Self {
        Self {
            registry,
            stack: Vec::new(),
        }
    }

    pub(crate) fn execute(mut self, postfix: &[Token<N>]) -> Result<N> {
        for token in postfix {
            match token {
                Token::Operand(value) => self.stack.push(*value),
                Token::Infix(op) => {
                    let rhs = self.pop_value(token)?;
                    let lhs = self.pop_value(token)?;
                    self.stack.push(op.apply(lhs, rhs)?);
                }
                Token::Prefix(op) => {
                    let value = self.pop_value(token)?;
                    self.stack.push(op.apply(value)?);
                }
                Token::Postfix(op) => {
                    let value = self.pop_value(token)?;
                    self.stack.push(op.apply(value)?);
                }
                Token::Name { name, arity } => {
                    let value = self.call(name, *arity)?;
                    self.stack.push(value);
                }
                Token::LeftBrace | Token::RightBrace => {
                    return Err(EvalError::MismatchedParenthesis)
                }
                Token::Comma => return Err(EvalError::StrayComma),
            }
        }

        match self.stack.as_slice() {
            [value] => Ok(*value),
            values => Err(EvalError::UnbalancedExpression(values.len())),
        }
    }

    fn call(&mut self, name: &str, arity: usize) -> Result<N> {
        let callback = self
            .registry
            .function(name)
            .ok_or_else(|| EvalError::UnexpectedToken(name.to_string()))?;
        if callback.arity() != arity {
            return Err(EvalError::ArityMismatch {
                name: name.to_string(),
                expected: callback.arity(),
                found: arity,
            });
        }
        if self.stack.len() < arity {
            return Err(EvalError::NotEnoughOperands(format!("function `{name}`")));
        }

        let arguments = self.stack.split_off(self.stack.len() - arity);
        callback
            .apply(&arguments)
            .map_err(|message| EvalError::FunctionFailed {
                name: name.to_string(),
                message,
            })
    }

    fn pop_value(&mut self, token: &Token<N>) -> Result<N> {
        self.stack
            .pop()
            .ok_or_else(|| EvalError::NotEnoughOperands(format!("`{token}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::evaluator::Callback;
    use crate::operators::{InfixOperator, PostfixOperator, PrefixOperator};

    #[test]
    fn test_execute_postfix() {
        let registry = Registry::new();
        // 2 3 4 * + => 14
        let postfix = vec![
            Token::Operand(2.0),
            Token::Operand(3.0),
            Token::Operand(4.0),
            Token::Infix(InfixOperator::Multiply),
            Token::Infix(InfixOperator::Add),
        ];
        assert_eq!(Executor::new(&registry).execute(&postfix), Ok(14.0));
    }

    #[test]
    fn test_unary_operators() {
        let registry = Registry::new();
        let postfix = vec![
            Token::Operand(3),
            Token::Postfix(PostfixOperator::Factorial),
            Token::Prefix(PrefixOperator::Negate),
        ];
        assert_eq!(Executor::new(&registry).execute(&postfix), Ok(-6));
    }

    #[test]
    fn test_function_arguments_keep_written_order() {
        let mut registry = Registry::new();
        registry.connect("sub", Callback::new(2, |args: &[i64]| args[0] - args[1]));
        let postfix = vec![
            Token::Operand(10),
            Token::Operand(4),
            Token::Name {
                name: "sub".to_string(),
                arity: 2,
            },
        ];
        assert_eq!(Executor::new(&registry).execute(&postfix), Ok(6));
    }

    #[test]
    fn test_stack_underflow() {
        let registry = Registry::<f64>::new();
        let postfix = vec![Token::Operand(4.0), Token::Infix(InfixOperator::Add)];
        assert_eq!(
            Executor::new(&registry).execute(&postfix),
            Err(EvalError::NotEnoughOperands("`+`".to_string()))
        );
    }

    #[test]
    fn test_leftover_values() {
        let registry = Registry::<f64>::new();
        let postfix = vec![Token::Operand(1.0), Token::Operand(2.0)];
        let error = Executor::new(&registry).execute(&postfix).unwrap_err();
        assert_eq!(error, EvalError::UnbalancedExpression(2));
        assert_eq!(error.code(), ErrorCode::NotEnoughOperands);

        let error = Executor::new(&registry).execute(&[]).unwrap_err();
        assert_eq!(error, EvalError::UnbalancedExpression(0));
    }

    #[test]
    fn test_disconnected_function() {
        let registry = Registry::<f64>::new();
        let postfix = vec![
            Token::Operand(1.0),
            Token::Name {
                name: "gone".to_string(),
                arity: 1,
            },
        ];
        assert_eq!(
            Executor::new(&registry).execute(&postfix),
            Err(EvalError::UnexpectedToken("gone".to_string()))
        );
    }

    #[test]
    fn test_failing_function() {
        let mut registry = Registry::new();
        registry.connect(
            "checked_sqrt",
            Callback::try_new(1, |args: &[f64]| {
                if args[0] < 0.0 {
                    Err("negative input".to_string())
                } else {
                    Ok(args[0].sqrt())
                }
            }),
        );
        let postfix = vec![
            Token::Operand(-4.0),
            Token::Name {
                name: "checked_sqrt".to_string(),
                arity: 1,
            },
        ];
        let error = Executor::new(&registry).execute(&postfix).unwrap_err();
        assert_eq!(error.code(), ErrorCode::FunctionFailed);
        assert_eq!(
            error.to_string(),
            "Function `checked_sqrt` failed: negative input"
        );
    }
}
