use crate::error::{EvalError, Result};
use crate::number::Number;
use crate::operators::{Associativity, InfixOperator, PrefixOperator};
use crate::token::{render, Token};
use log::debug;

/// Reorders infix `tokens` into postfix order; the first token is evaluated first.
///
/// A function name must be followed by its parenthesized argument list, and the
/// number of arguments must match the arity recorded in the name token.
pub fn to_postfix<N: Number>(tokens: Vec<Token<N>>) -> Result<Vec<Token<N>>> {
    let mut converter = Converter::new();
    for token in tokens {
        converter.push(token)?;
    }
    let postfix = converter.finish()?;
    debug!("Postfix: {}", render(&postfix));
    Ok(postfix)
}

#[derive(Debug)]
enum Pending {
    Infix(InfixOperator),
    Prefix(PrefixOperator),
    Brace,
}

#[derive(Debug)]
struct Call {
    name: String,
    arity: usize,
}

/// An open parenthesis and, for a call, the arguments seen so far.
#[derive(Debug)]
struct Group {
    call: Option<Call>,
    commas: usize,
    argument_is_empty: bool,
}

struct Converter<N> {
    output: Vec<Token<N>>,
    operators: Vec<Pending>,
    groups: Vec<Group>,
    pending_call: Option<Call>,
}

impl<N: Number> Converter<N> {
    fn new() -> Self {
        Self {
            output: Vec::new(),
            operators: Vec::new(),
            groups: Vec::new(),
            pending_call: None,
        }
    }

    fn push(&mut self, token: Token<N>) -> Result<()> {
        if let Some(call) = self.pending_call.take() {
            if !matches!(token, Token::LeftBrace) {
                return Err(EvalError::UnexpectedToken(call.name));
            }
            self.open_group(Some(call));
            return Ok(());
        }

        if !matches!(token, Token::Comma | Token::RightBrace) {
            self.mark_argument();
        }

        match token {
            Token::Operand(_) => self.output.push(token),
            Token::Name { name, arity } => self.pending_call = Some(Call { name, arity }),
            Token::Prefix(op) => self.operators.push(Pending::Prefix(op)),
            Token::Postfix(_) => {
                if self.output.is_empty() {
                    return Err(EvalError::NotEnoughOperands(format!("`{token}`")));
                }
                self.output.push(token);
            }
            Token::Infix(op) => {
                self.pop_while_binding_tighter(op);
                self.operators.push(Pending::Infix(op));
            }
            Token::LeftBrace => self.open_group(None),
            Token::RightBrace => self.close_group()?,
            Token::Comma => self.separate_argument()?,
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Token<N>>> {
        if let Some(call) = self.pending_call.take() {
            return Err(EvalError::UnexpectedToken(call.name));
        }
        while let Some(pending) = self.operators.last() {
            if matches!(pending, Pending::Brace) {
                return Err(EvalError::MismatchedParenthesis);
            }
            self.pop_to_output();
        }
        Ok(self.output)
    }

    fn mark_argument(&mut self) {
        if let Some(group) = self.groups.last_mut() {
            group.argument_is_empty = false;
        }
    }

    // Prefix operators bind tighter than any infix operator, so they always yield.
    fn pop_while_binding_tighter(&mut self, op: InfixOperator) {
        while let Some(top) = self.operators.last() {
            let yields = match top {
                Pending::Prefix(_) => true,
                Pending::Infix(top) => {
                    top.precedence() > op.precedence()
                        || (top.precedence() == op.precedence()
                            && op.associativity() == Associativity::Left)
                }
                Pending::Brace => false,
            };
            if !yields {
                break;
            }
            self.pop_to_output();
        }
    }

    fn pop_to_output(&mut self) {
        match self.operators.pop() {
            Some(Pending::Infix(op)) => self.output.push(Token::Infix(op)),
            Some(Pending::Prefix(op)) => self.output.push(Token::Prefix(op)),
            Some(Pending::Brace) | None => {}
        }
    }

    // Pops operators up to the innermost brace, which stays on the stack.
    fn unwind_to_brace(&mut self) -> Result<()> {
        loop {
            match self.operators.last() {
                None => return Err(EvalError::MismatchedParenthesis),
                Some(Pending::Brace) => return Ok(()),
                Some(_) => self.pop_to_output(),
            }
        }
    }

    fn open_group(&mut self, call: Option<Call>) {
        self.operators.push(Pending::Brace);
        self.groups.push(Group {
            call,
            commas: 0,
            argument_is_empty: true,
        });
    }

    fn close_group(&mut self) -> Result<()> {
        self.unwind_to_brace()?;
        self.operators.pop();
        let group = self
            .groups
            .pop()
            .ok_or(EvalError::MismatchedParenthesis)?;

        let Some(call) = group.call else {
            return Ok(());
        };
        if group.argument_is_empty && group.commas > 0 {
            return Err(empty_argument(&call));
        }
        let found = if group.argument_is_empty {
            0
        } else {
            group.commas + 1
        };
        if found != call.arity {
            return Err(EvalError::ArityMismatch {
                name: call.name,
                expected: call.arity,
                found,
            });
        }
        self.output.push(Token::Name {
            name: call.name,
            arity: call.arity,
        });
        Ok(())
    }

    fn separate_argument(&mut self) -> Result<()> {
        self.unwind_to_brace().map_err(|_| EvalError::StrayComma)?;
        let group = self.groups.last_mut().ok_or(EvalError::StrayComma)?;
        let Some(call) = &group.call else {
            return Err(EvalError::StrayComma);
        };
        if group.argument_is_empty {
            return Err(empty_argument(call));
        }
        group.commas += 1;
        group.argument_is_empty = true;
        Ok(())
    }
}

fn empty_argument(call: &Call) -> EvalError {
    EvalError::NotEnoughOperands(format!("an empty argument of `{}`", call.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::evaluator::{Callback, Registry};
    use crate::tokenizer::tokenize;

    fn registry() -> Registry<f64> {
        let mut registry = Registry::new();
        registry.connect("max", Callback::new(2, |args: &[f64]| args[0].max(args[1])));
        registry.connect("neg", Callback::new(1, |args: &[f64]| -args[0]));
        registry.connect("zero", Callback::new(0, |_: &[f64]| 0.0));
        registry
    }

    fn postfix(expression: &str) -> String {
        let tokens = tokenize(expression, &registry()).unwrap();
        render(&to_postfix(tokens).unwrap())
    }

    fn error_of(expression: &str) -> EvalError {
        let tokens = tokenize(expression, &registry()).unwrap();
        to_postfix(tokens).unwrap_err()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(postfix("1 + 2 * 3"), "1 2 3 * +");
        assert_eq!(postfix("1 * 2 + 3"), "1 2 * 3 +");
        assert_eq!(postfix("1 || 2 && 3 | 4"), "1 2 3 4 | && ||");
        assert_eq!(postfix("1 < 2 = 3 > 4"), "1 2 < 3 4 > =");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(postfix("10 - 6 - 4"), "10 6 - 4 -");
        assert_eq!(postfix("8 / 4 / 2"), "8 4 / 2 /");
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(postfix("2 ** 3 ** 2"), "2 3 2 ** **");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(postfix("2 * (3 + 7)"), "2 3 7 + *");
        assert_eq!(postfix("((1))"), "1");
    }

    #[test]
    fn test_prefix_and_postfix_binding() {
        assert_eq!(postfix("-3!"), "3 ! -");
        assert_eq!(postfix("-2 ** 2"), "2 - 2 **");
        assert_eq!(postfix("2 ** -3 + 1"), "2 3 - ** 1 +");
        assert_eq!(postfix("(2 + 3)!"), "2 3 + !");
        assert_eq!(postfix("!!1"), "1 ! !");
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(postfix("max(1, 2 + 3)"), "1 2 3 + max");
        assert_eq!(postfix("max(neg(1), max(2, 3)) * 2"), "1 neg 2 3 max max 2 *");
        assert_eq!(postfix("zero() + 1"), "zero 1 +");
        assert_eq!(postfix("-max(1, 2)!"), "1 2 max ! -");
    }

    #[test]
    fn test_mismatched_parenthesis() {
        assert_eq!(error_of("(2 + 3"), EvalError::MismatchedParenthesis);
        assert_eq!(error_of("max(1, (2"), EvalError::MismatchedParenthesis);
    }

    #[test]
    fn test_comma_requires_call_group() {
        assert_eq!(error_of("(2, 3)"), EvalError::StrayComma);
    }

    #[test]
    fn test_arity_mismatch() {
        assert_eq!(
            error_of("max(1)"),
            EvalError::ArityMismatch {
                name: "max".to_string(),
                expected: 2,
                found: 1,
            }
        );
        assert_eq!(error_of("zero(1)").code(), ErrorCode::NotEnoughOperands);
        assert_eq!(error_of("neg()").code(), ErrorCode::NotEnoughOperands);
    }

    #[test]
    fn test_empty_arguments() {
        assert_eq!(error_of("max(, 1)").code(), ErrorCode::NotEnoughOperands);
        assert_eq!(error_of("max(1, )").code(), ErrorCode::NotEnoughOperands);
    }

    #[test]
    fn test_function_name_requires_argument_list() {
        assert_eq!(
            error_of("max + 1"),
            EvalError::UnexpectedToken("max".to_string())
        );
        assert_eq!(error_of("1 + max"), EvalError::UnexpectedToken("max".to_string()));
    }

    #[test]
    fn test_unbalanced_tokens_built_by_hand() {
        let tokens: Vec<Token<i64>> = vec![Token::Operand(1), Token::RightBrace];
        assert_eq!(to_postfix(tokens), Err(EvalError::MismatchedParenthesis));

        let tokens: Vec<Token<i64>> = vec![Token::Operand(1), Token::Comma, Token::Operand(2)];
        assert_eq!(to_postfix(tokens), Err(EvalError::StrayComma));
    }
}
