use crate::error::{EvalError, Result};
use crate::evaluator::{Registry, Symbol};
use crate::number::Number;
use crate::operators::{match_spelling, InfixOperator, PostfixOperator, PrefixOperator};
use crate::token::{render, Token};
use log::debug;

/// Splits `expression` into tokens, resolving identifiers against `registry`.
///
/// `-`, `!` and `~` become prefix operators at the start of an operand; after an
/// operand `!` is the factorial and every other spelling is infix.
pub fn tokenize<N: Number>(expression: &str, registry: &Registry<N>) -> Result<Vec<Token<N>>> {
    let tokens = Tokenizer::new(expression, registry).run()?;
    debug!("Tokenized `{}`: {}", expression, render(&tokens));
    Ok(tokens)
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `name` reads as a single identifier token.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_char)
}

struct Tokenizer<'a, N> {
    expression: &'a str,
    registry: &'a Registry<N>,
    position: usize,
    depth: usize,
    tokens: Vec<Token<N>>,
}

impl<'a, N: Number> Tokenizer<'a, N> {
    fn new(expression: &'a str, registry: &'a Registry<N>) -> Self {
        Self {
            expression,
            registry,
            position: 0,
            depth: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token<N>>> {
        while let Some(c) = self.rest().chars().next() {
            match c {
                c if c.is_whitespace() => self.position += c.len_utf8(),
                c if c.is_ascii_digit() || c == '.' => self.number()?,
                c if is_identifier_start(c) => self.identifier()?,
                '(' => {
                    self.depth += 1;
                    self.emit(Token::LeftBrace, 1);
                }
                ')' => {
                    if self.depth == 0 {
                        return Err(EvalError::ClosedParenthesis(self.position));
                    }
                    self.depth -= 1;
                    self.emit(Token::RightBrace, 1);
                }
                ',' => {
                    if self.depth == 0 {
                        return Err(EvalError::StrayComma);
                    }
                    self.emit(Token::Comma, 1);
                }
                c => match match_spelling(self.rest()) {
                    Some(spelling) => self.operator(spelling)?,
                    None => {
                        return Err(EvalError::UnexpectedCharacter {
                            character: c,
                            position: self.position,
                        })
                    }
                },
            }
        }
        Ok(self.tokens)
    }

    fn rest(&self) -> &'a str {
        &self.expression[self.position..]
    }

    fn emit(&mut self, token: Token<N>, len: usize) {
        self.tokens.push(token);
        self.position += len;
    }

    /// Length of the longest prefix of the remaining input whose characters satisfy `accept`.
    fn scan(&self, accept: impl Fn(char) -> bool) -> usize {
        self.rest()
            .char_indices()
            .find(|&(_, c)| !accept(c))
            .map_or(self.rest().len(), |(index, _)| index)
    }

    fn number(&mut self) -> Result<()> {
        let len = self.scan(|c| c.is_ascii_digit() || c == '.');
        let literal = &self.rest()[..len];
        if literal.matches('.').count() > 1 {
            return Err(EvalError::SeveralDots(literal.to_string()));
        }
        let value =
            N::parse_literal(literal).ok_or_else(|| EvalError::InvalidNumber(literal.to_string()))?;
        self.emit(Token::Operand(value), len);
        Ok(())
    }

    fn identifier(&mut self) -> Result<()> {
        let len = self.scan(is_identifier_char);
        let name = &self.rest()[..len];
        let token = match self.registry.lookup(name) {
            Some(Symbol::Function(callback)) => Token::Name {
                name: name.to_string(),
                arity: callback.arity(),
            },
            Some(Symbol::Constant(value)) => Token::Operand(value),
            None => return Err(EvalError::UnexpectedToken(name.to_string())),
        };
        self.emit(token, len);
        Ok(())
    }

    fn operator(&mut self, spelling: &str) -> Result<()> {
        let follows_operand = self.tokens.last().is_some_and(Token::ends_operand);
        let token = if follows_operand {
            match PostfixOperator::try_from(spelling) {
                Ok(op) => Token::Postfix(op),
                Err(_) => Token::Infix(InfixOperator::try_from(spelling)?),
            }
        } else {
            match PrefixOperator::try_from(spelling) {
                Ok(op) => Token::Prefix(op),
                Err(_) => Token::Infix(InfixOperator::try_from(spelling)?),
            }
        };
        self.emit(token, spelling.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::evaluator::Callback;

    fn registry() -> Registry<f64> {
        let mut registry = Registry::new();
        registry.connect("max", Callback::new(2, |args: &[f64]| args[0].max(args[1])));
        registry.set_constant("pi", std::f64::consts::PI);
        registry
    }

    fn code_of(expression: &str) -> ErrorCode {
        match tokenize(expression, &registry()) {
            Err(error) => error.code(),
            Ok(tokens) => panic!("`{expression}` tokenized to {}", render(&tokens)),
        }
    }

    #[test]
    fn test_simple_expression() {
        let tokens = tokenize("2 * (3 + 7)", &registry()).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Operand(2.0),
                Token::Infix(InfixOperator::Multiply),
                Token::LeftBrace,
                Token::Operand(3.0),
                Token::Infix(InfixOperator::Add),
                Token::Operand(7.0),
                Token::RightBrace,
            ]
        );
    }

    #[test]
    fn test_minus_is_resolved_by_context() {
        let tokens = tokenize("-2 - -3", &registry()).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Prefix(PrefixOperator::Negate),
                Token::Operand(2.0),
                Token::Infix(InfixOperator::Subtract),
                Token::Prefix(PrefixOperator::Negate),
                Token::Operand(3.0),
            ]
        );
    }

    #[test]
    fn test_bang_is_factorial_after_operand_and_not_before() {
        let tokens = tokenize("5!!=!8", &registry()).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Operand(5.0),
                Token::Postfix(PostfixOperator::Factorial),
                Token::Infix(InfixOperator::NotEqual),
                Token::Prefix(PrefixOperator::Not),
                Token::Operand(8.0),
            ]
        );
    }

    #[test]
    fn test_longest_spelling_wins() {
        let tokens = tokenize("1<=>2<=3<<4**5//6", &registry()).unwrap();
        let operators: Vec<_> = tokens
            .into_iter()
            .filter_map(|token| match token {
                Token::Infix(op) => Some(op),
                _ => None,
            })
            .collect();
        assert_eq!(
            operators,
            vec![
                InfixOperator::Spaceship,
                InfixOperator::LessOrEqual,
                InfixOperator::ShiftLeft,
                InfixOperator::Power,
                InfixOperator::IntegerDivide,
            ]
        );
    }

    #[test]
    fn test_identifiers_resolve_against_registry() {
        let tokens = tokenize("max(pi, 3)", &registry()).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Name {
                    name: "max".to_string(),
                    arity: 2,
                },
                Token::LeftBrace,
                Token::Operand(std::f64::consts::PI),
                Token::Comma,
                Token::Operand(3.0),
                Token::RightBrace,
            ]
        );
    }

    #[test]
    fn test_decimal_literals() {
        let tokens = tokenize(".5 + 2. + 3.25", &registry()).unwrap();
        assert_eq!(tokens[0], Token::Operand(0.5));
        assert_eq!(tokens[2], Token::Operand(2.0));
        assert_eq!(tokens[4], Token::Operand(3.25));
    }

    #[test]
    fn test_errors() {
        assert_eq!(code_of("2..5"), ErrorCode::SeveralDots);
        assert_eq!(code_of("1.2.3"), ErrorCode::SeveralDots);
        assert_eq!(code_of("2,3"), ErrorCode::StrayComma);
        assert_eq!(code_of("(1))"), ErrorCode::ClosedParenthesis);
        assert_eq!(code_of(")"), ErrorCode::ClosedParenthesis);
        assert_eq!(code_of("2 @ 3"), ErrorCode::UnexpectedCharacter);
        assert_eq!(code_of("x + 1"), ErrorCode::UnexpectedToken);
        assert_eq!(code_of("3 ~ 2"), ErrorCode::UnknownOperator);
        assert_eq!(code_of("1 + ."), ErrorCode::InvalidNumber);
    }

    #[test]
    fn test_unexpected_character_carries_context() {
        let error = tokenize("1 + 2 # 3", &registry()).unwrap_err();
        assert_eq!(
            error,
            EvalError::UnexpectedCharacter {
                character: '#',
                position: 6,
            }
        );
    }

    #[test]
    fn test_identifier_names() {
        assert!(is_identifier("max"));
        assert!(is_identifier("_tmp2"));
        assert!(is_identifier("größe"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2x"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("a b"));
    }

    #[test]
    fn test_integer_literals() {
        let tokens = tokenize("7 // 2", &Registry::<i64>::new()).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Operand(7),
                Token::Infix(InfixOperator::IntegerDivide),
                Token::Operand(2),
            ]
        );
    }
}
