use crate::number::Number;
use crate::operators::{InfixOperator, PostfixOperator, PrefixOperator};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token<N> {
    Operand(N),
    /// A registered function, with the arity it was registered under.
    Name { name: String, arity: usize },
    Infix(InfixOperator),
    Prefix(PrefixOperator),
    Postfix(PostfixOperator),
    LeftBrace,
    RightBrace,
    Comma,
}

impl<N: Number> Token<N> {
    /// True when the token can end an operand, so that the next operator is infix or postfix.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Operand(_) | Token::RightBrace | Token::Postfix(_)
        )
    }
}

impl<N: fmt::Display> fmt::Display for Token<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operand(value) => write!(f, "{value}"),
            Token::Name { name, .. } => f.write_str(name),
            Token::Infix(op) => write!(f, "{op}"),
            Token::Prefix(op) => write!(f, "{op}"),
            Token::Postfix(op) => write!(f, "{op}"),
            Token::LeftBrace => f.write_str("("),
            Token::RightBrace => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

/// Renders a token sequence separated by spaces, e.g. a postfix expression.
pub fn render<N: fmt::Display>(tokens: &[Token<N>]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let tokens: Vec<Token<f64>> = vec![
            Token::Operand(2.5),
            Token::Operand(3.0),
            Token::Infix(InfixOperator::Power),
            Token::Prefix(PrefixOperator::Negate),
            Token::Name {
                name: "max".to_string(),
                arity: 2,
            },
            Token::Postfix(PostfixOperator::Factorial),
        ];
        assert_eq!(render(&tokens), "2.5 3 ** - max !");
    }

    #[test]
    fn test_ends_operand() {
        assert!(Token::Operand(1).ends_operand());
        assert!(Token::<i64>::RightBrace.ends_operand());
        assert!(Token::<i64>::Postfix(PostfixOperator::Factorial).ends_operand());
        assert!(!Token::<i64>::LeftBrace.ends_operand());
        assert!(!Token::<i64>::Comma.ends_operand());
        assert!(!Token::<i64>::Infix(InfixOperator::Add).ends_operand());
    }
}
