use crate::error::EvalError;
use std::fmt;

mod semantics;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InfixOperator {
    Or,
    Xor,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equal,
    NotEqual,
    Spaceship,
    GreaterOrEqual,
    LessOrEqual,
    Greater,
    Less,
    ShiftLeft,
    ShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    IntegerDivide,
    Power,
}

impl InfixOperator {
    pub const ALL: [InfixOperator; 22] = [
        InfixOperator::Or,
        InfixOperator::Xor,
        InfixOperator::And,
        InfixOperator::BitOr,
        InfixOperator::BitXor,
        InfixOperator::BitAnd,
        InfixOperator::Equal,
        InfixOperator::NotEqual,
        InfixOperator::Spaceship,
        InfixOperator::GreaterOrEqual,
        InfixOperator::LessOrEqual,
        InfixOperator::Greater,
        InfixOperator::Less,
        InfixOperator::ShiftLeft,
        InfixOperator::ShiftRight,
        InfixOperator::Add,
        InfixOperator::Subtract,
        InfixOperator::Multiply,
        InfixOperator::Divide,
        InfixOperator::Modulo,
        InfixOperator::IntegerDivide,
        InfixOperator::Power,
    ];

    /// Binding strength; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            InfixOperator::Or => 1,
            InfixOperator::Xor => 2,
            InfixOperator::And => 3,
            InfixOperator::BitOr => 4,
            InfixOperator::BitXor => 5,
            InfixOperator::BitAnd => 6,
            InfixOperator::Equal | InfixOperator::NotEqual | InfixOperator::Spaceship => 7,
            InfixOperator::GreaterOrEqual
            | InfixOperator::LessOrEqual
            | InfixOperator::Greater
            | InfixOperator::Less => 8,
            InfixOperator::ShiftLeft | InfixOperator::ShiftRight => 9,
            InfixOperator::Add | InfixOperator::Subtract => 10,
            InfixOperator::Multiply
            | InfixOperator::Divide
            | InfixOperator::Modulo
            | InfixOperator::IntegerDivide => 11,
            InfixOperator::Power => 12,
        }
    }

    pub fn associativity(&self) -> Associativity {
        match self {
            InfixOperator::Power => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn spelling(&self) -> &'static str {
        match self {
            InfixOperator::Or => "||",
            InfixOperator::Xor => "^^",
            InfixOperator::And => "&&",
            InfixOperator::BitOr => "|",
            InfixOperator::BitXor => "^",
            InfixOperator::BitAnd => "&",
            InfixOperator::Equal => "=",
            InfixOperator::NotEqual => "!=",
            InfixOperator::Spaceship => "<=>",
            InfixOperator::GreaterOrEqual => ">=",
            InfixOperator::LessOrEqual => "<=",
            InfixOperator::Greater => ">",
            InfixOperator::Less => "<",
            InfixOperator::ShiftLeft => "<<",
            InfixOperator::ShiftRight => ">>",
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::Modulo => "%",
            InfixOperator::IntegerDivide => "//",
            InfixOperator::Power => "**",
        }
    }
}

impl TryFrom<&str> for InfixOperator {
    type Error = EvalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "||" => Ok(InfixOperator::Or),
            "^^" => Ok(InfixOperator::Xor),
            "&&" => Ok(InfixOperator::And),
            "|" => Ok(InfixOperator::BitOr),
            "^" => Ok(InfixOperator::BitXor),
            "&" => Ok(InfixOperator::BitAnd),
            "=" | "==" => Ok(InfixOperator::Equal),
            "!=" | "<>" => Ok(InfixOperator::NotEqual),
            "<=>" => Ok(InfixOperator::Spaceship),
            ">=" => Ok(InfixOperator::GreaterOrEqual),
            "<=" => Ok(InfixOperator::LessOrEqual),
            ">" => Ok(InfixOperator::Greater),
            "<" => Ok(InfixOperator::Less),
            "<<" => Ok(InfixOperator::ShiftLeft),
            ">>" => Ok(InfixOperator::ShiftRight),
            "+" => Ok(InfixOperator::Add),
            "-" => Ok(InfixOperator::Subtract),
            "*" => Ok(InfixOperator::Multiply),
            "/" => Ok(InfixOperator::Divide),
            "%" => Ok(InfixOperator::Modulo),
            "//" => Ok(InfixOperator::IntegerDivide),
            "**" => Ok(InfixOperator::Power),
            _ => Err(EvalError::UnknownOperator(value.to_string())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    Negate,
    Not,
    BitNot,
}

impl PrefixOperator {
    pub const ALL: [PrefixOperator; 3] = [
        PrefixOperator::Negate,
        PrefixOperator::Not,
        PrefixOperator::BitNot,
    ];

    pub fn spelling(&self) -> &'static str {
        match self {
            PrefixOperator::Negate => "-",
            PrefixOperator::Not => "!",
            PrefixOperator::BitNot => "~",
        }
    }
}

impl TryFrom<&str> for PrefixOperator {
    type Error = EvalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "-" => Ok(PrefixOperator::Negate),
            "!" => Ok(PrefixOperator::Not),
            "~" => Ok(PrefixOperator::BitNot),
            _ => Err(EvalError::UnknownOperator(value.to_string())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PostfixOperator {
    Factorial,
}

impl PostfixOperator {
    pub const ALL: [PostfixOperator; 1] = [PostfixOperator::Factorial];

    pub fn spelling(&self) -> &'static str {
        match self {
            PostfixOperator::Factorial => "!",
        }
    }
}

impl TryFrom<&str> for PostfixOperator {
    type Error = EvalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "!" => Ok(PostfixOperator::Factorial),
            _ => Err(EvalError::UnknownOperator(value.to_string())),
        }
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

impl fmt::Display for PostfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Every operator spelling the tokenizer recognizes, aliases included.
const SPELLINGS: [&str; 26] = [
    "<=>", "**", "//", "<=", ">=", "<<", ">>", "<>", "!=", "==", "&&", "||", "^^", "+", "-",
    "*", "/", "%", "<", ">", "=", "&", "|", "^", "!", "~",
];

const LONGEST_SPELLING: usize = 3;

/// Longest operator spelling at the start of `input`.
pub fn match_spelling(input: &str) -> Option<&'static str> {
    (1..=LONGEST_SPELLING.min(input.len()))
        .rev()
        .filter(|&len| input.is_char_boundary(len))
        .find_map(|len| SPELLINGS.iter().find(|s| **s == &input[..len]).copied())
}
