use std::fmt;
use thiserror::Error;

/// Stable classification of every failure the evaluator can report.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnknownOperator,
    UnexpectedCharacter,
    UnexpectedToken,
    NotEnoughOperands,
    SeveralDots,
    StrayComma,
    ClosedParenthesis,
    MismatchedParenthesis,
    DivisionByZero,
    DomainError,
    InvalidNumber,
    Overflow,
    FunctionFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnknownOperator => "unknown_operator",
            ErrorCode::UnexpectedCharacter => "unexpected_character",
            ErrorCode::UnexpectedToken => "unexpected_token",
            ErrorCode::NotEnoughOperands => "not_enough_operands",
            ErrorCode::SeveralDots => "several_dots",
            ErrorCode::StrayComma => "stray_comma",
            ErrorCode::ClosedParenthesis => "closed_parenthesis",
            ErrorCode::MismatchedParenthesis => "mismatched_parenthesis",
            ErrorCode::DivisionByZero => "division_by_zero",
            ErrorCode::DomainError => "domain_error",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::Overflow => "overflow",
            ErrorCode::FunctionFailed => "function_failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Unknown operator `{0}` in this position")]
    UnknownOperator(String),

    #[error("Unexpected character '{character}' at offset {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("Unexpected token `{0}`")]
    UnexpectedToken(String),

    #[error("Not enough operands for {0}")]
    NotEnoughOperands(String),

    #[error("Function `{name}` expects {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Expression left {0} values on the stack instead of one")]
    UnbalancedExpression(usize),

    #[error("Numeric literal `{0}` contains several dots")]
    SeveralDots(String),

    #[error("Invalid numeric literal `{0}`")]
    InvalidNumber(String),

    #[error("Comma outside of a function argument list")]
    StrayComma,

    #[error("Closing parenthesis at offset {0} has no matching opening parenthesis")]
    ClosedParenthesis(usize),

    #[error("Mismatched parenthesis")]
    MismatchedParenthesis,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Arithmetic overflow in `{0}`")]
    Overflow(String),

    #[error("Function `{name}` failed: {message}")]
    FunctionFailed { name: String, message: String },
}

impl EvalError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::UnknownOperator(_) => ErrorCode::UnknownOperator,
            EvalError::UnexpectedCharacter { .. } => ErrorCode::UnexpectedCharacter,
            EvalError::UnexpectedToken(_) => ErrorCode::UnexpectedToken,
            EvalError::NotEnoughOperands(_)
            | EvalError::ArityMismatch { .. }
            | EvalError::UnbalancedExpression(_) => ErrorCode::NotEnoughOperands,
            EvalError::SeveralDots(_) => ErrorCode::SeveralDots,
            EvalError::InvalidNumber(_) => ErrorCode::InvalidNumber,
            EvalError::StrayComma => ErrorCode::StrayComma,
            EvalError::ClosedParenthesis(_) => ErrorCode::ClosedParenthesis,
            EvalError::MismatchedParenthesis => ErrorCode::MismatchedParenthesis,
            EvalError::DivisionByZero => ErrorCode::DivisionByZero,
            EvalError::DomainError(_) => ErrorCode::DomainError,
            EvalError::Overflow(_) => ErrorCode::Overflow,
            EvalError::FunctionFailed { .. } => ErrorCode::FunctionFailed,
        }
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
