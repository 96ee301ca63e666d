//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while building or evaluating a formula
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Formula has no tokens at all
    #[error("Formula is empty")]
    Empty,

    /// Number/operator alternation is broken
    #[error("Malformed formula: expected {expected} at position {index}")]
    Structure { index: usize, expected: &'static str },

    /// Token in a number position could not be parsed
    #[error("Malformed number '{text}' at position {index}")]
    MalformedToken { index: usize, text: String },

    /// Token in an operator position is not one of `+ - * /`
    #[error("Unknown operator '{text}' at position {index}")]
    UnknownOperator { index: usize, text: String },

    /// Right operand of `/` was zero
    #[error("Division by zero: {dividend} / 0")]
    DivideByZero { dividend: f64 },

    /// Formula was already reduced by a previous evaluation
    #[error("Formula has already been evaluated")]
    Consumed,
}
