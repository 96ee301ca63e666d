//! Formula tokens

use crate::error::{FormulaError, FormulaResult};
use crate::options::{DivisionByZeroPolicy, EvaluationOptions};
use std::fmt;

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators, in symbol order `+ - * /`
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Symbol used in formula text
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Look up an operator by its symbol
    pub fn from_symbol(s: &str) -> Option<Operator> {
        match s {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    /// `*` and `/` bind tighter than `+` and `-`
    pub fn is_higher_precedence(self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }

    /// Apply the operator to two operands
    pub fn apply(self, lhs: f64, rhs: f64, options: &EvaluationOptions) -> FormulaResult<f64> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Subtract => Ok(lhs - rhs),
            Operator::Multiply => Ok(lhs * rhs),
            Operator::Divide => {
                if rhs == 0.0 && options.division_by_zero == DivisionByZeroPolicy::Error {
                    Err(FormulaError::DivideByZero { dividend: lhs })
                } else {
                    Ok(lhs / rhs)
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A number or an operator in a flat formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
}

impl Token {
    /// The numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Token::Number(n) => Some(*n),
            Token::Operator(_) => None,
        }
    }

    /// The operator, if this is one
    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Token::Operator(op) => Some(*op),
            Token::Number(_) => None,
        }
    }
}

impl From<f64> for Token {
    fn from(value: f64) -> Self {
        Token::Number(value)
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Token::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}
