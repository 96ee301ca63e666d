//! Flat formula storage and construction
//!
//! A [`Formula`] is a sequence `Number, Operator, Number, ..., Number` that
//! the evaluator reduces in place. Construction enforces the alternation, so
//! evaluation never has to deal with a missing operand.

use crate::error::{FormulaError, FormulaResult};
use crate::options::{EvaluationOptions, MalformedNumberPolicy};
use crate::token::{Operator, Token};
use std::fmt;
use tracing::warn;

/// An ordered, alternating sequence of numbers and operators
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    tokens: Vec<Token>,
    consumed: bool,
}

impl Formula {
    /// Build a formula from tokens, checking the alternation invariant
    ///
    /// # Example
    /// ```rust
    /// use calcfold_formula::{Formula, Operator, Token};
    ///
    /// let formula = Formula::new(vec![
    ///     Token::Number(2.0),
    ///     Token::Operator(Operator::Add),
    ///     Token::Number(3.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(formula.len(), 3);
    /// ```
    pub fn new(tokens: Vec<Token>) -> FormulaResult<Self> {
        if tokens.is_empty() {
            return Err(FormulaError::Empty);
        }

        for (index, token) in tokens.iter().enumerate() {
            let in_place = if index % 2 == 0 {
                token.as_number().is_some()
            } else {
                token.as_operator().is_some()
            };
            if !in_place {
                return Err(FormulaError::Structure {
                    index,
                    expected: expected_at(index),
                });
            }
        }

        // Ends on an operator
        if tokens.len() % 2 == 0 {
            return Err(FormulaError::Structure {
                index: tokens.len(),
                expected: "number",
            });
        }

        Ok(Self {
            tokens,
            consumed: false,
        })
    }

    /// Build a formula from textual tokens such as `["1", "+", "2"]`
    ///
    /// Even positions are parsed as numbers and odd positions as operator
    /// symbols. A number that fails to parse, or an operator left without a
    /// right operand, is handled according to `options.malformed_number`.
    /// Unknown operator symbols are always an error.
    pub fn from_symbols<I, S>(symbols: I, options: &EvaluationOptions) -> FormulaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = Vec::new();

        for (index, symbol) in symbols.into_iter().enumerate() {
            let text = symbol.as_ref().trim();
            if index % 2 == 0 {
                tokens.push(Token::Number(parse_number(index, text, options)?));
            } else {
                let op =
                    Operator::from_symbol(text).ok_or_else(|| FormulaError::UnknownOperator {
                        index,
                        text: text.to_string(),
                    })?;
                tokens.push(Token::Operator(op));
            }
        }

        if !tokens.is_empty() && tokens.len() % 2 == 0 {
            match options.malformed_number {
                MalformedNumberPolicy::Reject => {
                    return Err(FormulaError::Structure {
                        index: tokens.len(),
                        expected: "number",
                    });
                }
                MalformedNumberPolicy::Zero => {
                    warn!(index = tokens.len(), "missing trailing operand, using 0");
                    tokens.push(Token::Number(0.0));
                }
            }
        }

        Self::new(tokens)
    }

    /// Current tokens (shrinks as the formula is evaluated)
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens currently held
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the formula holds no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether an evaluation has already reduced this formula
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Take back the token vector
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut Vec<Token> {
        &mut self.tokens
    }

    pub(crate) fn mark_consumed(&mut self) {
        self.consumed = true;
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

fn expected_at(index: usize) -> &'static str {
    if index % 2 == 0 {
        "number"
    } else {
        "operator"
    }
}

fn parse_number(index: usize, text: &str, options: &EvaluationOptions) -> FormulaResult<f64> {
    match text.parse::<f64>() {
        Ok(n) => Ok(n),
        Err(_) => match options.malformed_number {
            MalformedNumberPolicy::Reject => Err(FormulaError::MalformedToken {
                index,
                text: text.to_string(),
            }),
            MalformedNumberPolicy::Zero => {
                warn!(index, text, "unparseable number, using 0");
                Ok(0.0)
            }
        },
    }
}
