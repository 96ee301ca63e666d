//! Formula evaluator
//!
//! Reduces a [`Formula`] to a single number without building a tree.
//! Precedence is resolved by recursive lookahead: when a `*` or `/` follows
//! the current operand, the multiplicative run is folded first and its
//! operator/operand pairs are removed from the token vector so that every
//! later lookahead sees the collapsed neighbour.

use crate::error::{FormulaError, FormulaResult};
use crate::formula::Formula;
use crate::options::EvaluationOptions;
use crate::token::{Operator, Token};
use tracing::{debug, trace};

/// Evaluate a formula, shrinking it in place
///
/// The formula is marked consumed whether or not evaluation succeeds, and a
/// second call on the same formula fails with [`FormulaError::Consumed`].
///
/// # Example
/// ```rust
/// use calcfold_formula::{evaluate, EvaluationOptions, Formula};
///
/// let opts = EvaluationOptions::default();
/// let mut formula = Formula::from_symbols(["2", "+", "3", "*", "4"], &opts).unwrap();
/// assert_eq!(evaluate(&mut formula, &opts).unwrap(), 14.0);
/// assert!(evaluate(&mut formula, &opts).is_err());
/// ```
pub fn evaluate(formula: &mut Formula, options: &EvaluationOptions) -> FormulaResult<f64> {
    if formula.is_consumed() {
        return Err(FormulaError::Consumed);
    }
    formula.mark_consumed();
    debug!(%formula, "evaluating formula");

    let mut reducer = Reducer {
        tokens: formula.tokens_mut(),
        options,
    };
    let seed = reducer.number_at(0)?;
    let result = reducer.step(seed, 0, 0)?;

    debug!(result, remaining = formula.len(), "formula evaluated");
    Ok(result)
}

/// Evaluate a copy of `tokens`, leaving the caller's slice untouched
pub fn evaluate_tokens(tokens: &[Token], options: &EvaluationOptions) -> FormulaResult<f64> {
    let mut formula = Formula::new(tokens.to_vec())?;
    evaluate(&mut formula, options)
}

/// Build a formula from textual tokens and evaluate it
pub fn evaluate_symbols<I, S>(symbols: I, options: &EvaluationOptions) -> FormulaResult<f64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut formula = Formula::from_symbols(symbols, options)?;
    evaluate(&mut formula, options)
}

/// Token vector shared by every recursive step
struct Reducer<'a> {
    tokens: &'a mut Vec<Token>,
    options: &'a EvaluationOptions,
}

impl Reducer<'_> {
    /// Fold everything right of `cursor` into `acc`.
    ///
    /// `depth > 0` means we are resolving a multiplicative run for an
    /// additive caller, and must stop at the first `+` or `-`.
    fn step(&mut self, acc: f64, cursor: usize, depth: usize) -> FormulaResult<f64> {
        trace!(acc, cursor, depth, len = self.tokens.len(), "step");

        let Some(op) = self.operator_at(cursor + 1) else {
            return Ok(acc);
        };
        if depth > 0 && !op.is_higher_precedence() {
            return Ok(acc);
        }

        let mut rhs = self.number_at(cursor + 2)?;

        if self
            .operator_at(cursor + 3)
            .is_some_and(Operator::is_higher_precedence)
        {
            if op.is_higher_precedence() {
                // Equal precedence: fold left to right, stay on the same cursor
                let acc = op.apply(acc, rhs, self.options)?;
                self.collapse(cursor + 1);
                return self.step(acc, cursor, depth);
            }

            rhs = self.step(rhs, cursor + 2, depth + 1)?;
            self.collapse(cursor + 3);
        }

        let acc = op.apply(acc, rhs, self.options)?;
        self.step(acc, cursor + 2, depth)
    }

    fn operator_at(&self, index: usize) -> Option<Operator> {
        self.tokens.get(index).and_then(Token::as_operator)
    }

    fn number_at(&self, index: usize) -> FormulaResult<f64> {
        self.tokens
            .get(index)
            .and_then(Token::as_number)
            .ok_or(FormulaError::Structure {
                index,
                expected: "number",
            })
    }

    /// Remove the operator at `index` and the operand after it
    fn collapse(&mut self, index: usize) {
        self.tokens.drain(index..index + 2);
    }
}
