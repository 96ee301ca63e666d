//! # calcfold-formula
//!
//! Evaluator for flat infix formulas such as `1 + 2 / 3 * 4 - 5`.
//!
//! This crate provides:
//! - A closed token model (numbers and `+ - * /`)
//! - Formula construction from tokens or textual symbols
//! - Precedence-aware evaluation that folds the formula in place
//! - Strict or lenient handling of malformed numbers and division by zero
//!
//! ## Example
//!
//! ```rust
//! use calcfold_formula::{evaluate_symbols, EvaluationOptions};
//!
//! let opts = EvaluationOptions::default();
//! let value = evaluate_symbols(["2", "+", "3", "*", "4"], &opts).unwrap();
//! assert_eq!(value, 14.0);
//! ```

pub mod error;
pub mod evaluator;
pub mod formula;
pub mod options;
pub mod token;

pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, evaluate_symbols, evaluate_tokens};
pub use formula::Formula;
pub use options::{DivisionByZeroPolicy, EvaluationOptions, MalformedNumberPolicy};
pub use token::{Operator, Token};
