//! Evaluation options
//!
//! The two fallback behaviours of the evaluator are policies rather than
//! hard-coded choices. The default is strict; [`EvaluationOptions::lenient`]
//! substitutes numeric fallbacks everywhere instead of failing.

/// What to do with a number position that does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedNumberPolicy {
    /// Fail with [`FormulaError::MalformedToken`](crate::FormulaError::MalformedToken)
    #[default]
    Reject,
    /// Use `0` in place of the token (and of a missing trailing operand)
    Zero,
}

/// What to do when the right operand of `/` is zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisionByZeroPolicy {
    /// Fail with [`FormulaError::DivideByZero`](crate::FormulaError::DivideByZero)
    #[default]
    Error,
    /// Plain float division: `±inf`, or NaN for `0 / 0`
    Ieee754,
}

/// Options controlling formula construction and evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluationOptions {
    pub malformed_number: MalformedNumberPolicy,
    pub division_by_zero: DivisionByZeroPolicy,
}

impl EvaluationOptions {
    /// Strict options: every fallback is reported as an error
    pub fn strict() -> Self {
        Self::default()
    }

    /// Never fail on bad numbers or zero divisors
    pub fn lenient() -> Self {
        Self {
            malformed_number: MalformedNumberPolicy::Zero,
            division_by_zero: DivisionByZeroPolicy::Ieee754,
        }
    }

    /// Set the malformed number policy
    pub fn with_malformed_number(mut self, policy: MalformedNumberPolicy) -> Self {
        self.malformed_number = policy;
        self
    }

    /// Set the division by zero policy
    pub fn with_division_by_zero(mut self, policy: DivisionByZeroPolicy) -> Self {
        self.division_by_zero = policy;
        self
    }
}
