//! End-to-end tests for formula construction and evaluation

use calcfold_formula::{
    evaluate, evaluate_symbols, evaluate_tokens, DivisionByZeroPolicy, EvaluationOptions, Formula,
    FormulaError, MalformedNumberPolicy, Operator, Token,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Precedence by the textbook route: fold each multiplicative term, then sum the terms
fn reference(first: f64, rest: &[(Operator, f64)]) -> f64 {
    let opts = EvaluationOptions::lenient();
    let mut sum: Option<f64> = None;
    let mut pending = Operator::Add;
    let mut term = first;

    for &(op, n) in rest {
        if op.is_higher_precedence() {
            term = op.apply(term, n, &opts).unwrap();
        } else {
            sum = Some(match sum {
                None => term,
                Some(s) => pending.apply(s, term, &opts).unwrap(),
            });
            pending = op;
            term = n;
        }
    }

    match sum {
        None => term,
        Some(s) => pending.apply(s, term, &opts).unwrap(),
    }
}

fn tokens(first: f64, rest: &[(Operator, f64)]) -> Vec<Token> {
    let mut tokens = vec![Token::Number(first)];
    for &(op, n) in rest {
        tokens.push(Token::Operator(op));
        tokens.push(Token::Number(n));
    }
    tokens
}

fn any_operator() -> impl Strategy<Value = Operator> {
    prop::sample::select(Operator::ALL.to_vec())
}

fn additive_operator() -> impl Strategy<Value = Operator> {
    prop::sample::select(vec![Operator::Add, Operator::Subtract])
}

/// Sample input the evaluator was first written against
#[test]
fn test_sample_formula() {
    let symbols = [
        "1", "+", "2", "/", "3", "*", "4", "-", "5", "+", "6", "*", "7", "-", "8",
    ];
    let result = evaluate_symbols(symbols, &EvaluationOptions::default()).unwrap();
    assert!((result - 32.666_666_666_666_67).abs() < 1e-9);
}

#[test]
fn test_precedence_and_tie_break() {
    let opts = EvaluationOptions::default();
    assert_eq!(evaluate_symbols(["2", "+", "3", "*", "4"], &opts).unwrap(), 14.0);
    assert_eq!(evaluate_symbols(["8", "/", "2", "*", "2"], &opts).unwrap(), 8.0);
}

#[test]
fn test_formula_is_single_use() {
    let opts = EvaluationOptions::default();
    let mut formula = Formula::from_symbols(["6", "*", "7"], &opts).unwrap();
    assert_eq!(formula.to_string(), "6 * 7");

    assert_eq!(evaluate(&mut formula, &opts).unwrap(), 42.0);
    assert_eq!(evaluate(&mut formula, &opts), Err(FormulaError::Consumed));

    let mut reseeded = Formula::from_symbols(["6", "*", "7"], &opts).unwrap();
    assert_eq!(evaluate(&mut reseeded, &opts).unwrap(), 42.0);
}

#[test]
fn test_policies() {
    let strict = EvaluationOptions::default();
    assert!(matches!(
        evaluate_symbols(["4", "/", "0"], &strict),
        Err(FormulaError::DivideByZero { .. })
    ));
    assert!(matches!(
        evaluate_symbols(["4", "+", "four"], &strict),
        Err(FormulaError::MalformedToken { index: 2, .. })
    ));

    let zero = strict.with_malformed_number(MalformedNumberPolicy::Zero);
    assert_eq!(evaluate_symbols(["4", "+", "four"], &zero).unwrap(), 4.0);
    // Zero substitution does not imply IEEE division
    assert!(evaluate_symbols(["4", "/", "four"], &zero).is_err());

    let ieee = strict.with_division_by_zero(DivisionByZeroPolicy::Ieee754);
    assert_eq!(
        evaluate_symbols(["1", "-", "4", "/", "0"], &ieee).unwrap(),
        f64::NEG_INFINITY
    );
}

proptest! {
    #[test]
    fn prop_single_number(n in -1.0e9f64..1.0e9) {
        prop_assert_eq!(evaluate_tokens(&[Token::Number(n)], &EvaluationOptions::default()).unwrap(), n);
    }

    #[test]
    fn prop_additive_is_left_to_right(
        first in -1.0e6f64..1.0e6,
        rest in prop::collection::vec((additive_operator(), -1.0e6f64..1.0e6), 0..12),
    ) {
        let expected = rest.iter().fold(first, |acc, &(op, n)| match op {
            Operator::Add => acc + n,
            _ => acc - n,
        });
        let result = evaluate_tokens(&tokens(first, &rest), &EvaluationOptions::default()).unwrap();
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn prop_matches_term_then_sum_fold(
        first in 1u32..=20,
        rest in prop::collection::vec((any_operator(), 1u32..=20), 0..12),
    ) {
        let rest: Vec<(Operator, f64)> = rest.into_iter().map(|(op, n)| (op, f64::from(n))).collect();
        let first = f64::from(first);
        let result = evaluate_tokens(&tokens(first, &rest), &EvaluationOptions::default()).unwrap();
        prop_assert_eq!(result, reference(first, &rest));
    }

    #[test]
    fn prop_independent_copies_agree(
        first in 1u32..=20,
        rest in prop::collection::vec((any_operator(), 1u32..=20), 0..12),
    ) {
        let rest: Vec<(Operator, f64)> = rest.into_iter().map(|(op, n)| (op, f64::from(n))).collect();
        let seed = tokens(f64::from(first), &rest);
        let opts = EvaluationOptions::default();

        let mut a = Formula::new(seed.clone()).unwrap();
        let mut b = Formula::new(seed.clone()).unwrap();
        prop_assert_eq!(evaluate(&mut a, &opts).unwrap(), evaluate(&mut b, &opts).unwrap());
        prop_assert_eq!(evaluate_tokens(&seed, &opts).unwrap(), evaluate_tokens(&seed, &opts).unwrap());
        prop_assert_eq!(seed.len(), rest.len() * 2 + 1);
    }
}
