//! calcfold CLI - evaluate flat arithmetic formulas

use anyhow::{Context, Result};
use calcfold_formula::{
    evaluate, DivisionByZeroPolicy, EvaluationOptions, Formula, MalformedNumberPolicy,
};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "calcfold")]
#[command(author, version, about = "Evaluate flat arithmetic formulas with operator precedence")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a formula and print the result
    #[command(alias = "e")]
    Eval {
        #[command(flatten)]
        formula: FormulaArgs,

        /// Treat unparseable numbers and a missing last operand as 0
        #[arg(long)]
        lenient: bool,

        /// Divide by zero as plain floats (inf / NaN) instead of failing
        #[arg(long)]
        ieee_division: bool,
    },

    /// Validate a formula and print it without evaluating
    Check {
        #[command(flatten)]
        formula: FormulaArgs,
    },
}

#[derive(Args)]
struct FormulaArgs {
    /// Tokens such as `1 + 2 '*' 3`, or one quoted string "1 + 2 * 3"
    #[arg(
        required = true,
        num_args = 1..,
        allow_hyphen_values = true,
        allow_negative_numbers = true,
        trailing_var_arg = true
    )]
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Eval {
            formula,
            lenient,
            ieee_division,
        } => {
            let mut options = EvaluationOptions::default();
            if lenient {
                options = options.with_malformed_number(MalformedNumberPolicy::Zero);
            }
            if ieee_division {
                options = options.with_division_by_zero(DivisionByZeroPolicy::Ieee754);
            }
            eval(&formula.tokens, &options)
        }
        Commands::Check { formula } => check(&formula.tokens),
    }
}

fn eval(args: &[String], options: &EvaluationOptions) -> Result<()> {
    let symbols = split_symbols(args);
    debug!(?options, count = symbols.len(), "parsed arguments");

    let mut formula = Formula::from_symbols(&symbols, options)
        .with_context(|| format!("Invalid formula '{}'", symbols.join(" ")))?;
    let source = formula.to_string();
    let result = evaluate(&mut formula, options)
        .with_context(|| format!("Failed to evaluate '{}'", source))?;

    println!("{}", result);
    Ok(())
}

fn check(args: &[String]) -> Result<()> {
    let symbols = split_symbols(args);
    let formula = Formula::from_symbols(&symbols, &EvaluationOptions::default())
        .with_context(|| format!("Invalid formula '{}'", symbols.join(" ")))?;

    println!("{}", formula);
    println!("{} tokens", formula.len());
    Ok(())
}

/// Split every argument on whitespace so quoted and unquoted input both work
fn split_symbols(args: &[String]) -> Vec<&str> {
    args.iter().flat_map(|arg| arg.split_whitespace()).collect()
}

/// Log to stderr so stdout only carries results
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(
                    Targets::new()
                        .with_default(LevelFilter::WARN)
                        .with_target("calcfold_formula", level)
                        .with_target("calcfold", level),
                ),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_symbols() {
        let args = vec!["1 + 2".to_string(), "*".to_string(), " 3 ".to_string()];
        assert_eq!(split_symbols(&args), ["1", "+", "2", "*", "3"]);
    }

    #[test]
    fn test_cli_parses_hyphen_tokens() {
        let cli = Cli::try_parse_from(["calcfold", "eval", "-5", "-", "3"]).unwrap();
        match cli.command {
            Commands::Eval { formula, lenient, .. } => {
                assert_eq!(formula.tokens, ["-5", "-", "3"]);
                assert!(!lenient);
            }
            Commands::Check { .. } => panic!("Expected eval"),
        }
    }
}
