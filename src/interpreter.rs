use std::fmt;
use std::io::BufRead;

use clap::ValueEnum;
use log::{debug, info};
use serde::Serialize;

use crate::error::Result;
use crate::parser::Parser;
use crate::scanner::TokenStream;
use crate::token::Token;
use crate::value::Numeric;

/// Which grammar the token stream and parser accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    /// `term END_OF_STREAM` over integers; letters are illegal.
    Base,

    /// `start` rule with the `name = term` alternative, over complex numbers.
    #[default]
    Extended,
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation<N> {
    /// Value of the expression (or of the right‑hand side of an assignment).
    pub value: N,

    /// Assignment target, when the input was `name = term`.  Not stored anywhere.
    pub target: Option<String>,
}

impl<N: Numeric> fmt::Display for Evaluation<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(name) => write!(f, "Accepted! {} = {}.", name, self.value),
            None => write!(f, "Accepted! Value: {}.", self.value),
        }
    }
}

/// Binary outcome reported by the shell: accepted‑with‑value or not accepted.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<N> {
    Accepted(Evaluation<N>),
    Rejected { error: String, exit_code: i32 },
}

impl<N> Outcome<N> {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Accepted(_) => 0,
            Outcome::Rejected { exit_code, .. } => *exit_code,
        }
    }
}

impl<N> From<Result<Evaluation<N>>> for Outcome<N> {
    fn from(result: Result<Evaluation<N>>) -> Self {
        match result {
            Ok(evaluation) => Outcome::Accepted(evaluation),
            Err(e) => Outcome::Rejected {
                exit_code: e.exit_code(),
                error: e.to_string(),
            },
        }
    }
}

/// Parse and evaluate `src` in one pass.
pub fn evaluate<N: Numeric>(src: &str, grammar: Grammar) -> Result<Evaluation<N>> {
    info!("Evaluating {:?} under {:?} grammar", src, grammar);

    let stream = TokenStream::new(src, grammar);
    let mut parser: Parser<'_, N> = Parser::new(stream);

    let result = parser.parse();

    match &result {
        Ok(evaluation) => debug!("Evaluated to: {}", evaluation.value),
        Err(e) => debug!("Evaluation failed: {}", e),
    }

    result
}

/// Every token in `src`, ending with one `END_OF_STREAM`.
pub fn tokenize(src: &str, grammar: Grammar) -> Vec<Token<'_>> {
    TokenStream::new(src, grammar).collect()
}

/// Read one expression line from `reader`.
///
/// The base grammar only ever sees the first whitespace‑delimited word of the
/// line.  Read failures (including invalid UTF‑8) surface as [`CalcError::Io`].
///
/// [`CalcError::Io`]: crate::error::CalcError::Io
pub fn read_expression<R: BufRead>(mut reader: R, grammar: Grammar) -> Result<String> {
    let mut line = String::new();

    let bytes: usize = reader.read_line(&mut line)?;

    info!("Read {} bytes of input", bytes);

    let expr = match grammar {
        Grammar::Base => line.split_whitespace().next().unwrap_or("").to_owned(),
        Grammar::Extended => line.trim_end_matches(['\n', '\r']).to_owned(),
    };

    Ok(expr)
}
