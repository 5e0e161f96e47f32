//! Centralised error hierarchy for the **expression evaluator**.
//!
//! The token stream, the parser and the evaluator all report failures through
//! one of the variants defined here, so a single `Result<T>` alias flows through
//! the whole pipeline.  Only the *first* failure is ever reported: every rule
//! returns as soon as a sub‑rule fails.
//!
//! The module **does not** print diagnostics itself

use std::io;
use thiserror::Error;

use log::info;

/// Canonical error type used throughout the evaluator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CalcError {
    /// A rule failed while the lookahead was an `ILLEGAL` token.
    #[error("[column {column}] Error: Unexpected character: {character}")]
    Lex {
        /// The offending source text (one full UTF‑8 character).
        character: String,

        /// 1‑based byte column where the character starts.
        column: usize,
    },

    /// A required token or sub‑rule was absent.
    #[error("[column {column}] Error: {message}")]
    Syntax { message: String, column: usize },

    /// Division by a value whose squared magnitude is zero.
    #[error("[column {column}] Error: Division by zero")]
    Domain {
        /// Column of the `/` operator whose right operand was zero.
        column: usize,
    },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CalcError {
    /// Helper constructor for an `ILLEGAL` lookahead.
    pub fn lex<S: Into<String>>(column: usize, character: S) -> Self {
        let character: String = character.into();

        info!("Creating Lex error: column={}, char={}", column, character);

        CalcError::Lex { character, column }
    }

    /// Helper constructor for the **parser**.
    pub fn syntax<S: Into<String>>(column: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Syntax error: column={}, msg={}", column, message);

        CalcError::Syntax { message, column }
    }

    /// Helper constructor for the **evaluator** (division by zero).
    pub fn domain(column: usize) -> Self {
        info!("Creating Domain error: column={}", column);

        CalcError::Domain { column }
    }

    /// Process exit status the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CalcError::Lex { .. } | CalcError::Syntax { .. } => 65,
            CalcError::Domain { .. } => 70,
            CalcError::Io(_) => 74,
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, CalcError>;
