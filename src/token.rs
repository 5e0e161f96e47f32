use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::mem;

/// The different kinds of tokens recognized by the token stream.
///
/// Variants without data are single‑character operators and brackets.
/// `NUMBER(i64)` carries the literal's magnitude and `IDENTIFIER(String)`
/// its raw text.  `END_OF_STREAM` repeats forever once input is exhausted.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TokenType {
    /// A decimal integer literal
    NUMBER(i64),

    /// '+'
    ADD_OP,

    /// '-'
    SUB_OP,

    /// '*'
    MUL_OP,

    /// '/'
    DIV_OP,

    /// '('
    OPEN_PAREN,

    /// ')'
    CLOSE_PAREN,

    /// '='
    EQUAL_OP,

    /// A name on the left of an assignment (extended grammar only)
    IDENTIFIER(String),

    /// Input exhausted
    END_OF_STREAM,

    /// A character that starts no token
    ILLEGAL,
}

impl TokenType {
    /// Do both types share the same variant, ignoring any payload?
    /// This is what the parser matches on.
    pub fn same_kind(&self, other: &TokenType) -> bool {
        let same: bool = mem::discriminant(self) == mem::discriminant(other);

        debug!("Comparing kinds {:?} / {:?}: {}", self, other, same);

        same
    }

    /// Upper‑case name used by the `tokenize` output.
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::NUMBER(_) => "NUMBER",
            TokenType::ADD_OP => "ADD_OP",
            TokenType::SUB_OP => "SUB_OP",
            TokenType::MUL_OP => "MUL_OP",
            TokenType::DIV_OP => "DIV_OP",
            TokenType::OPEN_PAREN => "OPEN_PAREN",
            TokenType::CLOSE_PAREN => "CLOSE_PAREN",
            TokenType::EQUAL_OP => "EQUAL_OP",
            TokenType::IDENTIFIER(_) => "IDENTIFIER",
            TokenType::END_OF_STREAM => "END_OF_STREAM",
            TokenType::ILLEGAL => "ILLEGAL",
        }
    }
}

/// A scanned token, including its type, the original lexeme,
/// and the column where it starts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Token<'a> {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,

    /// 1‑based byte column in the source.
    pub column: usize,
}

impl<'a> Token<'a> {
    /// Create a new Token with the given type, lexeme, and column.
    pub fn new(token_type: TokenType, lexeme: &'a str, column: usize) -> Self {
        info!(
            "Creating new token: type={:?}, lexeme={}, column={}",
            token_type, lexeme, column
        );

        Self {
            token_type,
            lexeme,
            column,
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf: itoa::Buffer = itoa::Buffer::new();

        let literal: &str = match &self.token_type {
            TokenType::NUMBER(n) => buf.format(*n),
            TokenType::IDENTIFIER(name) => name,
            _ => "null",
        };

        write!(f, "{} {} {}", self.token_type.name(), self.lexeme, literal)
    }
}
