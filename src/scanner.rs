//! Module `scanner` implements the pull‑based token stream the parser reads from.
//!
//! A [`TokenStream`] owns the source text and exactly **one** buffered token.
//! The parser looks at it with [`TokenStream::current`] and discards it with
//! [`TokenStream::advance`], which scans the next token from the input.  There
//! is no way to un‑read a token: the grammar is LL(1).
//!
//! # Scanning rules (`advance`)
//!
//! 1. Skip whitespace (`' '`, `\t`, `\n`, `\v`, `\f`, `\r`).
//! 2. Input exhausted → `END_OF_STREAM`, and every later call yields it again.
//! 3. Decimal digit → greedily consume digits into a `NUMBER`.  The magnitude
//!    is accumulated with *wrapping* `i64` arithmetic: literals past
//!    `i64::MAX` wrap silently instead of being reported.
//! 4. `+ - * / ( ) =` → the matching single‑character token.
//! 5. ASCII letter, extended grammar only → `IDENTIFIER`.  The name runs up to
//!    the next literal space (`' '`) or end of input; tabs, newlines and
//!    operator characters do *not* end it, so `x=1` is a single identifier.
//! 6. Anything else → `ILLEGAL`, spanning one whole UTF‑8 character.
//!
//! Construction performs one implicit `advance()`, so `current()` is valid
//! straight away.
//!
//! # Example
//!
//! ```rust
//! use fourbanger::interpreter::Grammar;
//! use fourbanger::scanner::TokenStream;
//! use fourbanger::token::TokenType;
//!
//! let mut stream = TokenStream::new("12 + 3", Grammar::Extended);
//! assert_eq!(stream.current().token_type, TokenType::NUMBER(12));
//! stream.advance();
//! assert_eq!(stream.current().token_type, TokenType::ADD_OP);
//! ```

use crate::interpreter::Grammar;
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static operator map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static OPERATORS: phf::Map<u8, TokenType> = phf_map! {
    b'+' => TokenType::ADD_OP,
    b'-' => TokenType::SUB_OP,
    b'*' => TokenType::MUL_OP,
    b'/' => TokenType::DIV_OP,
    b'(' => TokenType::OPEN_PAREN,
    b')' => TokenType::CLOSE_PAREN,
    b'=' => TokenType::EQUAL_OP,
};

/// Single‑token‑lookahead lexer over a borrowed source string.  The lifetime
/// `'a` ties every token's `lexeme` slice back to that source.
pub struct TokenStream<'a> {
    src: &'a str,
    start: usize,      // index of the first byte of the current lexeme
    curr: usize,       // index one past the last byte examined
    grammar: Grammar,  // decides whether letters start identifiers
    current: Token<'a>,
    yielded_end: bool, // iterator already handed out END_OF_STREAM
}

impl<'a> TokenStream<'a> {
    /// Create a token stream over `src` and prime its lookahead buffer.
    pub fn new(src: &'a str, grammar: Grammar) -> Self {
        info!(
            "TokenStream created over {} bytes ({:?} grammar)",
            src.len(),
            grammar
        );

        let mut stream = Self {
            src,
            start: 0,
            curr: 0,
            grammar,
            current: Token::new(TokenType::END_OF_STREAM, "", 1),
            yielded_end: false,
        };

        stream.advance();

        stream
    }

    /// The buffered token.  No side effect.
    #[inline]
    pub fn current(&self) -> &Token<'a> {
        &self.current
    }

    /// The grammar this stream was created for.
    #[inline]
    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Discard the buffered token and scan the next one from the input.
    pub fn advance(&mut self) {
        self.skip_whitespace();

        self.start = self.curr;

        let token_type: TokenType = if self.is_at_end() {
            TokenType::END_OF_STREAM
        } else {
            self.scan_token()
        };

        let src: &'a str = self.src;
        let lexeme: &'a str = &src[self.start..self.curr];

        debug!("Scanned {:?} at column {}", token_type, self.start + 1);

        self.current = Token::new(token_type, lexeme, self.start + 1);
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.src.len()
    }

    /// Consume one byte and return it.  Callers guard with [`is_at_end`].
    #[inline(always)]
    fn bump(&mut self) -> u8 {
        let b = self.bytes()[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it; `0` past the end.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.bytes()[self.curr]
        }
    }

    #[inline(always)]
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r') {
            self.curr += 1;
        }
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan one token starting at `self.curr`, which is known not to be at EOF.
    fn scan_token(&mut self) -> TokenType {
        let b = self.bump();

        if let Some(tt) = OPERATORS.get(&b) {
            return tt.clone();
        }

        match b {
            b'0'..=b'9' => self.scan_number(b),

            b'a'..=b'z' | b'A'..=b'Z' if self.grammar == Grammar::Extended => {
                self.scan_identifier()
            }

            _ => {
                // keep the lexeme on a char boundary for non‑ASCII input
                while !self.is_at_end() && !self.src.is_char_boundary(self.curr) {
                    self.curr += 1;
                }

                TokenType::ILLEGAL
            }
        }
    }

    /// Greedy digit run.  Overflow wraps.
    fn scan_number(&mut self, first: u8) -> TokenType {
        let mut value: i64 = i64::from(first - b'0');

        while self.peek().is_ascii_digit() {
            let digit: i64 = i64::from(self.bump() - b'0');
            value = value.wrapping_mul(10).wrapping_add(digit);
        }

        TokenType::NUMBER(value)
    }

    /// Everything up to the next literal space.  The space itself is left for
    /// the whitespace skip of the following `advance()`.
    fn scan_identifier(&mut self) -> TokenType {
        self.curr = match memchr(b' ', &self.bytes()[self.curr..]) {
            Some(pos) => self.curr + pos,
            None => self.src.len(),
        };

        TokenType::IDENTIFIER(self.src[self.start..self.curr].to_owned())
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

/// Yields every token up to and including one `END_OF_STREAM`.
impl<'a> Iterator for TokenStream<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.yielded_end {
            return None;
        }

        let token: Token<'a> = self.current.clone();

        if token.token_type == TokenType::END_OF_STREAM {
            self.yielded_end = true;
        } else {
            self.advance();
        }

        Some(token)
    }
}

impl<'a> FusedIterator for TokenStream<'a> {}
