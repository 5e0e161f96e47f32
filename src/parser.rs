/*!
Recursive‑descent parser that **evaluates while it recognises**.

No syntax tree is built: every rule returns the value of the span it consumed,
and the caller folds it into its own running value.  The only state shared
between rules is the token stream's single lookahead token.

Grammar
-------

```text
start     → term END_OF_STREAM
          | IDENTIFIER EQUAL_OP term          (extended grammar only)
term      → factor { ( ADD_OP | SUB_OP ) factor }
factor    → subfactor { ( MUL_OP | DIV_OP ) subfactor }
subfactor → NUMBER
          | OPEN_PAREN term CLOSE_PAREN
```

The base grammar's entry point is `term END_OF_STREAM`.

Both repetition rules fold left, so every operator is left‑associative and
`*`/`/` bind tighter than `+`/`-`.  Once an operator token is consumed its
right operand is mandatory; a failure there fails the whole rule and the
partial fold is dropped.

### Cost

| Phase                | Time  | Notes                                       |
|----------------------|------:|---------------------------------------------|
| Whole parse          | Θ(n)  | Each token is scanned and accepted once.    |
| Call‑stack depth     | O(d)  | `d` = bracket nesting depth.                |

### Logging Policy

| Location                | Level   | Purpose                                  |
|-------------------------|---------|------------------------------------------|
| `Parser::new`, `parse`  | `info`  | Lifecycle milestones.                    |
| rule entry, `expect`    | `debug` | Descent into the grammar, failed matches.|
*/

use std::marker::PhantomData;

use crate::error::{CalcError, Result};
use crate::interpreter::{Evaluation, Grammar};
use crate::scanner::TokenStream;
use crate::token::TokenType;
use crate::value::Numeric;

use log::{debug, info};

/// Parser/evaluator over a [`TokenStream`], producing values of type `N`.
pub struct Parser<'a, N> {
    stream: TokenStream<'a>,
    _value: PhantomData<N>,
}

impl<'a, N: Numeric> Parser<'a, N> {
    /// Construct a new parser.  The stream's grammar selects the entry rule.
    pub fn new(stream: TokenStream<'a>) -> Self {
        info!("Parser created ({:?} grammar)", stream.grammar());

        Self {
            stream,
            _value: PhantomData,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse the whole input and return its value.
    pub fn parse(&mut self) -> Result<Evaluation<N>> {
        info!("Beginning parse phase");

        match self.stream.grammar() {
            Grammar::Base => {
                let value: N = self.term()?;

                self.expect(&TokenType::END_OF_STREAM, "Expected end of input")?;

                Ok(Evaluation {
                    value,
                    target: None,
                })
            }

            Grammar::Extended => self.start(),
        }
    }

    // ───────────────────────── grammar rules ──────────────────────

    fn start(&mut self) -> Result<Evaluation<N>> {
        debug!("Entering start");

        match self.stream.current().token_type.clone() {
            TokenType::NUMBER(_) | TokenType::OPEN_PAREN => {
                let value: N = self.term()?;

                self.expect(&TokenType::END_OF_STREAM, "Expected end of input")?;

                Ok(Evaluation {
                    value,
                    target: None,
                })
            }

            TokenType::IDENTIFIER(name) => {
                self.stream.advance();

                self.expect(&TokenType::EQUAL_OP, "Expected '=' after identifier")?;

                let value: N = self.term()?;

                debug!("Assignment to '{}' evaluated (not stored)", name);

                Ok(Evaluation {
                    value,
                    target: Some(name),
                })
            }

            _ => Err(self.error("Expected a number, '(' or an identifier")),
        }
    }

    fn term(&mut self) -> Result<N> {
        debug!("Entering term");

        let mut value: N = self.factor()?;

        loop {
            if self.accept(&TokenType::ADD_OP) {
                value = value + self.factor()?;
            } else if self.accept(&TokenType::SUB_OP) {
                value = value - self.factor()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn factor(&mut self) -> Result<N> {
        debug!("Entering factor");

        let mut value: N = self.subfactor()?;

        loop {
            let column: usize = self.stream.current().column;

            if self.accept(&TokenType::MUL_OP) {
                value = value * self.subfactor()?;
            } else if self.accept(&TokenType::DIV_OP) {
                let divisor: N = self.subfactor()?;

                value = value
                    .checked_div(divisor)
                    .ok_or_else(|| CalcError::domain(column))?;
            } else {
                return Ok(value);
            }
        }
    }

    fn subfactor(&mut self) -> Result<N> {
        debug!("Entering subfactor");

        if let TokenType::NUMBER(n) = self.stream.current().token_type {
            self.stream.advance();

            return Ok(N::from_literal(n));
        }

        if self.accept(&TokenType::OPEN_PAREN) {
            let value: N = self.term()?;

            self.expect(&TokenType::CLOSE_PAREN, "Expected ')' after expression")?;

            return Ok(value);
        }

        Err(self.error("Expected a number or '('"))
    }

    // ────────────────────── utility helpers ───────────────────────

    /// Advance past the lookahead iff it is of kind `ttype`.
    #[inline(always)]
    fn accept(&mut self, ttype: &TokenType) -> bool {
        if self.stream.current().token_type.same_kind(ttype) {
            self.stream.advance();

            return true;
        }

        false
    }

    /// [`accept`](Self::accept), failing with `message` when it does not match.
    fn expect(&mut self, ttype: &TokenType, message: &str) -> Result<()> {
        if self.accept(ttype) {
            return Ok(());
        }

        debug!(
            "expect({:?}) failed at {:?}",
            ttype,
            self.stream.current().token_type
        );

        Err(self.error(message))
    }

    /// Error for a rule that cannot continue at the current lookahead.
    fn error(&self, message: &str) -> CalcError {
        let token = self.stream.current();

        match token.token_type {
            TokenType::ILLEGAL => CalcError::lex(token.column, token.lexeme),

            TokenType::END_OF_STREAM => {
                CalcError::syntax(token.column, format!("{}, found end of input", message))
            }

            _ => CalcError::syntax(
                token.column,
                format!("{}, found '{}'", message, token.lexeme),
            ),
        }
    }
}
