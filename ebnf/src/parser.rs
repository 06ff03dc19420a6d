//! Recursive descent over the grammar of EBNF grammars:
//!
//! ```text
//! Syntax      = {Production} EndOfInput .
//! Production  = Identifier "=" Expression "." .
//! Expression  = Term {"|" Term} .
//! Term        = Factor {Factor} .
//! Factor      = Identifier
//!             | Literal
//!             | "(" Expression ")"
//!             | "[" Expression "]"
//!             | "{" Expression "}" .
//! ```
//!
//! Nothing is built, the parser only reports tokens that don't fit.

use tracing::debug;

use crate::diagnostic::{Diagnostic, Reporter};
use crate::error::{Error, Result};
use crate::scanner::Scanner;
use crate::source::CharSource;
use crate::token::{Token, TokenKind};

/// How many groups may be open at once. Each level costs a few stack frames,
/// so unbounded nesting would overflow the stack instead of returning.
pub const MAX_NESTING: usize = 256;

/// Kinds that can start a `Factor`.
const FACTOR_START: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::Literal,
    TokenKind::OpenParen,
    TokenKind::OpenBracket,
    TokenKind::OpenCurly,
];

/// Checks a token stream against the grammar, handing every mismatch to a
/// `Reporter`.
///
/// The `Err` side of every method carries i/o and reporter failures, and
/// groups nested deeper than `MAX_NESTING`. A syntax error never aborts the
/// traversal.
#[derive(Debug)]
pub struct Parser<S, R> {
    scanner: Scanner<S>,
    reporter: R,
    /// Token of the last reported diagnostic.
    last_error: Option<Token>,
    reported: usize,
    /// Groups currently open.
    depth: usize,
}

impl<S: CharSource, R: Reporter> Parser<S, R> {
    pub fn new(scanner: Scanner<S>, reporter: R) -> Self {
        Parser {
            scanner,
            reporter,
            last_error: None,
            reported: 0,
            depth: 0,
        }
    }

    /// `Syntax = {Production} EndOfInput .`
    pub fn syntax(&mut self) -> Result<()> {
        while self.kind()? == TokenKind::Identifier {
            let start = self.scanner.current()?.clone();
            self.production()?;
            // Unreachable as written: the loop only enters on an identifier and
            // `production` consumes it first. Kept so that a grammar change
            // can't turn a stuck token into an endless loop.
            if self.scanner.current()? == &start {
                debug!(target: "ebnf::parser", at = %start.position, "no progress, skipping token");
                self.scanner.advance()?;
            }
        }
        self.expect(&[TokenKind::EndOfInput])?;
        Ok(())
    }

    /// `Production = Identifier "=" Expression "." .`
    pub fn production(&mut self) -> Result<()> {
        self.expect(&[TokenKind::Identifier])?;
        self.expect(&[TokenKind::Assign])?;
        self.expression()?;
        self.expect(&[TokenKind::Period])?;
        Ok(())
    }

    /// `Expression = Term {"|" Term} .`
    pub fn expression(&mut self) -> Result<()> {
        self.term()?;
        while self.kind()? == TokenKind::Bar {
            self.scanner.advance()?;
            self.term()?;
        }
        Ok(())
    }

    /// `Term = Factor {Factor} .`
    pub fn term(&mut self) -> Result<()> {
        self.factor()?;
        while FACTOR_START.contains(&self.kind()?) {
            self.factor()?;
        }
        Ok(())
    }

    /// `Factor = Identifier | Literal | "(" Expression ")" | "[" Expression "]" | "{" Expression "}" .`
    pub fn factor(&mut self) -> Result<()> {
        let kind = self.kind()?;
        let close = match kind.closing() {
            Some(close) if self.depth >= MAX_NESTING => {
                return Err(Error::NestingTooDeep {
                    position: self.scanner.current()?.position.clone(),
                    limit: MAX_NESTING,
                });
            }
            close => close,
        };
        if !self.expect(FACTOR_START)? {
            return Ok(());
        }
        if let Some(close) = close {
            self.depth += 1;
            let nested = self.expression();
            self.depth -= 1;
            nested?;
            self.expect(&[close])?;
        }
        Ok(())
    }

    /// Consume the current token if its kind is one of `kinds`. Otherwise
    /// report it and leave it in place.
    fn expect(&mut self, kinds: &[TokenKind]) -> Result<bool> {
        let current = self.scanner.current()?;
        if kinds.contains(&current.kind) {
            self.scanner.advance()?;
            return Ok(true);
        }
        self.mark(kinds)?;
        Ok(false)
    }

    /// Report the current token unless it is the one reported last.
    fn mark(&mut self, expected: &[TokenKind]) -> Result<()> {
        let found = self.scanner.current()?.clone();
        if self.last_error.as_ref() == Some(&found) {
            debug!(target: "ebnf::parser", at = %found.position, "suppressed repeated diagnostic");
            return Ok(());
        }
        self.last_error = Some(found.clone());

        let diagnostic = Diagnostic::new(found, expected);
        debug!(target: "ebnf::parser", "{}", diagnostic);
        self.reported += 1;
        self.reporter.report(diagnostic)
    }

    fn kind(&mut self) -> Result<TokenKind> {
        Ok(self.scanner.current()?.kind)
    }

    /// Number of diagnostics handed to the reporter so far.
    pub fn diagnostic_count(&self) -> usize {
        self.reported
    }

    /// Release the scanner and everything it owns. Calling this more than
    /// once is fine.
    pub fn close(&mut self) {
        self.scanner.close();
    }

    pub fn into_reporter(mut self) -> R {
        self.close();
        self.reporter
    }
}
