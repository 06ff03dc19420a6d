use std::fmt::{self, Display};
use std::io::Write;

use crate::error::Result;
use crate::position::SourcePosition;
use crate::token::{Token, TokenKind};

/// A token that did not belong to the set of kinds acceptable where it was
/// found.
///
/// Lexical problems (unknown characters, unterminated literals) surface the
/// same way: their tokens simply never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub found: Token,
    pub expected: Vec<TokenKind>,
}

impl Diagnostic {
    pub fn new(found: Token, expected: &[TokenKind]) -> Self {
        debug_assert!(!expected.is_empty(), "empty expected set");
        Diagnostic {
            found,
            expected: expected.to_vec(),
        }
    }

    pub fn position(&self) -> &SourcePosition {
        &self.found.position
    }

    pub fn message(&self) -> String {
        format!("expected {}, found {}", ExpectedList(&self.expected), self.found)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.position(), self.message())
    }
}

/// Renders `a`, `a or b`, `a, b or c`.
struct ExpectedList<'a>(&'a [TokenKind]);

impl<'a> Display for ExpectedList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let n = self.0.len();
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                let sep = if i + 1 == n { " or " } else { ", " };
                f.write_str(sep)?;
            }
            write!(f, "{}", kind)?;
        }
        Ok(())
    }
}

/// Receives diagnostics in the order they are discovered.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic) -> Result<()>;
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) -> Result<()> {
        self.push(diagnostic);
        Ok(())
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, diagnostic: Diagnostic) -> Result<()> {
        (**self).report(diagnostic)
    }
}

/// Writes one `source(line, col): message` line per diagnostic.
#[derive(Debug)]
pub struct WriteReporter<W> {
    out: W,
}

impl<W: Write> WriteReporter<W> {
    pub fn new(out: W) -> Self {
        WriteReporter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for WriteReporter<W> {
    fn report(&mut self, diagnostic: Diagnostic) -> Result<()> {
        writeln!(self.out, "{}", diagnostic)?;
        Ok(())
    }
}
