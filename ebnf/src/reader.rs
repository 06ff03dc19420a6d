use tracing::trace;

use crate::error::{Error, Result};
use crate::position::SourcePosition;
use crate::source::CharSource;

/// Reads a character source one character at a time, tracking the logical
/// line and column of the character most recently returned.
///
/// LF, VT, FF, NEL, LINE SEPARATOR, PARAGRAPH SEPARATOR and CR each end a
/// logical line. A CR directly followed by LF ends a single line; the LF is
/// swallowed and the CR is what the caller sees.
#[derive(Debug)]
pub struct Reader<S> {
    source: Option<S>,
    ident: String,
    line: u32,
    column: u32,
    current: Option<char>,
    /// The character just returned ends a logical line, so the next one
    /// starts a new line.
    line_break: bool,
    at_end: bool,
}

impl<S: CharSource> Reader<S> {
    /// Create a reader whose first character lands on line 1, column 1.
    pub fn new(source: S, ident: impl Into<String>) -> Self {
        Self::with_origin(source, ident, 0, 0)
    }

    /// Create a reader counting from an arbitrary origin. The first character
    /// lands on line `line + 1`, column 1.
    pub fn with_origin(source: S, ident: impl Into<String>, line: u32, column: u32) -> Self {
        Reader {
            source: Some(source),
            ident: ident.into(),
            line,
            column,
            current: None,
            line_break: true,
            at_end: false,
        }
    }

    /// Read the next logical character. `Ok(None)` marks the end of input and
    /// is returned again on every later call, leaving the position as is.
    pub fn advance(&mut self) -> Result<Option<char>> {
        let source = self.source.as_mut().ok_or(Error::Closed)?;
        if self.at_end {
            return Ok(None);
        }

        if self.line_break {
            self.column = 0;
            self.line += 1;
            self.line_break = false;
        }
        self.column += 1;

        self.current = source.next_char()?;
        match self.current {
            Some('\n') | Some('\u{0B}') | Some('\u{0C}') | Some('\u{85}') | Some('\u{2028}')
            | Some('\u{2029}') => self.line_break = true,
            Some('\r') => {
                self.line_break = true;
                if source.peek_char()? == Some('\n') {
                    source.next_char()?;
                }
            }
            Some(_) => (),
            None => {
                trace!(target: "ebnf::reader", line = self.line, column = self.column, "end of input");
                self.at_end = true;
            }
        }

        if self.line_break {
            trace!(target: "ebnf::reader", line = self.line, "line break");
        }
        Ok(self.current)
    }

    /// The character returned by the last `advance`.
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Whether the character returned by the last `advance` ends a logical
    /// line.
    pub fn is_line_break(&self) -> bool {
        self.line_break
    }

    /// Position of the character returned by the last `advance`.
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.ident.as_str(), self.line, self.column)
    }

    /// Release the character source. Calling this more than once is fine. A
    /// borrowed (`&mut`) source is handed back to its owner untouched.
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            trace!(target: "ebnf::reader", source = %self.ident, "closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }
}
