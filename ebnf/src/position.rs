use std::fmt::{self, Display};

/// A logical location within a source text.
///
/// Lines and columns are 1-based once the first character has been read. Any
/// recognized line terminator (CRLF counted once) starts a new line and resets
/// the column to 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub source: String,
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub fn new(source: impl Into<String>, line: u32, column: u32) -> Self {
        SourcePosition {
            source: source.into(),
            line,
            column,
        }
    }
}

impl Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({}, {})", self.source, self.line, self.column)
    }
}
