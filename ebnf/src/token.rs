use std::fmt::{self, Display};

use crate::position::SourcePosition;

/// The closed set of token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndOfInput,
    /// A character outside every recognized class.
    Unknown,
    /// A quoted literal cut off by the end of its line or of the input.
    UnterminatedLiteral,
    Period,
    Bar,
    Assign,
    OpenParen,
    OpenBracket,
    OpenCurly,
    CloseParen,
    CloseBracket,
    CloseCurly,
    Identifier,
    Literal,
}

impl TokenKind {
    /// Maps the single-character punctuation of the grammar language to its
    /// kind.
    pub fn from_punctuation(c: char) -> Option<TokenKind> {
        let kind = match c {
            '.' => TokenKind::Period,
            '|' => TokenKind::Bar,
            '=' => TokenKind::Assign,
            '(' => TokenKind::OpenParen,
            '[' => TokenKind::OpenBracket,
            '{' => TokenKind::OpenCurly,
            ')' => TokenKind::CloseParen,
            ']' => TokenKind::CloseBracket,
            '}' => TokenKind::CloseCurly,
            _ => return None,
        };
        Some(kind)
    }

    /// The kind closing a group opened by `self`, if `self` opens one.
    pub fn closing(self) -> Option<TokenKind> {
        match self {
            TokenKind::OpenParen => Some(TokenKind::CloseParen),
            TokenKind::OpenBracket => Some(TokenKind::CloseBracket),
            TokenKind::OpenCurly => Some(TokenKind::CloseCurly),
            TokenKind::EndOfInput
            | TokenKind::Unknown
            | TokenKind::UnterminatedLiteral
            | TokenKind::Period
            | TokenKind::Bar
            | TokenKind::Assign
            | TokenKind::CloseParen
            | TokenKind::CloseBracket
            | TokenKind::CloseCurly
            | TokenKind::Identifier
            | TokenKind::Literal => None,
        }
    }

    /// Source spelling of punctuation kinds.
    pub fn punctuation(self) -> Option<char> {
        match self {
            TokenKind::Period => Some('.'),
            TokenKind::Bar => Some('|'),
            TokenKind::Assign => Some('='),
            TokenKind::OpenParen => Some('('),
            TokenKind::OpenBracket => Some('['),
            TokenKind::OpenCurly => Some('{'),
            TokenKind::CloseParen => Some(')'),
            TokenKind::CloseBracket => Some(']'),
            TokenKind::CloseCurly => Some('}'),
            TokenKind::EndOfInput
            | TokenKind::Unknown
            | TokenKind::UnterminatedLiteral
            | TokenKind::Identifier
            | TokenKind::Literal => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TokenKind::EndOfInput => "end of input",
            TokenKind::Unknown => "unknown character",
            TokenKind::UnterminatedLiteral => "unterminated literal",
            TokenKind::Period => "'.'",
            TokenKind::Bar => "'|'",
            TokenKind::Assign => "'='",
            TokenKind::OpenParen => "'('",
            TokenKind::OpenBracket => "'['",
            TokenKind::OpenCurly => "'{'",
            TokenKind::CloseParen => "')'",
            TokenKind::CloseBracket => "']'",
            TokenKind::CloseCurly => "'}'",
            TokenKind::Identifier => "identifier",
            TokenKind::Literal => "literal",
        };
        f.write_str(s)
    }
}

/// A lexical unit with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub position: SourcePosition,
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(position: SourcePosition, kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            position,
            kind,
            text: text.into(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::Unknown => write!(f, "unknown character '{}'", self.text),
            TokenKind::UnterminatedLiteral => write!(f, "unterminated literal {}", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Literal => write!(f, "literal {}", self.text),
            TokenKind::Period
            | TokenKind::Bar
            | TokenKind::Assign
            | TokenKind::OpenParen
            | TokenKind::OpenBracket
            | TokenKind::OpenCurly
            | TokenKind::CloseParen
            | TokenKind::CloseBracket
            | TokenKind::CloseCurly => write!(f, "'{}'", self.text),
        }
    }
}
