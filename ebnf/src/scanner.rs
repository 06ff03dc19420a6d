use tracing::trace;

use crate::error::{Error, Result};
use crate::position::SourcePosition;
use crate::reader::Reader;
use crate::source::CharSource;
use crate::token::{Token, TokenKind};

/// Turns the characters of a `Reader` into tokens, holding exactly one token
/// of lookahead.
///
/// Once `EndOfInput` has been produced the scanner is terminal: `advance` no
/// longer does anything and `current` keeps returning that token.
#[derive(Debug)]
pub struct Scanner<S> {
    reader: Reader<S>,
    /// Text of the token being lexed, reused across tokens.
    buf: String,
    current: Option<Token>,
    /// Set once the iterator has handed out `EndOfInput` or an error.
    drained: bool,
}

impl<S: CharSource> Scanner<S> {
    pub fn new(reader: Reader<S>) -> Self {
        Scanner {
            reader,
            buf: String::new(),
            current: None,
            drained: false,
        }
    }

    /// The lookahead token. The first call reads the first character and lexes
    /// the first token.
    pub fn current(&mut self) -> Result<&Token> {
        if self.current.is_none() {
            self.advance()?;
        }
        self.current.as_ref().ok_or(Error::Closed)
    }

    /// Drop the lookahead token and lex the next one.
    pub fn advance(&mut self) -> Result<()> {
        if self.reader.is_closed() {
            return Err(Error::Closed);
        }
        match &self.current {
            None => {
                self.reader.advance()?;
            }
            Some(tok) if tok.kind == TokenKind::EndOfInput => return Ok(()),
            Some(_) => (),
        }

        self.buf.clear();
        self.skip_trivia()?;

        let position = self.reader.position();
        let token = match self.reader.current() {
            None => Token::new(position, TokenKind::EndOfInput, ""),
            Some(c) if is_letter(c) => self.identifier(c, position)?,
            Some(c) if is_quote(c) => self.literal(c, position)?,
            Some(c) => {
                let kind = TokenKind::from_punctuation(c).unwrap_or(TokenKind::Unknown);
                self.reader.advance()?;
                Token::new(position, kind, c.to_string())
            }
        };

        trace!(target: "ebnf::scanner", kind = ?token.kind, text = %token.text, at = %token.position, "token");
        self.current = Some(token);
        Ok(())
    }

    /// Skip blanks, line terminators and `#` comments. A comment runs up to,
    /// not including, the end of its line.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.reader.current() {
                Some('#') => {
                    while self.reader.current().is_some() && !self.reader.is_line_break() {
                        self.reader.advance()?;
                    }
                }
                Some(c) if is_whitespace(c) || self.reader.is_line_break() => {
                    self.reader.advance()?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn identifier(&mut self, first: char, position: SourcePosition) -> Result<Token> {
        self.buf.push(first);
        while let Some(c) = self.reader.advance()? {
            if !is_letter(c) && !c.is_ascii_digit() {
                break;
            }
            self.buf.push(c);
        }
        Ok(Token::new(position, TokenKind::Identifier, self.buf.as_str()))
    }

    /// Lex a quoted literal. The text keeps both quotes. Without a closing
    /// quote before the end of the line or input, the token is an
    /// `UnterminatedLiteral` holding everything read so far.
    fn literal(&mut self, quote: char, position: SourcePosition) -> Result<Token> {
        self.buf.push(quote);
        loop {
            match self.reader.advance()? {
                Some(c) if c == quote => {
                    self.buf.push(c);
                    self.reader.advance()?;
                    return Ok(Token::new(position, TokenKind::Literal, self.buf.as_str()));
                }
                Some(_) if self.reader.is_line_break() => break,
                Some(c) => self.buf.push(c),
                None => break,
            }
        }
        Ok(Token::new(
            position,
            TokenKind::UnterminatedLiteral,
            self.buf.as_str(),
        ))
    }

    /// Release the reader (and with it an owned source) and the scratch
    /// buffer. Calling this more than once is fine.
    pub fn close(&mut self) {
        self.reader.close();
        self.buf = String::new();
    }
}

/// Yields every token up to and including `EndOfInput`.
impl<S: CharSource> Iterator for Scanner<S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.drained {
            return None;
        }
        let current = self.current().map(Token::clone);
        let token = match current {
            Ok(token) => token,
            Err(e) => {
                self.drained = true;
                return Some(Err(e));
            }
        };
        if token.kind == TokenKind::EndOfInput {
            self.drained = true;
        } else if let Err(e) = self.advance() {
            self.drained = true;
            return Some(Err(e));
        }
        Some(Ok(token))
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Space, tab, and anything above ASCII in the Unicode space separator (Zs)
/// category.
fn is_whitespace(c: char) -> bool {
    match c {
        ' ' | '\t' => true,
        '\u{A0}' | '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => {
            true
        }
        _ => false,
    }
}
