use std::io::BufRead;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::Result;

/// A pull-based stream of characters with one character of lookahead.
///
/// `Ok(None)` marks the end of input. Implementations must keep returning
/// `Ok(None)` once the end has been reached.
pub trait CharSource {
    /// Consume and return the next character.
    fn next_char(&mut self) -> Result<Option<char>>;

    /// Return the next character without consuming it.
    fn peek_char(&mut self) -> Result<Option<char>>;
}

/// Lending a source to a reader leaves it open for the caller once the reader
/// is done with it.
impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> Result<Option<char>> {
        (**self).next_char()
    }

    fn peek_char(&mut self) -> Result<Option<char>> {
        (**self).peek_char()
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn next_char(&mut self) -> Result<Option<char>> {
        (**self).next_char()
    }

    fn peek_char(&mut self) -> Result<Option<char>> {
        (**self).peek_char()
    }
}

/// Characters of an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> StrSource<'a> {
    pub fn new(input: &'a str) -> Self {
        StrSource {
            chars: input.chars().peekable(),
        }
    }
}

impl<'a> CharSource for StrSource<'a> {
    fn next_char(&mut self) -> Result<Option<char>> {
        Ok(self.chars.next())
    }

    fn peek_char(&mut self) -> Result<Option<char>> {
        Ok(self.chars.peek().copied())
    }
}

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// UTF-8 text decoded from a buffered byte reader, one line chunk at a time.
///
/// A byte order mark at the very start is skipped. Invalid UTF-8 is reported
/// as an i/o error of kind `InvalidData`.
#[derive(Debug)]
pub struct StreamSource<R> {
    reader: R,
    chunk: String,
    idx: usize,
    started: bool,
    exhausted: bool,
}

impl<R: BufRead> StreamSource<R> {
    pub fn new(reader: R) -> Self {
        StreamSource {
            reader,
            chunk: String::new(),
            idx: 0,
            started: false,
            exhausted: false,
        }
    }

    /// Make sure the chunk holds at least one unread character unless the
    /// underlying reader is exhausted.
    fn fill(&mut self) -> Result<()> {
        while !self.exhausted && self.idx >= self.chunk.len() {
            self.chunk.clear();
            self.idx = 0;
            if self.reader.read_line(&mut self.chunk)? == 0 {
                self.exhausted = true;
            } else if !self.started && self.chunk.starts_with(BYTE_ORDER_MARK) {
                self.idx = BYTE_ORDER_MARK.len_utf8();
            }
            self.started = true;
        }
        Ok(())
    }
}

impl<R: BufRead> CharSource for StreamSource<R> {
    fn next_char(&mut self) -> Result<Option<char>> {
        let next = self.peek_char()?;
        if let Some(c) = next {
            self.idx += c.len_utf8();
        }
        Ok(next)
    }

    fn peek_char(&mut self) -> Result<Option<char>> {
        self.fill()?;
        Ok(self.chunk[self.idx..].chars().next())
    }
}
