//! A character-level cursor over assembly source.
//!
//! SIC/XE assembly is line-oriented and column-sensitive (labels must
//! start in column 1), so instead of producing a token stream the
//! lexer exposes primitives which the parser drives one character
//! at a time.  The cursor always knows the line and column of the
//! next character.
use super::source::{LineAndColumn, START_COL, START_LINE};
use super::types::SyntaxError;


/// Horizontal whitespace.  A carriage return counts, so that text
/// with CRLF line endings lexes the same way as text without.
fn is_blank(ch: char) -> bool {
    ch != '\n' && ch.is_whitespace()
}

pub(crate) fn is_symbol_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[derive(Debug, Clone)]
pub(crate) struct Lexer<'s> {
    body: &'s str,
    /// Byte offset of the next character.
    pos: usize,
    line: u32,
    column: u32,
}

impl<'s> Lexer<'s> {
    pub(crate) fn new(body: &'s str) -> Lexer<'s> {
        Lexer {
            body,
            pos: 0,
            line: START_LINE,
            column: START_COL,
        }
    }

    pub(crate) fn location(&self) -> LineAndColumn {
        LineAndColumn {
            line: self.line,
            column: self.column,
        }
    }

    pub(crate) fn column(&self) -> u32 {
        self.column
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.body.len()
    }

    fn rest(&self) -> &'s str {
        &self.body[self.pos..]
    }

    /// Returns the next character without consuming it, or `None` at
    /// the end of the input.
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the character `offset` places beyond the next one.
    pub(crate) fn peek_at(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = START_COL;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume the next character, which must be `expected`.
    pub(crate) fn expect(&mut self, expected: char) -> Result<(), SyntaxError> {
        let location = self.location();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some('\n') => Err(SyntaxError::new(
                format!("Expected '{expected}' but reached end of line"),
                location,
            )),
            Some(ch) => Err(SyntaxError::new(
                format!("Expected '{expected}' but found '{ch}'"),
                location,
            )),
            None => Err(SyntaxError::new(
                format!("Expected '{expected}' but reached end of input"),
                location,
            )),
        }
    }

    /// Consume the next character only if it is `ch`.
    pub(crate) fn advance_if(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip horizontal whitespace.  Returns true when nothing else
    /// remains on the current line.
    pub(crate) fn skip_whitespace(&mut self) -> bool {
        self.read_while(is_blank);
        matches!(self.peek(), None | Some('\n'))
    }

    pub(crate) fn read_while<P>(&mut self, pred: P) -> &'s str
    where
        P: Fn(char) -> bool,
    {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
        &self.body[start..self.pos]
    }

    pub(crate) fn read_alphanumeric(&mut self) -> &'s str {
        self.read_while(is_symbol_char)
    }

    pub(crate) fn read_digits(&mut self, radix: u32) -> &'s str {
        self.read_while(|ch| ch.is_digit(radix))
    }

    /// Read everything up to the next `delimiter` (or the end of the
    /// input).  The delimiter itself is consumed but is not part of
    /// the result.
    pub(crate) fn read_to(&mut self, delimiter: char) -> &'s str {
        let text = self.read_while(|ch| ch != delimiter);
        self.advance_if(delimiter);
        text
    }
}
