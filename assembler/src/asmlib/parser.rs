//! Line-oriented parser for SIC/XE assembly.
//!
//! A source line has the shape
//!
//! ```text
//! [label] [+]mnemonic [operands] [comment]
//! ```
//!
//! where a label must start in column 1 and anything after the
//! operands is a comment.  A line whose first character is `.` is a
//! comment in its entirety.
use std::num::IntErrorKind;

use tracing::{event, span, Level};

use base::prelude::{Register, Unsigned24Bit, MAX_ADDRESS, MAX_DISPLACEMENT, MAX_WORD};

use super::ast::{Addressing, Code, MemoryOperand, Node, NodeKind, Target, Value};
use super::lexer::{is_symbol_char, Lexer};
use super::mnemonic::{Mnemonic, Mnemonics};
use super::source::{LineAndColumn, START_COL};
use super::symbol::SymbolName;
use super::types::SyntaxError;

#[cfg(test)]
mod tests;

const COMMENT_MARKER: char = '.';

pub(crate) struct Parser<'m, 's> {
    mnemonics: &'m Mnemonics,
    lexer: Lexer<'s>,
    line_start: LineAndColumn,
}

/// Parse a complete program.
///
/// # Errors
///
/// Fails on the first syntax error.  No partial result is returned.
pub fn parse(source: &str, mnemonics: &Mnemonics) -> Result<Code, SyntaxError> {
    let span = span!(Level::DEBUG, "parse", bytes = source.len());
    let _enter = span.enter();
    let result = Parser::new(mnemonics, source).parse_code();
    match &result {
        Ok(code) => {
            event!(Level::DEBUG, "parsed {} records", code.len());
        }
        Err(e) => {
            event!(Level::DEBUG, "parse failed: {e}");
        }
    }
    result
}

fn radix_of_prefix(prefix: char) -> Option<u32> {
    match prefix {
        'b' => Some(2),
        'o' => Some(8),
        'x' => Some(16),
        _ => None,
    }
}

impl<'m, 's> Parser<'m, 's> {
    pub(crate) fn new(mnemonics: &'m Mnemonics, source: &'s str) -> Parser<'m, 's> {
        Parser {
            mnemonics,
            lexer: Lexer::new(source),
            line_start: LineAndColumn::default(),
        }
    }

    fn error_here<S: Into<String>>(&self, msg: S) -> SyntaxError {
        SyntaxError::new(msg, self.lexer.location())
    }

    /// The location of the start of the line being parsed.
    pub(crate) fn line_start(&self) -> LineAndColumn {
        self.line_start
    }

    pub(crate) fn at_end_of_line(&self) -> bool {
        matches!(self.lexer.peek(), None | Some('\n'))
    }

    pub(crate) fn at_digit(&self) -> bool {
        self.lexer.peek().is_some_and(|ch| ch.is_ascii_digit())
    }

    pub(crate) fn parse_label(&mut self) -> Option<SymbolName> {
        if self.lexer.column() == START_COL && self.lexer.peek().is_some_and(char::is_alphabetic) {
            Some(SymbolName::from(self.lexer.read_alphanumeric()))
        } else {
            None
        }
    }

    pub(crate) fn parse_mnemonic(&mut self) -> Result<Mnemonic, SyntaxError> {
        let location = self.lexer.location();
        let extended = self.lexer.advance_if('+');
        let name = self.lexer.read_alphanumeric();
        let spelling: String = if extended {
            format!("+{name}")
        } else {
            name.to_string()
        };
        match self.mnemonics.get(&spelling) {
            Some(mnemonic) => Ok(*mnemonic),
            None => Err(SyntaxError::new(
                format!("Invalid mnemonic '{spelling}'"),
                location,
            )),
        }
    }

    pub(crate) fn parse_symbol(&mut self) -> SymbolName {
        SymbolName::from(self.lexer.read_alphanumeric())
    }

    pub(crate) fn parse_register(&mut self) -> Result<Register, SyntaxError> {
        let location = self.lexer.location();
        match self.lexer.peek() {
            None | Some('\n') => Err(SyntaxError::new(
                "Invalid register: operand is missing",
                location,
            )),
            Some(ch) => {
                self.lexer.advance();
                Register::from_operand_letter(ch).ok_or_else(|| {
                    SyntaxError::new(format!("Invalid register '{ch}'"), location)
                })
            }
        }
    }

    pub(crate) fn parse_comma(&mut self) -> Result<(), SyntaxError> {
        self.lexer.skip_whitespace();
        self.lexer.expect(',')?;
        self.lexer.skip_whitespace();
        Ok(())
    }

    /// Parse an optional `,X` suffix.
    pub(crate) fn parse_indexed(&mut self) -> Result<bool, SyntaxError> {
        self.lexer.skip_whitespace();
        if self.lexer.advance_if(',') {
            self.lexer.skip_whitespace();
            self.lexer.expect('X')?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parse a number in `lo..=hi`.  A `0b`, `0o` or `0x` prefix
    /// selects binary, octal or hexadecimal; otherwise the number is
    /// decimal.
    pub(crate) fn parse_number(&mut self, lo: u32, hi: u32) -> Result<u32, SyntaxError> {
        let location = self.lexer.location();
        let prefixed_radix = match (self.lexer.peek(), self.lexer.peek_at(1)) {
            (Some('0'), Some(prefix)) => radix_of_prefix(prefix),
            _ => None,
        };
        let (digits, radix) = match prefixed_radix {
            Some(radix) => {
                self.lexer.advance();
                self.lexer.advance();
                (self.lexer.read_digits(radix), radix)
            }
            None if self.at_digit() => (self.lexer.read_digits(10), 10),
            None => {
                return Err(SyntaxError::new("Number expected", location));
            }
        };
        if let Some(ch) = self.lexer.peek().filter(|&ch| is_symbol_char(ch)) {
            return Err(self.error_here(format!("Invalid digit '{ch}'")));
        }
        let out_of_range = || {
            SyntaxError::new(
                format!("Number '{digits}' out of range [{lo}..{hi}]"),
                location,
            )
        };
        let n = match u32::from_str_radix(digits, radix) {
            Ok(n) => n,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => {
                    return Err(out_of_range());
                }
                _ => {
                    return Err(SyntaxError::new("Invalid number", location));
                }
            },
        };
        if n < lo || n > hi {
            return Err(SyntaxError::new(
                format!("Number '{n}' out of range [{lo}..{hi}]"),
                location,
            ));
        }
        Ok(n)
    }

    /// Parse a number, a symbol or `*`.
    pub(crate) fn parse_value(&mut self, hi: u32) -> Result<Value, SyntaxError> {
        match self.lexer.peek() {
            Some(ch) if ch.is_ascii_digit() => self.parse_number(0, hi).map(Value::Number),
            Some('*') => {
                self.lexer.advance();
                Ok(Value::Here)
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' => Ok(Value::Symbol(self.parse_symbol())),
            _ => Err(self.error_here("Number or symbol expected")),
        }
    }

    /// Read the body of a quoted literal; the opening quote has
    /// already been consumed.  The closing quote must be on the same
    /// line.
    fn parse_quoted(&mut self) -> Result<&'s str, SyntaxError> {
        let text = self.lexer.read_while(|ch| ch != '\'' && ch != '\n');
        if self.lexer.advance_if('\'') {
            Ok(text)
        } else {
            Err(self.error_here("Unterminated literal"))
        }
    }

    fn decode_hex(text: &str, location: LineAndColumn) -> Result<Vec<u8>, SyntaxError> {
        if let Some((column, ch)) = (location.column..)
            .zip(text.chars())
            .find(|(_, ch)| !ch.is_ascii_hexdigit())
        {
            return Err(SyntaxError::new(
                format!("Invalid hex digit '{ch}' in literal"),
                LineAndColumn::new(location.line, column),
            ));
        }
        if text.len() % 2 != 0 {
            return Err(SyntaxError::new(
                format!("Hex literal '{text}' has an odd number of digits"),
                location,
            ));
        }
        // All characters are ASCII hex digits, so slicing by byte
        // offset is safe.
        (0..text.len())
            .step_by(2)
            .map(|i| {
                u8::from_str_radix(&text[i..i + 2], 16)
                    .map_err(|_| SyntaxError::new("Invalid hex literal", location))
            })
            .collect()
    }

    /// Parse `C'text'`, `X'hex'` or a number.  A number is stored as
    /// a (3-byte) word.
    pub(crate) fn parse_data(&mut self) -> Result<Vec<u8>, SyntaxError> {
        if self.lexer.advance_if('C') {
            self.lexer.expect('\'')?;
            let text = self.parse_quoted()?;
            Ok(text.as_bytes().to_vec())
        } else if self.lexer.advance_if('X') {
            self.lexer.expect('\'')?;
            let location = self.lexer.location();
            let text = self.parse_quoted()?;
            Self::decode_hex(text, location)
        } else if self.at_digit() {
            let n = self.parse_number(0, u32::from(MAX_WORD))?;
            let word = Unsigned24Bit::try_from(n)
                .map_err(|e| self.error_here(format!("Number '{n}' does not fit in a word: {e}")))?;
            Ok(word.to_be_bytes().to_vec())
        } else {
            Err(match self.lexer.peek() {
                None | Some('\n') => self.error_here("Invalid storage specifier: operand is missing"),
                Some(ch) => self.error_here(format!("Invalid storage specifier '{ch}'")),
            })
        }
    }

    /// Parse a number and keep only its least significant byte.
    pub(crate) fn parse_byte(&mut self) -> Result<Vec<u8>, SyntaxError> {
        let n = self.parse_number(0, u32::from(MAX_WORD))?;
        Ok(vec![n.to_le_bytes()[0]])
    }

    /// Parse the operand of a format 3 or format 4 instruction.
    pub(crate) fn parse_memory_operand(
        &mut self,
        extended: bool,
    ) -> Result<MemoryOperand, SyntaxError> {
        let addressing = if self.lexer.advance_if('#') {
            Addressing::Immediate
        } else if self.lexer.advance_if('@') {
            Addressing::Indirect
        } else {
            Addressing::Simple
        };
        let target = if addressing == Addressing::Simple && self.lexer.advance_if('=') {
            Target::Literal(self.parse_data()?)
        } else {
            let hi = match (addressing, extended) {
                (Addressing::Immediate, false) => u32::from(MAX_DISPLACEMENT),
                _ => u32::from(MAX_ADDRESS),
            };
            Target::Value(self.parse_value(hi)?)
        };
        let indexed = self.parse_indexed()?;
        Ok(MemoryOperand {
            addressing,
            target,
            indexed,
            extended,
        })
    }

    /// Parse one source line.  Returns `None` for a blank line.
    pub(crate) fn parse_instruction(&mut self) -> Result<Option<Node>, SyntaxError> {
        self.line_start = self.lexer.location();
        if self.lexer.column() == START_COL && self.lexer.peek() == Some(COMMENT_MARKER) {
            let text = self.lexer.read_to('\n').trim_end();
            return Ok(Some(Node::new(
                self.line_start,
                NodeKind::Comment(text.to_string()),
            )));
        }
        let label = self.parse_label();
        if self.lexer.skip_whitespace() && label.is_none() {
            // Skip the end of the (blank) line.
            self.lexer.advance();
            return Ok(None);
        }
        let mnemonic = self.parse_mnemonic()?;
        self.lexer.skip_whitespace();
        let mut node = mnemonic.parse(self)?;
        node.label = label;
        let comment = self.lexer.read_to('\n').trim();
        if !comment.is_empty() {
            node.comment = Some(comment.to_string());
        }
        event!(Level::TRACE, "{}: {node}", node.location);
        Ok(Some(node))
    }

    pub(crate) fn parse_code(mut self) -> Result<Code, SyntaxError> {
        let mut code = Code::default();
        while !self.lexer.is_at_end() {
            // Resynchronise at the start of a line.
            while !self.lexer.is_at_end() && self.lexer.column() > START_COL {
                self.lexer.read_to('\n');
            }
            if let Some(node) = self.parse_instruction()? {
                code.append(node);
            }
        }
        Ok(code)
    }
}

#[test]
fn test_radix_of_prefix() {
    assert_eq!(radix_of_prefix('b'), Some(2));
    assert_eq!(radix_of_prefix('o'), Some(8));
    assert_eq!(radix_of_prefix('x'), Some(16));
    assert_eq!(radix_of_prefix('X'), None);
}
