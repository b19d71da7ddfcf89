//! Recursive-descent parser for PLC.
//!
//! Turns a token slice into a [`Source`] tree, or reports the first syntax
//! error with the offset of the offending token. There is no recovery:
//! parsing stops at the first error.
//!
//! ```text
//! source   ::= global* function*
//! global   ::= (list | mutable | immutable) ';'
//! function ::= 'FUN' identifier '(' params? ')' (':' identifier)? 'DO' block 'END'
//! ```

mod cursor;
mod error;
mod grammar;
mod literal;

pub use cursor::{Cursor, Pattern};
pub use error::ParseError;

use plc_ir::ast::Source;
use plc_ir::{Token, TokenKind};

/// Parse a complete token stream.
pub fn parse(tokens: &[Token]) -> Result<Source, ParseError> {
    Parser::new(tokens).parse_source()
}

pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// `source ::= global* function*`, which must consume every token.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_source(&mut self) -> Result<Source, ParseError> {
        let mut source = Source::default();
        while self.cursor.check_any(&["LIST", "VAR", "VAL"]) {
            source.globals.push(self.parse_global()?);
        }
        while self.check("FUN") {
            source.functions.push(self.parse_function()?);
        }
        if let Some(token) = self.cursor.current() {
            return Err(ParseError::new(
                format!("expected global or function, found '{}'", token.literal),
                token.offset,
            ));
        }

        tracing::debug!(
            globals = source.globals.len(),
            functions = source.functions.len(),
            "parsed source"
        );
        Ok(source)
    }

    // Cursor delegation

    #[inline]
    fn check<'p>(&self, pattern: impl Into<Pattern<'p>>) -> bool {
        self.cursor.check(pattern)
    }

    #[inline]
    fn eat<'p>(&mut self, pattern: impl Into<Pattern<'p>>) -> bool {
        self.cursor.eat(pattern).is_some()
    }

    #[inline]
    fn expect<'p>(&mut self, pattern: impl Into<Pattern<'p>>) -> Result<&'a Token, ParseError> {
        self.cursor.expect(pattern)
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        self.expect(TokenKind::Identifier)
            .map(|token| token.literal.clone())
    }
}

#[cfg(test)]
mod tests;
