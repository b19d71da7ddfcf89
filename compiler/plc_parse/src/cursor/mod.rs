//! Token cursor for navigating the token stream.
//!
//! Tokens are matched either by kind or by exact literal text; keywords
//! and punctuation only exist as text.

use plc_ir::{Token, TokenKind};
use tracing::trace;

use crate::ParseError;

/// What a token is checked against.
#[derive(Copy, Clone, Debug)]
pub enum Pattern<'p> {
    Kind(TokenKind),
    Text(&'p str),
}

impl Pattern<'_> {
    #[inline]
    pub fn matches(self, token: &Token) -> bool {
        match self {
            Pattern::Kind(kind) => token.kind == kind,
            Pattern::Text(text) => token.literal == text,
        }
    }

    fn describe(self) -> String {
        match self {
            Pattern::Kind(kind) => kind.display_name().to_string(),
            Pattern::Text(text) => format!("'{text}'"),
        }
    }
}

impl From<TokenKind> for Pattern<'_> {
    fn from(kind: TokenKind) -> Self {
        Pattern::Kind(kind)
    }
}

impl<'p> From<&'p str> for Pattern<'p> {
    fn from(text: &'p str) -> Self {
        Pattern::Text(text)
    }
}

pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The next pending token, if any.
    #[inline]
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn check<'p>(&self, pattern: impl Into<Pattern<'p>>) -> bool {
        let pattern = pattern.into();
        self.current().is_some_and(|token| pattern.matches(token))
    }

    /// True if the current token matches any of `texts`.
    pub fn check_any(&self, texts: &[&str]) -> bool {
        texts.iter().any(|text| self.check(*text))
    }

    /// Consume and return the current token.
    ///
    /// Returns `None` at end of stream without moving.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        trace!(
            pos = self.pos,
            kind = token.kind.display_name(),
            literal = %token.literal,
            offset = token.offset,
            "advance"
        );
        self.pos += 1;
        Some(token)
    }

    /// Consume the current token if it matches.
    pub fn eat<'p>(&mut self, pattern: impl Into<Pattern<'p>>) -> Option<&'a Token> {
        if self.check(pattern) {
            self.advance()
        } else {
            None
        }
    }

    /// Consume a matching token or fail with `expected <pattern>`.
    pub fn expect<'p>(&mut self, pattern: impl Into<Pattern<'p>>) -> Result<&'a Token, ParseError> {
        let pattern = pattern.into();
        match self.eat(pattern) {
            Some(token) => Ok(token),
            None => Err(self.make_expect_error(pattern)),
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, pattern: Pattern<'_>) -> ParseError {
        let found = match self.current() {
            Some(token) => format!("'{}'", token.literal),
            None => "end of input".to_string(),
        };
        self.error(format!("expected {}, found {found}", pattern.describe()))
    }

    /// Where an error at the current position is reported.
    ///
    /// The pending token's offset, or just past the last token once the
    /// stream is exhausted.
    pub fn error_offset(&self) -> usize {
        match self.current() {
            Some(token) => token.offset,
            None => self.tokens.last().map_or(0, Token::end),
        }
    }

    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.error_offset())
    }
}

#[cfg(test)]
mod tests;
