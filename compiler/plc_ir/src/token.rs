//! Tokens handed from the lexer to the parser.

use std::fmt;

/// Coarse token classification.
///
/// Keywords are `Identifier` tokens and punctuation is `Operator`; the
/// parser tells them apart by literal text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Identifier,
    Integer,
    Decimal,
    Character,
    String,
    Operator,
}

impl TokenKind {
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer literal",
            TokenKind::Decimal => "decimal literal",
            TokenKind::Character => "character literal",
            TokenKind::String => "string literal",
            TokenKind::Operator => "operator",
        }
    }
}

/// A token with its raw source text and starting character offset.
///
/// Character and string tokens keep their quotes and escapes; decoding is
/// the parser's job.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub offset: usize,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, literal: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            literal: literal.into(),
            offset,
        }
    }

    /// Offset one past the last character of this token.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.literal.chars().count()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.literal, self.offset)
    }
}
