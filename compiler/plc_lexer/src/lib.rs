//! Lexer for PLC using logos.
//!
//! Produces the flat token contract from `plc_ir`: six coarse kinds, raw
//! literal text and a character offset. Keywords come out as identifiers and
//! every piece of punctuation as an operator; the parser matches on text.
//! Escape sequences inside character and string literals are left
//! undecoded.

use logos::Logos;
use plc_ir::{Token, TokenKind};

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\x08]+")]
enum RawToken {
    #[regex(r"[A-Za-z@][A-Za-z0-9_-]*")]
    Identifier,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+")]
    Decimal,

    #[regex(r"'([^'\\\n\r]|\\[^\n\r])'")]
    Character,

    #[regex(r#""([^"\\\n\r]|\\[^\n\r])*""#)]
    String,

    #[token("==")]
    #[token("!=")]
    #[token("&&")]
    #[token("||")]
    #[regex(r#"[^ \t\r\n\x08A-Za-z0-9@'"]"#)]
    Operator,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Identifier => TokenKind::Identifier,
            RawToken::Integer => TokenKind::Integer,
            RawToken::Decimal => TokenKind::Decimal,
            RawToken::Character => TokenKind::Character,
            RawToken::String => TokenKind::String,
            RawToken::Operator => TokenKind::Operator,
        }
    }
}

/// Input that matches no token rule, such as an unterminated literal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct LexError {
    pub message: String,
    pub offset: usize,
}

/// Tokenize a whole source string.
///
/// Offsets count characters, not bytes.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);
    let mut offsets = CharOffsets::new(source);

    while let Some(raw) = lexer.next() {
        let offset = offsets.at(lexer.span().start);
        match raw {
            Ok(raw) => tokens.push(Token::new(raw.into(), lexer.slice(), offset)),
            Err(()) => {
                return Err(LexError {
                    message: format!("unexpected input {:?}", lexer.slice()),
                    offset,
                });
            }
        }
    }

    tracing::debug!(count = tokens.len(), "lexed");
    Ok(tokens)
}

/// Maps increasing byte positions to character offsets in one pass.
struct CharOffsets<'s> {
    source: &'s str,
    byte: usize,
    chars: usize,
}

impl<'s> CharOffsets<'s> {
    fn new(source: &'s str) -> Self {
        CharOffsets {
            source,
            byte: 0,
            chars: 0,
        }
    }

    fn at(&mut self, byte: usize) -> usize {
        if let Some(skipped) = self.source.get(self.byte..byte) {
            self.chars += skipped.chars().count();
            self.byte = byte;
        }
        self.chars
    }
}
