//! Decoding of literal token text.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use plc_ir::Token;

use crate::ParseError;

pub(crate) fn integer(token: &Token) -> Result<BigInt, ParseError> {
    token
        .literal
        .parse()
        .map_err(|_| ParseError::new(format!("invalid integer literal '{}'", token.literal), token.offset))
}

pub(crate) fn decimal(token: &Token) -> Result<BigDecimal, ParseError> {
    token
        .literal
        .parse()
        .map_err(|_| ParseError::new(format!("invalid decimal literal '{}'", token.literal), token.offset))
}

/// Decode `'c'` into exactly one character.
pub(crate) fn character(token: &Token) -> Result<char, ParseError> {
    let decoded = unescape(token, '\'')?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseError::new(
            format!("character literal {} must hold one character", token.literal),
            token.offset,
        )),
    }
}

pub(crate) fn string(token: &Token) -> Result<String, ParseError> {
    unescape(token, '"')
}

/// Strip the surrounding quotes and replace escape sequences.
fn unescape(token: &Token, quote: char) -> Result<String, ParseError> {
    let body = token
        .literal
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .ok_or_else(|| ParseError::new(format!("malformed literal {}", token.literal), token.offset))?;

    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('b') => '\u{8}',
            Some('\'') => '\'',
            Some('"') => '"',
            Some('\\') => '\\',
            other => {
                let shown = other.map(String::from).unwrap_or_default();
                return Err(ParseError::new(
                    format!("invalid escape sequence '\\{shown}'"),
                    token.offset,
                ));
            }
        };
        decoded.push(escaped);
    }
    Ok(decoded)
}
