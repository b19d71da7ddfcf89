#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

fn tokens() -> Vec<Token> {
    vec![
        Token::new(TokenKind::Identifier, "LET", 0),
        Token::new(TokenKind::Identifier, "x", 4),
        Token::new(TokenKind::Operator, ";", 5),
    ]
}

#[test]
fn check_by_kind_and_text() {
    let tokens = tokens();
    let cursor = Cursor::new(&tokens);
    assert!(cursor.check("LET"));
    assert!(cursor.check(TokenKind::Identifier));
    assert!(!cursor.check("let"));
    assert!(!cursor.check(TokenKind::Operator));
    assert!(cursor.check_any(&["VAR", "LET"]));
}

#[test]
fn eat_only_consumes_matches() {
    let tokens = tokens();
    let mut cursor = Cursor::new(&tokens);
    assert!(cursor.eat("VAR").is_none());
    assert_eq!(cursor.eat("LET").unwrap().offset, 0);
    assert_eq!(cursor.current().unwrap().literal, "x");
}

#[test]
fn expect_reports_pending_token_offset() {
    let tokens = tokens();
    let mut cursor = Cursor::new(&tokens);
    cursor.advance();
    let err = cursor.expect(";").unwrap_err();
    assert_eq!(err.offset, 4);
    assert_eq!(err.message, "expected ';', found 'x'");
}

#[test]
fn exhausted_stream_reports_end_of_last_token() {
    let tokens = tokens();
    let mut cursor = Cursor::new(&tokens);
    while cursor.advance().is_some() {}
    assert!(cursor.is_at_end());
    let err = cursor.expect(TokenKind::Identifier).unwrap_err();
    assert_eq!(err.offset, 6);
    assert_eq!(err.message, "expected identifier, found end of input");
}

#[test]
fn empty_stream_reports_offset_zero() {
    let cursor = Cursor::new(&[]);
    assert_eq!(cursor.error_offset(), 0);
}
