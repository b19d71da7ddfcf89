//! Parse errors.

/// The first syntax error in a token stream.
///
/// `offset` is the character offset of the token the parser was looking at, or
/// the end of the last token when the stream ran out.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        ParseError {
            message: message.into(),
            offset,
        }
    }
}
