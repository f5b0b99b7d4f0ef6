//! Lexer implementation using logos

mod token;

pub use token::Token;

use crate::ast::Span;
use crate::error::{Error, Result};
use logos::Logos;

/// Tokenize source code
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(lex_error(lexer.slice(), span)),
        }
    }

    Ok(tokens)
}

fn lex_error(slice: &str, span: Span) -> Error {
    if slice.starts_with('"') {
        Error::lexer("unterminated string literal", span)
    } else if slice.starts_with(|c: char| c.is_ascii_digit()) {
        Error::lexer(format!("integer literal out of range: {slice}"), span)
    } else {
        Error::lexer(format!("unexpected character: {slice:?}"), span)
    }
}
