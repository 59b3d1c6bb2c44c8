//! Lexer implementation using logos

mod token;

pub use token::Token;

use crate::error::{CompileError, Result};
use crate::position::{SourceMap, Span};
use logos::Logos;

/// Tokenize source code
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(message) => {
                let message = if message.is_empty() {
                    format!("unexpected character: {:?}", lexer.slice())
                } else {
                    message
                };
                let map = SourceMap::new(source);

                return Err(CompileError::syntax(
                    message,
                    map.position(source, span.start),
                ));
            }
        }
    }

    Ok(tokens)
}
