//! Token definitions

use crate::unicode::decode_escapes;
use logos::{Lexer, Logos};
use serde::Serialize;

/// Plorth token
///
/// Anything that is not whitespace, a comment, grouping punctuation or a
/// string literal is a word token; the compiler decides whether a word is
/// a number literal or a symbol.
#[derive(Logos, Debug, Clone, PartialEq, Serialize)]
#[logos(error = String)]
#[logos(skip r"\s+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,

    /// Double-quoted string literal, escapes decoded
    #[regex(r#""(?s:[^"\\]|\\.)*""#, decode_string)]
    String(String),

    /// Any other run of non-reserved characters
    #[regex(r##"[^\s()\[\]{},:;"#]+"##, |lex| lex.slice().to_string())]
    Word(String),
}

fn decode_string(lex: &mut Lexer<Token>) -> Result<String, String> {
    let slice = lex.slice();

    decode_escapes(&slice[1..slice.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|t| t.unwrap()).collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            lex("( ) [ ] { } , : ;"),
            vec![
                Token::LeftParen,
                Token::RightParen,
                Token::LeftBracket,
                Token::RightBracket,
                Token::LeftBrace,
                Token::RightBrace,
                Token::Comma,
                Token::Colon,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_words() {
        assert_eq!(
            lex("dup 2dup >number -5 +"),
            vec![
                Token::Word("dup".into()),
                Token::Word("2dup".into()),
                Token::Word(">number".into()),
                Token::Word("-5".into()),
                Token::Word("+".into()),
            ]
        );
    }

    #[test]
    fn test_punctuation_splits_words() {
        assert_eq!(
            lex("1,2"),
            vec![
                Token::Word("1".into()),
                Token::Comma,
                Token::Word("2".into()),
            ]
        );
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(lex(r#""hello""#), vec![Token::String("hello".into())]);
        assert_eq!(
            lex(r#""tab\there""#),
            vec![Token::String("tab\there".into())]
        );
    }

    #[test]
    fn test_string_unicode_escape() {
        assert_eq!(lex(r#""ä""#), vec![Token::String("ä".into())]);
    }

    #[test]
    fn test_comment_skipped() {
        assert_eq!(
            lex("dup # this is a comment\nswap"),
            vec![Token::Word("dup".into()), Token::Word("swap".into())]
        );
    }

    #[test]
    fn test_invalid_escape_is_error() {
        let mut lexer = Token::lexer(r#""\q""#);
        assert!(lexer.next().unwrap().is_err());
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let mut lexer = Token::lexer(r#""abc"#);
        assert!(lexer.next().unwrap().is_err());
    }
}
