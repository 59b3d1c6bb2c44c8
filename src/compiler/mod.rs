//! Source-to-quote compiler
//!
//! Turns a Unicode source string into a single compiled quote whose
//! elements are runtime values. Word tokens that conform to number syntax
//! become number literals; every other word token becomes a symbol
//! carrying its source position. The first syntax error wins.

use crate::error::{CompileError, Result};
use crate::lexer::{tokenize, Token};
use crate::position::{Position, SourceMap, Span};
use crate::value::{Number, Quote, Str, Symbol, Value, ValueRef, Word};
use std::collections::HashMap;
use std::rc::Rc;

/// Compiles source code into a quote.
pub fn compile(source: &str) -> Result<Rc<Quote>> {
    let tokens = tokenize(source)?;
    let mut compiler = Compiler {
        source,
        map: SourceMap::new(source),
        tokens,
        index: 0,
    };
    let elements = compiler.compile_program()?;

    Ok(Rc::new(Quote::Compiled(elements)))
}

struct Compiler<'a> {
    source: &'a str,
    map: SourceMap,
    tokens: Vec<(Token, Span)>,
    index: usize,
}

impl Compiler<'_> {
    fn compile_program(&mut self) -> Result<Vec<ValueRef>> {
        let mut elements = Vec::new();

        while self.index < self.tokens.len() {
            elements.push(self.compile_element()?);
        }

        Ok(elements)
    }

    /// One element of a quote body: a value, or a `: name … ;` word
    /// declaration.
    fn compile_element(&mut self) -> Result<ValueRef> {
        if matches!(self.peek(), Some(Token::Colon)) {
            self.advance();
            return self.compile_declaration();
        }

        self.compile_value()
    }

    /// A single value: string, number, symbol, array, object or quote.
    fn compile_value(&mut self) -> Result<ValueRef> {
        let (token, span) = match self.tokens.get(self.index) {
            Some(entry) => entry.clone(),
            None => {
                return Err(CompileError::syntax(
                    "unexpected end of input",
                    self.end_position(),
                ))
            }
        };

        self.advance();
        match token {
            Token::String(text) => Ok(Some(Value::String(Rc::new(Str::from(text.as_str()))))),
            Token::Word(text) => {
                if Number::is_valid(&text) {
                    match Number::parse(&text) {
                        Some(number) => Ok(Some(Value::Number(number))),
                        None => Err(CompileError::syntax(
                            format!("malformed number literal `{text}'"),
                            self.position_at(span),
                        )),
                    }
                } else {
                    Ok(Some(Value::Symbol(Rc::new(Symbol::new(
                        text,
                        Some(self.position_at(span)),
                    )))))
                }
            }
            Token::LeftBracket => self.compile_array(),
            Token::LeftBrace => self.compile_object(),
            Token::LeftParen => self.compile_quote(),
            token => Err(CompileError::syntax(
                format!("unexpected {}", describe(&token)),
                self.position_at(span),
            )),
        }
    }

    /// `[ v1 , v2 , … ]` — commas are optional separators and a trailing
    /// comma is tolerated.
    fn compile_array(&mut self) -> Result<ValueRef> {
        let mut elements = Vec::new();

        loop {
            match self.peek() {
                Some(Token::RightBracket) => {
                    self.advance();
                    return Ok(Some(Value::Array(elements.into())));
                }
                Some(_) => {
                    elements.push(self.compile_value()?);
                    if matches!(self.peek(), Some(Token::Comma)) {
                        self.advance();
                    }
                }
                None => {
                    return Err(CompileError::syntax(
                        "unterminated array literal: missing `]'",
                        self.end_position(),
                    ))
                }
            }
        }
    }

    /// `{ "key" : value , … }` — keys must be string literals.
    fn compile_object(&mut self) -> Result<ValueRef> {
        let mut properties = HashMap::new();

        loop {
            let (token, span) = match self.tokens.get(self.index) {
                Some(entry) => entry.clone(),
                None => {
                    return Err(CompileError::syntax(
                        "unterminated object literal: missing `}'",
                        self.end_position(),
                    ))
                }
            };

            match token {
                Token::RightBrace => {
                    self.advance();
                    return Ok(Some(Value::Object(Rc::new(crate::value::Object::new(
                        properties,
                    )))));
                }
                Token::String(key) => {
                    self.advance();
                    if !matches!(self.peek(), Some(Token::Colon)) {
                        return Err(CompileError::syntax(
                            "missing `:' after object key",
                            self.current_position(),
                        ));
                    }
                    self.advance();

                    let value = self.compile_value()?;

                    properties.insert(key, value);
                    if matches!(self.peek(), Some(Token::Comma)) {
                        self.advance();
                    }
                }
                token => {
                    return Err(CompileError::syntax(
                        format!("object key must be a string literal, not {}", describe(&token)),
                        self.position_at(span),
                    ))
                }
            }
        }
    }

    /// `( elem elem … )`
    fn compile_quote(&mut self) -> Result<ValueRef> {
        let mut elements = Vec::new();

        loop {
            match self.peek() {
                Some(Token::RightParen) => {
                    self.advance();
                    return Ok(Some(Value::Quote(Rc::new(Quote::Compiled(elements)))));
                }
                Some(_) => elements.push(self.compile_element()?),
                None => {
                    return Err(CompileError::syntax(
                        "unterminated quote: missing `)'",
                        self.end_position(),
                    ))
                }
            }
        }
    }

    /// `: name body… ;` — produces a word value. A body consisting of a
    /// single quote literal is taken as the word's quote directly, so
    /// `: square ( dup * ) ;` and `: square dup * ;` define the same
    /// word.
    fn compile_declaration(&mut self) -> Result<ValueRef> {
        let (name, span) = match self.tokens.get(self.index) {
            Some((Token::Word(name), span)) => (name.clone(), *span),
            Some((token, span)) => {
                return Err(CompileError::syntax(
                    format!("expected word name after `:', not {}", describe(token)),
                    self.position_at(*span),
                ))
            }
            None => {
                return Err(CompileError::syntax(
                    "expected word name after `:'",
                    self.end_position(),
                ))
            }
        };

        self.advance();

        let mut body = Vec::new();

        loop {
            match self.peek() {
                Some(Token::Semicolon) => {
                    self.advance();
                    break;
                }
                Some(_) => body.push(self.compile_element()?),
                None => {
                    return Err(CompileError::syntax(
                        format!("unterminated word declaration `{name}': missing `;'"),
                        self.end_position(),
                    ))
                }
            }
        }

        let quote = match body.as_slice() {
            [Some(Value::Quote(quote))] => Rc::clone(quote),
            _ => Rc::new(Quote::Compiled(body)),
        };
        let symbol = Rc::new(Symbol::new(name, Some(self.position_at(span))));

        Ok(Some(Value::Word(Rc::new(Word::new(symbol, quote)))))
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|(token, _)| token)
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn position_at(&self, span: Span) -> Position {
        self.map.position(self.source, span.start)
    }

    fn current_position(&self) -> Position {
        match self.tokens.get(self.index) {
            Some((_, span)) => self.position_at(*span),
            None => self.end_position(),
        }
    }

    fn end_position(&self) -> Position {
        self.map.position(self.source, self.source.len())
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::LeftParen => "`('".into(),
        Token::RightParen => "`)'".into(),
        Token::LeftBracket => "`['".into(),
        Token::RightBracket => "`]'".into(),
        Token::LeftBrace => "`{'".into(),
        Token::RightBrace => "`}'".into(),
        Token::Comma => "`,'".into(),
        Token::Colon => "`:'".into(),
        Token::Semicolon => "`;'".into(),
        Token::String(_) => "string literal".into(),
        Token::Word(word) => format!("`{word}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    fn elements(source: &str) -> Vec<ValueRef> {
        match compile(source).unwrap().elements() {
            Some(elements) => elements.to_vec(),
            None => unreachable!(),
        }
    }

    #[test]
    fn test_empty_source() {
        assert!(elements("").is_empty());
        assert!(elements("# comment only").is_empty());
    }

    #[test]
    fn test_number_classification() {
        let compiled = elements("1 -2.5 1e3");
        assert!(matches!(
            compiled[0],
            Some(Value::Number(Number::Int(1)))
        ));
        assert!(matches!(
            compiled[1],
            Some(Value::Number(Number::Real(v))) if v == -2.5
        ));
        assert!(matches!(
            compiled[2],
            Some(Value::Number(Number::Real(v))) if v == 1000.0
        ));
    }

    #[test]
    fn test_symbols_keep_positions() {
        let compiled = elements("dup\n  swap");
        match &compiled[1] {
            Some(Value::Symbol(symbol)) => {
                assert_eq!(symbol.id(), "swap");
                let position = symbol.position().unwrap();
                assert_eq!((position.line, position.column), (2, 3));
            }
            other => panic!("expected symbol, got {other:?}"),
        }
    }

    #[test]
    fn test_reserved_names_stay_symbols() {
        for source in ["true", "false", "null", "drop"] {
            let compiled = elements(source);
            assert_eq!(ValueType::of(&compiled[0]), ValueType::Symbol);
        }
    }

    #[test]
    fn test_string_literal() {
        let compiled = elements(r#""hello\nworld""#);
        match &compiled[0] {
            Some(Value::String(s)) => assert_eq!(s.to_string(), "hello\nworld"),
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_array_and_object() {
        let compiled = elements("[ ] { }");
        assert!(matches!(&compiled[0], Some(Value::Array(a)) if a.is_empty()));
        assert!(matches!(&compiled[1], Some(Value::Object(o)) if o.is_empty()));
    }

    #[test]
    fn test_array_with_and_without_commas() {
        for source in ["[1, 2, 3]", "[ 1 2 3 ]", "[1, 2, 3,]"] {
            let compiled = elements(source);
            match &compiled[0] {
                Some(Value::Array(a)) => assert_eq!(a.len(), 3, "{source}"),
                other => panic!("expected array, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_nested_array() {
        let compiled = elements("[[1], []]");
        match &compiled[0] {
            Some(Value::Array(a)) => {
                assert_eq!(a.len(), 2);
                assert!(matches!(&a[0], Some(Value::Array(inner)) if inner.len() == 1));
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_object_literal() {
        let compiled = elements(r#"{ "name": "plorth", "stars": 1 }"#);
        match &compiled[0] {
            Some(Value::Object(object)) => {
                assert_eq!(object.len(), 2);
                assert!(matches!(
                    object.own_property("stars"),
                    Some(Some(Value::Number(Number::Int(1))))
                ));
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_object_key_must_be_string() {
        let err = compile("{ name: 1 }").unwrap_err();
        assert!(err.message().contains("string literal"));
    }

    #[test]
    fn test_quote_literal() {
        let compiled = elements("( dup * )");
        match &compiled[0] {
            Some(Value::Quote(quote)) => assert_eq!(quote.elements().unwrap().len(), 2),
            other => panic!("expected quote, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_quote() {
        let compiled = elements("( )");
        assert!(matches!(
            &compiled[0],
            Some(Value::Quote(q)) if q.elements().unwrap().is_empty()
        ));
    }

    #[test]
    fn test_word_declaration() {
        let compiled = elements(": square dup * ;");
        match &compiled[0] {
            Some(Value::Word(word)) => {
                assert_eq!(word.symbol().id(), "square");
                assert_eq!(word.quote().elements().unwrap().len(), 2);
            }
            other => panic!("expected word, got {other:?}"),
        }
    }

    #[test]
    fn test_word_declaration_unwraps_single_quote_body() {
        let compiled = elements(": square ( dup * ) ;");
        match &compiled[0] {
            Some(Value::Word(word)) => {
                // The quote literal is the word's quote, not wrapped again
                assert_eq!(word.quote().elements().unwrap().len(), 2);
            }
            other => panic!("expected word, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_quote() {
        let err = compile("( dup").unwrap_err();
        assert!(err.message().contains("missing `)'"));
    }

    #[test]
    fn test_unterminated_declaration() {
        let err = compile(": square dup *").unwrap_err();
        assert!(err.message().contains("missing `;'"));
    }

    #[test]
    fn test_stray_terminator() {
        assert!(compile(")").is_err());
        assert!(compile(";").is_err());
        assert!(compile("]").is_err());
    }

    #[test]
    fn test_error_position() {
        let err = compile("dup\n  )").unwrap_err();
        let position = err.position();
        assert_eq!((position.line, position.column), (2, 3));
    }
}
