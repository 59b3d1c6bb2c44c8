//! Runtime values
//!
//! All runtime entities are shared, immutable values. The absence of a
//! handle is the canonical null: [`ValueRef`] is `Option<Value>` and no
//! present handle ever carries the null tag.

mod error;
mod number;
mod object;
mod quote;
mod string;

pub use error::{ErrorCode, ErrorValue};
pub use number::Number;
pub use object::{Object, PROTOTYPE_DEPTH_LIMIT, PROTO_PROPERTY};
pub use quote::{NativeWord, Quote};
pub use string::Str;

use crate::position::Position;
use crate::runtime::Runtime;
use crate::unicode::json_stringify;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a value; `None` is null.
pub type ValueRef = Option<Value>;

/// A value with its type tag. Payloads are `Rc`-shared, so cloning a
/// value clones a handle, not the contents.
#[derive(Debug, Clone)]
pub enum Value {
    Boolean(bool),
    Number(Number),
    String(Rc<Str>),
    Array(Rc<[ValueRef]>),
    Object(Rc<Object>),
    Symbol(Rc<Symbol>),
    Quote(Rc<Quote>),
    Word(Rc<Word>),
    Error(Rc<ErrorValue>),
}

/// An identifier token resolved at execution time.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    id: String,
    position: Option<Position>,
}

impl Symbol {
    pub fn new(id: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }
}

/// A named binding in its unapplied form: executing a word installs its
/// quote into the local dictionary under the symbol's identifier.
#[derive(Debug, Clone)]
pub struct Word {
    symbol: Rc<Symbol>,
    quote: Rc<Quote>,
}

impl Word {
    pub fn new(symbol: Rc<Symbol>, quote: Rc<Quote>) -> Self {
        Self { symbol, quote }
    }

    pub fn symbol(&self) -> &Rc<Symbol> {
        &self.symbol
    }

    pub fn quote(&self) -> &Rc<Quote> {
        &self.quote
    }
}

/// The ten type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Symbol,
    Quote,
    Word,
    Error,
}

impl ValueType {
    /// Type tag of a value handle; the absent handle is null.
    pub fn of(value: &ValueRef) -> ValueType {
        match value {
            None => ValueType::Null,
            Some(value) => value.kind(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
            ValueType::Symbol => "symbol",
            ValueType::Quote => "quote",
            ValueType::Word => "word",
            ValueType::Error => "error",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag-aware deep equality.
///
/// Quotes compare by reference identity; words by symbol and quote
/// identity; everything else structurally.
pub fn equals(a: &ValueRef, b: &ValueRef) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(Value::Boolean(a)), Some(Value::Boolean(b))) => a == b,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a == b,
        (Some(Value::String(a)), Some(Value::String(b))) => a == b,
        (Some(Value::Array(a)), Some(Value::Array(b))) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| equals(x, y))
        }
        (Some(Value::Object(a)), Some(Value::Object(b))) => a == b,
        (Some(Value::Symbol(a)), Some(Value::Symbol(b))) => a.id() == b.id(),
        (Some(Value::Quote(a)), Some(Value::Quote(b))) => Rc::ptr_eq(a, b),
        (Some(Value::Word(a)), Some(Value::Word(b))) => {
            a.symbol().id() == b.symbol().id() && Rc::ptr_eq(a.quote(), b.quote())
        }
        (Some(Value::Error(a)), Some(Value::Error(b))) => a == b,
        _ => false,
    }
}

/// Human-readable form of a value handle. Null renders empty.
pub fn to_string(value: &ValueRef) -> String {
    match value {
        None => String::new(),
        Some(value) => value.to_string(),
    }
}

/// Source form of a value handle, re-parseable by the compiler for the
/// literal tags.
pub fn to_source(value: &ValueRef) -> String {
    match value {
        None => String::from("null"),
        Some(value) => value.to_source(),
    }
}

/// Determines the prototype object of a value, based on its type. For
/// objects the own `__proto__` property takes precedence, with the
/// runtime's object prototype acting as a fallback.
pub fn prototype_of(runtime: &Runtime, value: &ValueRef) -> Rc<Object> {
    match value {
        None => runtime.object_prototype(),
        Some(Value::Boolean(_)) => runtime.boolean_prototype(),
        Some(Value::Number(_)) => runtime.number_prototype(),
        Some(Value::String(_)) => runtime.string_prototype(),
        Some(Value::Array(_)) => runtime.array_prototype(),
        Some(Value::Object(object)) => object.prototype(runtime),
        Some(Value::Symbol(_)) => runtime.symbol_prototype(),
        Some(Value::Quote(_)) => runtime.quote_prototype(),
        Some(Value::Word(_)) => runtime.object_prototype(),
        Some(Value::Error(_)) => runtime.error_prototype(),
    }
}

/// `PartialEq` mirrors [`equals`], so `Option<Value>` handles compare the
/// way the language compares them.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        equals(&Some(self.clone()), &Some(other.clone()))
    }
}

impl Value {
    pub fn kind(&self) -> ValueType {
        match self {
            Value::Boolean(_) => ValueType::Boolean,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
            Value::Symbol(_) => ValueType::Symbol,
            Value::Quote(_) => ValueType::Quote,
            Value::Word(_) => ValueType::Word,
            Value::Error(_) => ValueType::Error,
        }
    }

    /// A form that resembles as accurately as possible what this value
    /// would look like in source code.
    pub fn to_source(&self) -> String {
        match self {
            Value::Boolean(value) => String::from(if *value { "true" } else { "false" }),
            Value::Number(number) => number.to_string(),
            Value::String(string) => json_stringify(&string.to_string()),
            Value::Array(elements) => {
                let rendered: Vec<String> = elements.iter().map(to_source).collect();

                format!("[{}]", rendered.join(", "))
            }
            Value::Object(object) => {
                // Keys render sorted so equal objects serialize alike
                let mut rendered: Vec<(&String, &ValueRef)> = object.properties().iter().collect();

                rendered.sort_by(|a, b| a.0.cmp(b.0));

                let rendered: Vec<String> = rendered
                    .into_iter()
                    .map(|(key, value)| format!("{}: {}", json_stringify(key), to_source(value)))
                    .collect();

                format!("{{{}}}", rendered.join(", "))
            }
            Value::Symbol(symbol) => symbol.id().to_string(),
            Value::Quote(quote) => match quote.elements() {
                Some(elements) => {
                    let rendered: Vec<String> = elements.iter().map(to_source).collect();

                    format!("( {} )", rendered.join(" "))
                }
                None => String::from("(\"native quote\")"),
            },
            Value::Word(word) => {
                let body = match word.quote().elements() {
                    Some(elements) => elements
                        .iter()
                        .map(to_source)
                        .collect::<Vec<String>>()
                        .join(" "),
                    None => String::from("(\"native quote\")"),
                };

                format!(": {} {} ;", word.symbol().id(), body)
            }
            Value::Error(error) => format!("{error}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Number(number) => write!(f, "{number}"),
            Value::String(string) => write!(f, "{string}"),
            Value::Array(elements) => {
                let rendered: Vec<String> = elements.iter().map(to_string).collect();

                write!(f, "[{}]", rendered.join(", "))
            }
            Value::Object(object) => {
                let mut rendered: Vec<(&String, &ValueRef)> = object.properties().iter().collect();

                rendered.sort_by(|a, b| a.0.cmp(b.0));

                let rendered: Vec<String> = rendered
                    .into_iter()
                    .map(|(key, value)| format!("{}: {}", json_stringify(key), to_string(value)))
                    .collect();

                write!(f, "{{{}}}", rendered.join(", "))
            }
            Value::Symbol(symbol) => write!(f, "{}", symbol.id()),
            Value::Quote(_) | Value::Word(_) => write!(f, "{}", self.to_source()),
            Value::Error(error) => write!(f, "{error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(text: &str) -> Value {
        Value::String(Rc::new(Str::from(text)))
    }

    fn int(value: i64) -> ValueRef {
        Some(Value::Number(Number::Int(value)))
    }

    #[test]
    fn test_type_of() {
        assert_eq!(ValueType::of(&None), ValueType::Null);
        assert_eq!(ValueType::of(&Some(Value::Boolean(true))), ValueType::Boolean);
        assert_eq!(ValueType::of(&int(1)), ValueType::Number);
    }

    #[test]
    fn test_equals_null() {
        assert!(equals(&None, &None));
        assert!(!equals(&None, &Some(Value::Boolean(false))));
    }

    #[test]
    fn test_equals_numbers_promote() {
        assert!(equals(&int(3), &Some(Value::Number(Number::Real(3.0)))));
    }

    #[test]
    fn test_equals_strings() {
        assert!(equals(&Some(string("abc")), &Some(string("abc"))));
        assert!(!equals(&Some(string("abc")), &Some(string("abd"))));
    }

    #[test]
    fn test_equals_arrays() {
        let a = Some(Value::Array(vec![int(1), None].into()));
        let b = Some(Value::Array(vec![int(1), None].into()));
        let c = Some(Value::Array(vec![int(1)].into()));
        assert!(equals(&a, &b));
        assert!(!equals(&a, &c));
    }

    #[test]
    fn test_equals_quotes_by_identity() {
        let quote = Rc::new(Quote::Compiled(Vec::new()));
        let a = Some(Value::Quote(Rc::clone(&quote)));
        let b = Some(Value::Quote(quote));
        let c = Some(Value::Quote(Rc::new(Quote::Compiled(Vec::new()))));
        assert!(equals(&a, &b));
        assert!(!equals(&a, &c));
    }

    #[test]
    fn test_equals_symbols_by_id() {
        let a = Some(Value::Symbol(Rc::new(Symbol::new("foo", None))));
        let b = Some(Value::Symbol(Rc::new(Symbol::new(
            "foo",
            Some(Position::new(1, 1, 0)),
        ))));
        assert!(equals(&a, &b));
    }

    #[test]
    fn test_to_string_forms() {
        assert_eq!(to_string(&None), "");
        assert_eq!(to_string(&Some(Value::Boolean(true))), "true");
        assert_eq!(to_string(&Some(string("hi"))), "hi");
        assert_eq!(
            to_string(&Some(Value::Array(vec![int(1), int(2)].into()))),
            "[1, 2]"
        );
    }

    #[test]
    fn test_to_source_forms() {
        assert_eq!(to_source(&None), "null");
        assert_eq!(to_source(&Some(Value::Boolean(false))), "false");
        assert_eq!(to_source(&Some(string("a\"b"))), "\"a\\\"b\"");
        assert_eq!(
            to_source(&Some(Value::Array(vec![int(1), None].into()))),
            "[1, null]"
        );
    }

    #[test]
    fn test_quote_to_source() {
        let quote = Value::Quote(Rc::new(Quote::Compiled(vec![
            int(1),
            Some(Value::Symbol(Rc::new(Symbol::new("dup", None)))),
        ])));
        assert_eq!(quote.to_source(), "( 1 dup )");
    }

    #[test]
    fn test_word_to_source() {
        let symbol = Rc::new(Symbol::new("square", None));
        let quote = Rc::new(Quote::Compiled(vec![
            Some(Value::Symbol(Rc::new(Symbol::new("dup", None)))),
            Some(Value::Symbol(Rc::new(Symbol::new("*", None)))),
        ]));
        let word = Value::Word(Rc::new(Word::new(symbol, quote)));
        assert_eq!(word.to_source(), ": square dup * ;");
    }
}
