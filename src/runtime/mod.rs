//! Interpreter root
//!
//! The runtime owns the boolean singletons, the global dictionary and the
//! eight prototype objects, and acts as the factory for values and
//! contexts. All state is shared with `Rc`; a runtime and its contexts
//! belong to a single thread.

mod arrays;
mod booleans;
mod errors;
mod globals;
mod numbers;
mod objects;
mod quotes;
mod strings;
mod symbols;

use crate::context::Context;
use crate::position::Position;
use crate::value::{
    ErrorCode, ErrorValue, NativeWord, Number, Object, Quote, Str, Symbol, Value, ValueRef, Word,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A set of named native callbacks bound into a prototype or the global
/// dictionary.
pub type PrototypeDefinition = Vec<(&'static str, NativeWord)>;

pub struct Runtime {
    /// Global dictionary; prototypes are reachable here as
    /// `{"prototype": <proto>}` objects under their tag names
    dictionary: RefCell<HashMap<String, Value>>,
    true_value: Value,
    false_value: Value,
    array_prototype: Rc<Object>,
    boolean_prototype: Rc<Object>,
    error_prototype: Rc<Object>,
    number_prototype: Rc<Object>,
    object_prototype: Rc<Object>,
    quote_prototype: Rc<Object>,
    string_prototype: Rc<Object>,
    symbol_prototype: Rc<Object>,
}

impl Runtime {
    /// Constructs a runtime with the standard word set.
    pub fn new() -> Rc<Runtime> {
        let mut dictionary = HashMap::new();

        for (name, callback) in globals::global_dictionary() {
            dictionary.insert(
                name.to_string(),
                Value::Quote(Rc::new(Quote::Native(callback))),
            );
        }

        let array_prototype = make_prototype(&mut dictionary, "array", arrays::array_prototype());
        let boolean_prototype =
            make_prototype(&mut dictionary, "boolean", booleans::boolean_prototype());
        let error_prototype = make_prototype(&mut dictionary, "error", errors::error_prototype());
        let number_prototype =
            make_prototype(&mut dictionary, "number", numbers::number_prototype());
        let object_prototype =
            make_prototype(&mut dictionary, "object", objects::object_prototype());
        let quote_prototype = make_prototype(&mut dictionary, "quote", quotes::quote_prototype());
        let string_prototype =
            make_prototype(&mut dictionary, "string", strings::string_prototype());
        let symbol_prototype =
            make_prototype(&mut dictionary, "symbol", symbols::symbol_prototype());

        Rc::new(Runtime {
            dictionary: RefCell::new(dictionary),
            true_value: Value::Boolean(true),
            false_value: Value::Boolean(false),
            array_prototype,
            boolean_prototype,
            error_prototype,
            number_prototype,
            object_prototype,
            quote_prototype,
            string_prototype,
            symbol_prototype,
        })
    }

    /// Fresh context with an empty stack, empty dictionary and no error.
    pub fn new_context(self: &Rc<Self>) -> Context {
        Context::new(Rc::clone(self))
    }

    // ---- global dictionary ---------------------------------------------

    /// Looks up a binding in the global dictionary.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.dictionary.borrow().get(name).cloned()
    }

    /// Binds a value into the global dictionary, overwriting any earlier
    /// binding under the same name.
    pub fn define_global(&self, name: impl Into<String>, value: Value) {
        self.dictionary.borrow_mut().insert(name.into(), value);
    }

    pub fn global_names(&self) -> Vec<String> {
        self.dictionary.borrow().keys().cloned().collect()
    }

    // ---- prototypes ----------------------------------------------------

    pub fn array_prototype(&self) -> Rc<Object> {
        Rc::clone(&self.array_prototype)
    }

    pub fn boolean_prototype(&self) -> Rc<Object> {
        Rc::clone(&self.boolean_prototype)
    }

    pub fn error_prototype(&self) -> Rc<Object> {
        Rc::clone(&self.error_prototype)
    }

    pub fn number_prototype(&self) -> Rc<Object> {
        Rc::clone(&self.number_prototype)
    }

    pub fn object_prototype(&self) -> Rc<Object> {
        Rc::clone(&self.object_prototype)
    }

    pub fn quote_prototype(&self) -> Rc<Object> {
        Rc::clone(&self.quote_prototype)
    }

    pub fn string_prototype(&self) -> Rc<Object> {
        Rc::clone(&self.string_prototype)
    }

    pub fn symbol_prototype(&self) -> Rc<Object> {
        Rc::clone(&self.symbol_prototype)
    }

    // ---- value factories -----------------------------------------------

    /// One of the runtime's two boolean singletons.
    pub fn boolean(&self, value: bool) -> Value {
        if value {
            self.true_value.clone()
        } else {
            self.false_value.clone()
        }
    }

    pub fn number_from_text(&self, text: &str) -> Option<Value> {
        Number::parse(text).map(Value::Number)
    }

    pub fn string(&self, text: &str) -> Value {
        Value::String(Rc::new(Str::from(text)))
    }

    pub fn string_from_chars(&self, chars: &[char]) -> Value {
        Value::String(Str::from_chars(chars))
    }

    pub fn array(&self, elements: Vec<ValueRef>) -> Value {
        Value::Array(elements.into())
    }

    pub fn object(&self, properties: HashMap<String, ValueRef>) -> Value {
        Value::Object(Rc::new(Object::new(properties)))
    }

    pub fn quote(&self, elements: Vec<ValueRef>) -> Value {
        Value::Quote(Rc::new(Quote::Compiled(elements)))
    }

    pub fn native_quote(&self, callback: NativeWord) -> Value {
        Value::Quote(Rc::new(Quote::Native(callback)))
    }

    pub fn symbol(&self, id: impl Into<String>) -> Value {
        Value::Symbol(Rc::new(Symbol::new(id, None)))
    }

    pub fn word(&self, symbol: Rc<Symbol>, quote: Rc<Quote>) -> Value {
        Value::Word(Rc::new(Word::new(symbol, quote)))
    }

    pub fn error(
        &self,
        code: ErrorCode,
        message: impl Into<String>,
        position: Option<Position>,
    ) -> Value {
        Value::Error(Rc::new(ErrorValue::new(code, message, position)))
    }
}

/// Builds a prototype object from a definition list and binds it into the
/// global dictionary as `{"prototype": <proto>}` under the given name.
fn make_prototype(
    dictionary: &mut HashMap<String, Value>,
    name: &str,
    definition: PrototypeDefinition,
) -> Rc<Object> {
    let properties: HashMap<String, ValueRef> = definition
        .into_iter()
        .map(|(word, callback)| {
            (
                word.to_string(),
                Some(Value::Quote(Rc::new(Quote::Native(callback)))),
            )
        })
        .collect();
    let prototype = Rc::new(Object::new(properties));
    let binding = Object::new(HashMap::from([(
        String::from("prototype"),
        Some(Value::Object(Rc::clone(&prototype))),
    )]));

    dictionary.insert(name.to_string(), Value::Object(Rc::new(binding)));

    prototype
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    #[test]
    fn test_new_context_is_empty() {
        let runtime = Runtime::new();
        let ctx = runtime.new_context();
        assert!(ctx.is_empty());
        assert!(ctx.dictionary().is_empty());
        assert!(ctx.error().is_none());
    }

    #[test]
    fn test_boolean_singletons() {
        let runtime = Runtime::new();
        assert!(matches!(runtime.boolean(true), Value::Boolean(true)));
        assert!(matches!(runtime.boolean(false), Value::Boolean(false)));
    }

    #[test]
    fn test_prototypes_are_bound_in_global_dictionary() {
        let runtime = Runtime::new();

        for name in [
            "array", "boolean", "error", "number", "object", "quote", "string", "symbol",
        ] {
            match runtime.global(name) {
                Some(Value::Object(binding)) => {
                    assert!(
                        matches!(binding.own_property("prototype"), Some(Some(Value::Object(_)))),
                        "{name} binding should carry a prototype property"
                    );
                }
                other => panic!("expected {name} to be bound to an object, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_string_prototype_has_standard_words() {
        let runtime = Runtime::new();
        let prototype = runtime.string_prototype();

        for word in ["length", "trim", "chars", "+"] {
            assert!(
                matches!(prototype.own_property(word), Some(Some(Value::Quote(_)))),
                "string prototype should bind {word}"
            );
        }
    }

    #[test]
    fn test_define_global() {
        let runtime = Runtime::new();
        runtime.define_global("answer", Value::Number(Number::Int(42)));
        assert!(matches!(
            runtime.global("answer"),
            Some(Value::Number(Number::Int(42)))
        ));
    }

    #[test]
    fn test_factories() {
        let runtime = Runtime::new();
        assert_eq!(
            ValueType::of(&Some(runtime.string("hi"))),
            ValueType::String
        );
        assert_eq!(
            ValueType::of(&Some(runtime.array(Vec::new()))),
            ValueType::Array
        );
        assert!(runtime.number_from_text("4.5").is_some());
        assert!(runtime.number_from_text("x").is_none());
    }
}
