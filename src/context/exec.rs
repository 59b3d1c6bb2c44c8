//! Evaluation and execution protocol
//!
//! Execution walks a compiled quote's element sequence: plain values
//! evaluate and push themselves, symbols resolve through the dictionaries
//! and the prototype chain, words bind into the local dictionary. The
//! executor halts as soon as the error slot is occupied.

use super::Context;
use crate::value::{self, ErrorCode, Number, Quote, Symbol, Value, ValueRef};
use std::collections::HashMap;
use std::rc::Rc;

/// Quote nesting limit; crossing it latches a `range` error instead of
/// exhausting the native call stack.
const MAX_QUOTE_DEPTH: usize = 1024;

impl Context {
    /// Executes a quote against this context. Reports whether execution
    /// ran to completion without leaving an error behind.
    pub fn call(&mut self, quote: &Rc<Quote>) -> bool {
        if self.depth >= MAX_QUOTE_DEPTH {
            self.set_error(ErrorCode::Range, "Too deep quote recursion.");
            return false;
        }
        self.depth += 1;

        let result = match &**quote {
            Quote::Native(callback) => {
                callback(self);
                self.error().is_none()
            }
            Quote::Compiled(_) => {
                let quote = Rc::clone(quote);
                let mut result = true;

                if let Some(elements) = quote.elements() {
                    for element in elements {
                        if !self.exec(element) || self.error().is_some() {
                            result = false;
                            break;
                        }
                    }
                }
                result
            }
        };

        self.depth -= 1;
        result
    }

    /// Executes a single value as an element of a running quote.
    pub fn exec(&mut self, value: &ValueRef) -> bool {
        match value {
            Some(Value::Symbol(symbol)) => {
                let symbol = Rc::clone(symbol);

                self.exec_symbol(&symbol)
            }
            Some(Value::Word(word)) => {
                self.define(word.symbol().id(), Rc::clone(word.quote()));
                true
            }
            other => match self.eval(other) {
                Some(value) => {
                    self.push(value);
                    true
                }
                None => false,
            },
        }
    }

    /// Evaluates a value as a literal in a data context: an element of an
    /// array or the value of an object property. Most values evaluate to
    /// themselves; arrays and objects re-evaluate their contents; symbols
    /// resolve as null, boolean or number literals.
    pub fn eval(&mut self, value: &ValueRef) -> Option<ValueRef> {
        match value {
            Some(Value::Symbol(symbol)) => {
                let symbol = Rc::clone(symbol);

                self.eval_symbol(&symbol)
            }
            Some(Value::Array(elements)) => {
                let elements = Rc::clone(elements);
                let mut result = Vec::with_capacity(elements.len());

                for element in elements.iter() {
                    result.push(self.eval(element)?);
                }
                Some(Some(Value::Array(result.into())))
            }
            Some(Value::Object(object)) => {
                let object = Rc::clone(object);
                let mut properties = HashMap::with_capacity(object.len());

                for (key, value) in object.properties() {
                    properties.insert(key.clone(), self.eval(value)?);
                }
                Some(Some(Value::Object(Rc::new(value::Object::new(properties)))))
            }
            other => Some(other.clone()),
        }
    }

    /// Resolves a symbol during execution. Lookup order: local
    /// dictionary, prototype of the top-of-stack value, global
    /// dictionary, number syntax, the literal words `true`, `false`,
    /// `null` and `drop`. Quotes found along the way are invoked; other
    /// values are pushed.
    fn exec_symbol(&mut self, symbol: &Rc<Symbol>) -> bool {
        let id = symbol.id();
        let runtime = Rc::clone(self.runtime());

        if let Some(quote) = self.dictionary().get(id).cloned() {
            return self.call(&quote);
        }

        if let Some(top) = self.peek().cloned() {
            let prototype = value::prototype_of(&runtime, &top);

            if let Some(property) = prototype.property(&runtime, id, true) {
                return match property {
                    Some(Value::Quote(quote)) => self.call(&quote),
                    other => {
                        self.push(other);
                        true
                    }
                };
            }
        }

        if let Some(binding) = runtime.global(id) {
            return match binding {
                Value::Quote(quote) => self.call(&quote),
                other => {
                    self.push(Some(other));
                    true
                }
            };
        }

        if Number::is_valid(id) {
            self.push_number(id);
            return self.error().is_none();
        }

        match id {
            "true" => {
                self.push_boolean(true);
                true
            }
            "false" => {
                self.push_boolean(false);
                true
            }
            "null" => {
                self.push_null();
                true
            }
            "drop" => self.pop().is_some(),
            _ => {
                self.set_error_at(
                    ErrorCode::Reference,
                    format!("Unrecognized word: {id}"),
                    symbol.position().cloned(),
                );
                false
            }
        }
    }

    /// Resolves a symbol in a data context, where only the literal layer
    /// applies.
    fn eval_symbol(&mut self, symbol: &Rc<Symbol>) -> Option<ValueRef> {
        let id = symbol.id();

        match id {
            "null" => return Some(None),
            "true" => return Some(Some(self.runtime().boolean(true))),
            "false" => return Some(Some(self.runtime().boolean(false))),
            _ => {}
        }

        if let Some(number) = Number::parse(id) {
            return Some(Some(Value::Number(number)));
        }

        self.set_error_at(
            ErrorCode::Reference,
            format!("Unrecognized word: {id}"),
            symbol.position().cloned(),
        );
        None
    }
}
