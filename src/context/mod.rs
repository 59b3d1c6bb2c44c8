//! Program execution state
//!
//! A context owns the data stack, the local word dictionary and the
//! currently uncaught error. All pop operations follow one protocol: an
//! empty stack latches a `range` error, a type mismatch latches a `type`
//! error naming expected versus actual (leaving the value in place), and
//! only a successful check delivers the popped value.

mod exec;

use crate::position::Position;
use crate::runtime::Runtime;
use crate::value::{
    ErrorCode, ErrorValue, Number, Object, Quote, Str, Symbol, Value, ValueRef, ValueType, Word,
};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

pub struct Context {
    /// Runtime associated with this context
    runtime: Rc<Runtime>,
    /// Currently uncaught error
    error: Option<Rc<ErrorValue>>,
    /// Data stack; the top is the back
    data: VecDeque<ValueRef>,
    /// Local words, shadowing the runtime dictionary
    dictionary: HashMap<String, Rc<Quote>>,
    /// Optional filename when executed as a module
    filename: Option<String>,
    /// Current quote nesting depth
    depth: usize,
}

impl Context {
    pub fn new(runtime: Rc<Runtime>) -> Self {
        Self {
            runtime,
            error: None,
            data: VecDeque::new(),
            dictionary: HashMap::new(),
            filename: None,
            depth: 0,
        }
    }

    pub fn runtime(&self) -> &Rc<Runtime> {
        &self.runtime
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
    }

    // ---- error slot ----------------------------------------------------

    pub fn error(&self) -> Option<&Rc<ErrorValue>> {
        self.error.as_ref()
    }

    /// Replaces the currently uncaught error.
    pub fn set_error(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.error = Some(Rc::new(ErrorValue::new(code, message, None)));
    }

    pub fn set_error_at(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
        position: Option<Position>,
    ) {
        self.error = Some(Rc::new(ErrorValue::new(code, message, position)));
    }

    pub fn set_error_value(&mut self, error: Rc<ErrorValue>) {
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ---- data stack ----------------------------------------------------

    pub fn data(&self) -> &VecDeque<ValueRef> {
        &self.data
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn peek(&self) -> Option<&ValueRef> {
        self.data.back()
    }

    pub fn push(&mut self, value: ValueRef) {
        self.data.push_back(value);
    }

    pub fn push_null(&mut self) {
        self.push(None);
    }

    /// Pushes one of the runtime's boolean singletons.
    pub fn push_boolean(&mut self, value: bool) {
        let singleton = self.runtime.boolean(value);

        self.push(Some(singleton));
    }

    pub fn push_int(&mut self, value: i64) {
        self.push(Some(Value::Number(Number::Int(value))));
    }

    pub fn push_real(&mut self, value: f64) {
        self.push(Some(Value::Number(Number::Real(value))));
    }

    /// Parses text into either an integer or a real number and pushes the
    /// result. Text that does not conform to number syntax latches a
    /// `value` error.
    pub fn push_number(&mut self, text: &str) {
        match Number::parse(text) {
            Some(number) => self.push(Some(Value::Number(number))),
            None => self.set_error(
                ErrorCode::Value,
                format!("Could not convert `{text}' to number."),
            ),
        }
    }

    pub fn push_string(&mut self, text: impl AsRef<str>) {
        self.push(Some(Value::String(Rc::new(Str::from(text.as_ref())))));
    }

    pub fn push_str(&mut self, string: Rc<Str>) {
        self.push(Some(Value::String(string)));
    }

    pub fn push_array(&mut self, elements: Vec<ValueRef>) {
        self.push(Some(Value::Array(elements.into())));
    }

    pub fn push_object(&mut self, properties: HashMap<String, ValueRef>) {
        self.push(Some(Value::Object(Rc::new(Object::new(properties)))));
    }

    pub fn push_symbol(&mut self, id: impl Into<String>) {
        self.push(Some(Value::Symbol(Rc::new(Symbol::new(id, None)))));
    }

    pub fn push_quote(&mut self, elements: Vec<ValueRef>) {
        self.push(Some(Value::Quote(Rc::new(Quote::Compiled(elements)))));
    }

    pub fn push_word(&mut self, symbol: Rc<Symbol>, quote: Rc<Quote>) {
        self.push(Some(Value::Word(Rc::new(Word::new(symbol, quote)))));
    }

    /// Pops the top of the stack. An empty stack latches a `range` error
    /// and yields nothing.
    pub fn pop(&mut self) -> Option<ValueRef> {
        match self.data.pop_back() {
            Some(value) => Some(value),
            None => {
                self.set_error(ErrorCode::Range, "Stack underflow.");
                None
            }
        }
    }

    /// Pops the top of the stack, which must carry the expected type tag.
    /// On a mismatch a `type` error is latched and the value stays on the
    /// stack.
    pub fn pop_typed(&mut self, expected: ValueType) -> Option<ValueRef> {
        let actual = match self.data.back() {
            Some(value) => ValueType::of(value),
            None => {
                self.set_error(ErrorCode::Range, "Stack underflow.");
                return None;
            }
        };

        if actual != expected {
            self.set_error(
                ErrorCode::Type,
                format!("Expected {expected}, got {actual} instead."),
            );
            return None;
        }

        self.data.pop_back()
    }

    pub fn pop_boolean(&mut self) -> Option<bool> {
        match self.pop_typed(ValueType::Boolean)? {
            Some(Value::Boolean(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_number(&mut self) -> Option<Number> {
        match self.pop_typed(ValueType::Number)? {
            Some(Value::Number(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_string(&mut self) -> Option<Rc<Str>> {
        match self.pop_typed(ValueType::String)? {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_array(&mut self) -> Option<Rc<[ValueRef]>> {
        match self.pop_typed(ValueType::Array)? {
            Some(Value::Array(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_object(&mut self) -> Option<Rc<Object>> {
        match self.pop_typed(ValueType::Object)? {
            Some(Value::Object(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_symbol(&mut self) -> Option<Rc<Symbol>> {
        match self.pop_typed(ValueType::Symbol)? {
            Some(Value::Symbol(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_quote(&mut self) -> Option<Rc<Quote>> {
        match self.pop_typed(ValueType::Quote)? {
            Some(Value::Quote(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_word(&mut self) -> Option<Rc<Word>> {
        match self.pop_typed(ValueType::Word)? {
            Some(Value::Word(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_error(&mut self) -> Option<Rc<ErrorValue>> {
        match self.pop_typed(ValueType::Error)? {
            Some(Value::Error(value)) => Some(value),
            _ => None,
        }
    }

    // ---- dictionary ----------------------------------------------------

    pub fn dictionary(&self) -> &HashMap<String, Rc<Quote>> {
        &self.dictionary
    }

    /// Binds a word into the local dictionary; later bindings overwrite
    /// earlier ones.
    pub fn define(&mut self, name: impl Into<String>, quote: Rc<Quote>) {
        self.dictionary.insert(name.into(), quote);
    }

    // ---- compilation ---------------------------------------------------

    /// Compiles source code into a quote. A syntax error lands in the
    /// error slot and yields nothing.
    pub fn compile(&mut self, source: &str) -> Option<Rc<Quote>> {
        match crate::compiler::compile(source) {
            Ok(quote) => Some(quote),
            Err(error) => {
                let position = error.position().clone();

                self.set_error_at(
                    ErrorCode::Syntax,
                    error.message().to_string(),
                    Some(position),
                );
                None
            }
        }
    }
}
