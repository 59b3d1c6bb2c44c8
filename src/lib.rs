//! Plorth interpreter library
//!
//! Concatenative, stack-based, dynamically-typed scripting language with
//! first-class quotations, prototype-based objects and Unicode strings.

pub mod compiler;
pub mod context;
pub mod error;
pub mod lexer;
pub mod position;
pub mod repl;
pub mod runtime;
pub mod unicode;
pub mod value;

pub use context::Context;
pub use error::{CompileError, Result};
pub use position::{Position, Span};
pub use runtime::Runtime;
pub use value::{ErrorCode, Number, Quote, Str, Value, ValueRef, ValueType};
