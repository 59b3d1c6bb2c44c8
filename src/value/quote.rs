//! Quote values

use crate::context::Context;
use crate::value::ValueRef;
use std::fmt;

/// Callback signature of a native word.
pub type NativeWord = fn(&mut Context);

/// A quotation: either a compiled sequence of values to be executed, or
/// an opaque native callback taking the execution context.
pub enum Quote {
    Compiled(Vec<ValueRef>),
    Native(NativeWord),
}

impl Quote {
    /// Element sequence of a compiled quote.
    pub fn elements(&self) -> Option<&[ValueRef]> {
        match self {
            Quote::Compiled(elements) => Some(elements),
            Quote::Native(_) => None,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Quote::Native(_))
    }
}

impl fmt::Debug for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quote::Compiled(elements) => f.debug_tuple("Compiled").field(elements).finish(),
            Quote::Native(callback) => f
                .debug_tuple("Native")
                .field(&(*callback as usize as *const ()))
                .finish(),
        }
    }
}
