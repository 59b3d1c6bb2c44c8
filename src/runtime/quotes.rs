//! Quote prototype words

use super::PrototypeDefinition;
use crate::context::Context;
use crate::value::{Quote, Symbol, Value};
use std::rc::Rc;

/// Word: call
/// Prototype: quote
///
/// Takes:
/// - quote
///
/// Executes the quote.
fn w_call(ctx: &mut Context) {
    let Some(quote) = ctx.pop_quote() else { return };

    ctx.call(&quote);
}

/// Word: compose
/// Prototype: quote
///
/// Takes:
/// - quote
/// - quote
///
/// Gives:
/// - quote
///
/// Returns a quote that executes the two given quotes in order.
fn w_compose(ctx: &mut Context) {
    let Some(a) = ctx.pop_quote() else { return };
    let Some(b) = ctx.pop_quote() else { return };
    let call = || Some(Value::Symbol(Rc::new(Symbol::new("call", None))));
    let elements = vec![
        Some(Value::Quote(b)),
        call(),
        Some(Value::Quote(a)),
        call(),
    ];

    ctx.push(Some(Value::Quote(Rc::new(Quote::Compiled(elements)))));
}

pub(crate) fn quote_prototype() -> PrototypeDefinition {
    vec![
        ("call", w_call as crate::value::NativeWord),
        ("compose", w_compose),
    ]
}

#[cfg(test)]
mod tests {
    use crate::runtime::Runtime;
    use crate::value::{ErrorCode, Number};

    fn run(source: &str) -> crate::context::Context {
        let runtime = Runtime::new();
        let mut ctx = runtime.new_context();
        let quote = ctx.compile(source).expect("source should compile");

        ctx.call(&quote);
        ctx
    }

    #[test]
    fn test_call() {
        let mut ctx = run("( 1 2 + ) call");
        assert_eq!(ctx.pop_number(), Some(Number::Int(3)));
    }

    #[test]
    fn test_call_requires_quote() {
        let ctx = run("1 call");
        assert_eq!(ctx.error().unwrap().code(), ErrorCode::Reference);
    }

    #[test]
    fn test_compose() {
        let mut ctx = run("( 1 ) ( 2 + ) compose call");
        assert_eq!(ctx.pop_number(), Some(Number::Int(3)));
    }

    #[test]
    fn test_composed_quote_propagates_errors() {
        let ctx = run("( mystery ) ( 1 ) compose call");
        assert_eq!(ctx.error().unwrap().code(), ErrorCode::Reference);
    }
}
