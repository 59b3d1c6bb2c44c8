//! Symbol prototype words

use super::PrototypeDefinition;
use crate::context::Context;
use crate::value::Value;
use std::collections::HashMap;

/// Word: position
/// Prototype: symbol
///
/// Takes:
/// - symbol
///
/// Gives:
/// - symbol
/// - object|null
///
/// Returns the source position the symbol was compiled from as an object
/// with `line`, `column` and `offset` properties, or null when the
/// symbol was constructed at runtime.
fn w_position(ctx: &mut Context) {
    let Some(symbol) = ctx.pop_symbol() else {
        return;
    };
    let position = symbol.position().cloned();

    ctx.push(Some(Value::Symbol(symbol)));
    match position {
        Some(position) => {
            let properties = HashMap::from([
                (
                    String::from("line"),
                    Some(Value::Number(crate::value::Number::Int(position.line as i64))),
                ),
                (
                    String::from("column"),
                    Some(Value::Number(crate::value::Number::Int(
                        position.column as i64,
                    ))),
                ),
                (
                    String::from("offset"),
                    Some(Value::Number(crate::value::Number::Int(
                        position.offset as i64,
                    ))),
                ),
            ]);

            ctx.push_object(properties);
        }
        None => ctx.push_null(),
    }
}

pub(crate) fn symbol_prototype() -> PrototypeDefinition {
    vec![("position", w_position as crate::value::NativeWord)]
}

#[cfg(test)]
mod tests {
    use crate::runtime::Runtime;
    use crate::value::{Number, Value};

    #[test]
    fn test_position_of_runtime_symbol_is_null() {
        let runtime = Runtime::new();
        let mut ctx = runtime.new_context();

        ctx.push_symbol("foo");

        let quote = ctx.compile("position").unwrap();
        assert!(ctx.call(&quote));
        assert_eq!(ctx.pop(), Some(None));
    }

    #[test]
    fn test_position_of_compiled_symbol() {
        let runtime = Runtime::new();
        let mut ctx = runtime.new_context();
        // Compile a quote and fish its symbol out as a value
        let quote = ctx.compile("( mystery )").unwrap();

        ctx.call(&quote);

        let inner = ctx.pop_quote().unwrap();
        let symbol = inner.elements().unwrap()[0].clone();

        ctx.push(symbol);

        let quote = ctx.compile("position").unwrap();
        assert!(ctx.call(&quote));
        match ctx.pop() {
            Some(Some(Value::Object(object))) => {
                assert_eq!(
                    object.own_property("line"),
                    Some(Some(Value::Number(Number::Int(1))))
                );
                assert_eq!(
                    object.own_property("column"),
                    Some(Some(Value::Number(Number::Int(3))))
                );
            }
            other => panic!("expected object, got {other:?}"),
        }
    }
}
