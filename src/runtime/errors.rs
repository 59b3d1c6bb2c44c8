//! Error prototype words

use super::PrototypeDefinition;
use crate::context::Context;
use crate::value::Value;

/// Word: code
/// Prototype: error
///
/// Takes:
/// - error
///
/// Gives:
/// - error
/// - string
///
/// Returns the name of the error's code.
fn w_code(ctx: &mut Context) {
    let Some(error) = ctx.pop_error() else { return };
    let code = error.code().name();

    ctx.push(Some(Value::Error(error)));
    ctx.push_string(code);
}

/// Word: message
/// Prototype: error
///
/// Returns the error's message.
fn w_message(ctx: &mut Context) {
    let Some(error) = ctx.pop_error() else { return };
    let message = error.message().to_string();

    ctx.push(Some(Value::Error(error)));
    ctx.push_string(message);
}

pub(crate) fn error_prototype() -> PrototypeDefinition {
    vec![
        ("code", w_code as crate::value::NativeWord),
        ("message", w_message),
    ]
}
