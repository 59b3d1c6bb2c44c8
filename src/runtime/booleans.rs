//! Boolean prototype words

use super::PrototypeDefinition;
use crate::context::Context;

/// Word: and
/// Prototype: boolean
///
/// Takes:
/// - boolean
/// - boolean
///
/// Gives:
/// - boolean
///
/// Logical conjunction of the two top-most booleans.
fn w_and(ctx: &mut Context) {
    let Some(a) = ctx.pop_boolean() else { return };
    let Some(b) = ctx.pop_boolean() else { return };

    ctx.push_boolean(a && b);
}

/// Word: or
/// Prototype: boolean
fn w_or(ctx: &mut Context) {
    let Some(a) = ctx.pop_boolean() else { return };
    let Some(b) = ctx.pop_boolean() else { return };

    ctx.push_boolean(a || b);
}

/// Word: xor
/// Prototype: boolean
fn w_xor(ctx: &mut Context) {
    let Some(a) = ctx.pop_boolean() else { return };
    let Some(b) = ctx.pop_boolean() else { return };

    ctx.push_boolean(a != b);
}

/// Word: not
/// Prototype: boolean
///
/// Negates the top-most boolean.
fn w_not(ctx: &mut Context) {
    let Some(value) = ctx.pop_boolean() else {
        return;
    };

    ctx.push_boolean(!value);
}

pub(crate) fn boolean_prototype() -> PrototypeDefinition {
    vec![
        ("and", w_and as crate::value::NativeWord),
        ("or", w_or),
        ("xor", w_xor),
        ("not", w_not),
    ]
}
