//! Number prototype words

use super::PrototypeDefinition;
use crate::context::Context;
use crate::value::{ErrorCode, Number};
use std::cmp::Ordering;

/// Word: +
/// Prototype: number
///
/// Takes:
/// - number
/// - number
///
/// Gives:
/// - number
///
/// Adds the two numbers together. Integer results that overflow promote
/// to real.
fn w_add(ctx: &mut Context) {
    let Some(a) = ctx.pop_number() else { return };
    let Some(b) = ctx.pop_number() else { return };

    ctx.push(Some(crate::value::Value::Number(b.add(a))));
}

/// Word: -
/// Prototype: number
fn w_sub(ctx: &mut Context) {
    let Some(a) = ctx.pop_number() else { return };
    let Some(b) = ctx.pop_number() else { return };

    ctx.push(Some(crate::value::Value::Number(b.sub(a))));
}

/// Word: *
/// Prototype: number
fn w_mul(ctx: &mut Context) {
    let Some(a) = ctx.pop_number() else { return };
    let Some(b) = ctx.pop_number() else { return };

    ctx.push(Some(crate::value::Value::Number(b.mul(a))));
}

/// Word: /
/// Prototype: number
///
/// Takes:
/// - number
/// - number
///
/// Gives:
/// - number
///
/// Divides the second number by the top-most one. Integer division
/// truncates; an integer division by zero gives a range error, while
/// real division follows IEEE-754.
fn w_div(ctx: &mut Context) {
    let Some(a) = ctx.pop_number() else { return };
    let Some(b) = ctx.pop_number() else { return };

    if let (Number::Int(_), Number::Int(0)) = (b, a) {
        ctx.set_error(ErrorCode::Range, "Division by zero.");
        return;
    }
    ctx.push(Some(crate::value::Value::Number(b.div(a))));
}

/// Word: %
/// Prototype: number
fn w_rem(ctx: &mut Context) {
    let Some(a) = ctx.pop_number() else { return };
    let Some(b) = ctx.pop_number() else { return };

    if let (Number::Int(_), Number::Int(0)) = (b, a) {
        ctx.set_error(ErrorCode::Range, "Division by zero.");
        return;
    }
    ctx.push(Some(crate::value::Value::Number(b.rem(a))));
}

fn compare(ctx: &mut Context) -> Option<Ordering> {
    let a = ctx.pop_number()?;
    let b = ctx.pop_number()?;

    b.compare(a)
}

/// Word: <
/// Prototype: number
///
/// Tests whether the second number is less than the top-most one. A NaN
/// operand compares false.
fn w_lt(ctx: &mut Context) {
    let ordering = compare(ctx);

    if ctx.error().is_none() {
        ctx.push_boolean(ordering == Some(Ordering::Less));
    }
}

/// Word: >
/// Prototype: number
fn w_gt(ctx: &mut Context) {
    let ordering = compare(ctx);

    if ctx.error().is_none() {
        ctx.push_boolean(ordering == Some(Ordering::Greater));
    }
}

/// Word: <=
/// Prototype: number
fn w_le(ctx: &mut Context) {
    let ordering = compare(ctx);

    if ctx.error().is_none() {
        ctx.push_boolean(matches!(
            ordering,
            Some(Ordering::Less) | Some(Ordering::Equal)
        ));
    }
}

/// Word: >=
/// Prototype: number
fn w_ge(ctx: &mut Context) {
    let ordering = compare(ctx);

    if ctx.error().is_none() {
        ctx.push_boolean(matches!(
            ordering,
            Some(Ordering::Greater) | Some(Ordering::Equal)
        ));
    }
}

/// Word: abs
/// Prototype: number
fn w_abs(ctx: &mut Context) {
    let Some(number) = ctx.pop_number() else {
        return;
    };

    ctx.push(Some(crate::value::Value::Number(number.abs())));
}

/// Word: times
/// Prototype: number
///
/// Takes:
/// - number
/// - quote
///
/// Executes the quote the given number of times.
fn w_times(ctx: &mut Context) {
    let Some(quote) = ctx.pop_quote() else { return };
    let Some(number) = ctx.pop_number() else {
        return;
    };
    let mut count = number.as_int();

    if count < 0 {
        count = -count;
    }
    for _ in 0..count {
        if !ctx.call(&quote) {
            return;
        }
    }
}

pub(crate) fn number_prototype() -> PrototypeDefinition {
    vec![
        ("+", w_add as crate::value::NativeWord),
        ("-", w_sub),
        ("*", w_mul),
        ("/", w_div),
        ("%", w_rem),
        ("<", w_lt),
        (">", w_gt),
        ("<=", w_le),
        (">=", w_ge),
        ("abs", w_abs),
        ("times", w_times),
    ]
}
