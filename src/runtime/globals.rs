//! Global dictionary words

use super::PrototypeDefinition;
use crate::context::Context;
use crate::value::{self, ErrorCode};

/// Word: nop
///
/// Does nothing. Useful as a placeholder quote body.
fn w_nop(_ctx: &mut Context) {}

/// Word: clear
///
/// Removes all values from the stack.
fn w_clear(ctx: &mut Context) {
    ctx.clear();
}

/// Word: depth
///
/// Gives:
/// - number
///
/// Pushes the current number of values on the stack.
fn w_depth(ctx: &mut Context) {
    let depth = ctx.size();

    ctx.push_int(depth as i64);
}

/// Word: drop
///
/// Takes:
/// - any
///
/// Discards the top-most value of the stack.
fn w_drop(ctx: &mut Context) {
    ctx.pop();
}

/// Word: 2drop
///
/// Takes:
/// - any
/// - any
///
/// Discards the two top-most values of the stack.
fn w_2drop(ctx: &mut Context) {
    if ctx.pop().is_some() {
        ctx.pop();
    }
}

/// Word: dup
///
/// Takes:
/// - any
///
/// Gives:
/// - any
/// - any
///
/// Duplicates the top-most value of the stack.
fn w_dup(ctx: &mut Context) {
    let Some(value) = ctx.pop() else { return };

    ctx.push(value.clone());
    ctx.push(value);
}

/// Word: 2dup
///
/// Duplicates the two top-most values of the stack.
fn w_2dup(ctx: &mut Context) {
    let Some(a) = ctx.pop() else { return };
    let Some(b) = ctx.pop() else { return };

    ctx.push(b.clone());
    ctx.push(a.clone());
    ctx.push(b);
    ctx.push(a);
}

/// Word: nip
///
/// Drops the value below the top of the stack.
fn w_nip(ctx: &mut Context) {
    let Some(a) = ctx.pop() else { return };

    if ctx.pop().is_some() {
        ctx.push(a);
    }
}

/// Word: over
///
/// Copies the second value onto the top of the stack.
fn w_over(ctx: &mut Context) {
    let Some(a) = ctx.pop() else { return };
    let Some(b) = ctx.pop() else { return };

    ctx.push(b.clone());
    ctx.push(a);
    ctx.push(b);
}

/// Word: rot
///
/// Rotates the three top-most values so that the third becomes the top.
fn w_rot(ctx: &mut Context) {
    let Some(a) = ctx.pop() else { return };
    let Some(b) = ctx.pop() else { return };
    let Some(c) = ctx.pop() else { return };

    ctx.push(b);
    ctx.push(a);
    ctx.push(c);
}

/// Word: swap
///
/// Exchanges the two top-most values of the stack.
fn w_swap(ctx: &mut Context) {
    let Some(a) = ctx.pop() else { return };
    let Some(b) = ctx.pop() else { return };

    ctx.push(a);
    ctx.push(b);
}

/// Word: tuck
///
/// Copies the top-most value below the second value.
fn w_tuck(ctx: &mut Context) {
    let Some(a) = ctx.pop() else { return };
    let Some(b) = ctx.pop() else { return };

    ctx.push(a.clone());
    ctx.push(b);
    ctx.push(a);
}

/// Word: =
///
/// Takes:
/// - any
/// - any
///
/// Gives:
/// - boolean
///
/// Tests the two top-most values for deep equality.
fn w_eq(ctx: &mut Context) {
    let Some(a) = ctx.pop() else { return };
    let Some(b) = ctx.pop() else { return };

    let result = value::equals(&b, &a);

    ctx.push_boolean(result);
}

/// Word: !=
fn w_ne(ctx: &mut Context) {
    let Some(a) = ctx.pop() else { return };
    let Some(b) = ctx.pop() else { return };

    let result = !value::equals(&b, &a);

    ctx.push_boolean(result);
}

/// Word: if
///
/// Takes:
/// - boolean
/// - quote
///
/// Executes the quote when the condition holds.
fn w_if(ctx: &mut Context) {
    let Some(quote) = ctx.pop_quote() else { return };
    let Some(condition) = ctx.pop_boolean() else {
        return;
    };

    if condition {
        ctx.call(&quote);
    }
}

/// Word: if-else
///
/// Takes:
/// - boolean
/// - quote
/// - quote
///
/// Executes the first quote when the condition holds, the second one
/// otherwise.
fn w_if_else(ctx: &mut Context) {
    let Some(else_quote) = ctx.pop_quote() else {
        return;
    };
    let Some(then_quote) = ctx.pop_quote() else {
        return;
    };
    let Some(condition) = ctx.pop_boolean() else {
        return;
    };

    if condition {
        ctx.call(&then_quote);
    } else {
        ctx.call(&else_quote);
    }
}

/// Word: while
///
/// Takes:
/// - quote
/// - quote
///
/// Executes the second quote as long as the first quote leaves true on
/// the stack.
fn w_while(ctx: &mut Context) {
    let Some(body) = ctx.pop_quote() else { return };
    let Some(test) = ctx.pop_quote() else { return };

    loop {
        if !ctx.call(&test) {
            return;
        }
        let Some(condition) = ctx.pop_boolean() else {
            return;
        };

        if !condition {
            return;
        }
        if !ctx.call(&body) {
            return;
        }
    }
}

/// Word: >string
///
/// Takes:
/// - any
///
/// Gives:
/// - string
///
/// Converts the top-most value into its human-readable form.
fn w_to_string(ctx: &mut Context) {
    let Some(v) = ctx.pop() else { return };

    ctx.push_string(value::to_string(&v));
}

/// Word: >source
///
/// Converts the top-most value into its source-code form.
fn w_to_source(ctx: &mut Context) {
    let Some(v) = ctx.pop() else { return };

    ctx.push_string(value::to_source(&v));
}

/// Word: print
///
/// Takes:
/// - any
///
/// Prints the top-most value to the standard output.
fn w_print(ctx: &mut Context) {
    let Some(v) = ctx.pop() else { return };

    print!("{}", value::to_string(&v));
}

/// Word: println
fn w_println(ctx: &mut Context) {
    let Some(v) = ctx.pop() else { return };

    println!("{}", value::to_string(&v));
}

/// Word: emit
///
/// Takes:
/// - number
///
/// Prints the Unicode code point of the given number to the standard
/// output. Numbers outside the valid code point range give a range error.
fn w_emit(ctx: &mut Context) {
    let Some(number) = ctx.pop_number() else {
        return;
    };
    let code = number.as_int();

    match u32::try_from(code).ok().and_then(char::from_u32) {
        Some(c) => print!("{c}"),
        None => ctx.set_error(ErrorCode::Range, "Invalid Unicode code point."),
    }
}

pub(crate) fn global_dictionary() -> PrototypeDefinition {
    vec![
        ("nop", w_nop as crate::value::NativeWord),
        ("clear", w_clear),
        ("depth", w_depth),
        ("drop", w_drop),
        ("2drop", w_2drop),
        ("dup", w_dup),
        ("2dup", w_2dup),
        ("nip", w_nip),
        ("over", w_over),
        ("rot", w_rot),
        ("swap", w_swap),
        ("tuck", w_tuck),
        ("=", w_eq),
        ("!=", w_ne),
        ("if", w_if),
        ("if-else", w_if_else),
        ("while", w_while),
        (">string", w_to_string),
        (">source", w_to_source),
        ("print", w_print),
        ("println", w_println),
        ("emit", w_emit),
    ]
}
