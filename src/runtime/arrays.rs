//! Array prototype words

use super::PrototypeDefinition;
use crate::context::Context;
use crate::value::{ErrorCode, Value, ValueRef};
use std::rc::Rc;

/// Word: length
/// Prototype: array
///
/// Takes:
/// - array
///
/// Gives:
/// - array
/// - number
///
/// Returns the number of elements in the array.
fn w_length(ctx: &mut Context) {
    let Some(array) = ctx.pop_array() else {
        return;
    };
    let length = array.len();

    ctx.push(Some(Value::Array(array)));
    ctx.push_int(length as i64);
}

/// Word: empty?
/// Prototype: array
fn w_is_empty(ctx: &mut Context) {
    let Some(array) = ctx.pop_array() else {
        return;
    };
    let result = array.is_empty();

    ctx.push(Some(Value::Array(array)));
    ctx.push_boolean(result);
}

/// Word: reverse
/// Prototype: array
///
/// Reverses the array.
fn w_reverse(ctx: &mut Context) {
    let Some(array) = ctx.pop_array() else {
        return;
    };
    let result: Vec<ValueRef> = array.iter().rev().cloned().collect();

    ctx.push_array(result);
}

/// Word: for-each
/// Prototype: array
///
/// Takes:
/// - array
/// - quote
///
/// Executes the quote once for every element, with the element pushed
/// onto the stack.
fn w_for_each(ctx: &mut Context) {
    let Some(quote) = ctx.pop_quote() else { return };
    let Some(array) = ctx.pop_array() else {
        return;
    };

    for element in array.iter() {
        ctx.push(element.clone());
        if !ctx.call(&quote) {
            return;
        }
    }
}

/// Word: map
/// Prototype: array
///
/// Takes:
/// - array
/// - quote
///
/// Gives:
/// - array
///
/// Applies the quote to every element and collects the results into a
/// new array.
fn w_map(ctx: &mut Context) {
    let Some(quote) = ctx.pop_quote() else { return };
    let Some(array) = ctx.pop_array() else {
        return;
    };
    let mut result: Vec<ValueRef> = Vec::with_capacity(array.len());

    for element in array.iter() {
        ctx.push(element.clone());
        if !ctx.call(&quote) {
            return;
        }
        let Some(mapped) = ctx.pop() else { return };

        result.push(mapped);
    }
    ctx.push_array(result);
}

/// Word: +
/// Prototype: array
///
/// Takes:
/// - array
/// - array
///
/// Gives:
/// - array
///
/// Concatenates the contents of the two arrays.
fn w_concat(ctx: &mut Context) {
    let Some(a) = ctx.pop_array() else { return };
    let Some(b) = ctx.pop_array() else { return };
    let mut result: Vec<ValueRef> = Vec::with_capacity(a.len() + b.len());

    result.extend(b.iter().cloned());
    result.extend(a.iter().cloned());
    ctx.push_array(result);
}

/// Word: @
/// Prototype: array
///
/// Takes:
/// - number
/// - array
///
/// Gives:
/// - array
/// - any
///
/// Retrieves a value at given index. Negative indices count backwards
/// from the end of the array. An index out of bounds gives a range
/// error.
fn w_get(ctx: &mut Context) {
    let Some(array) = ctx.pop_array() else {
        return;
    };
    let Some(number) = ctx.pop_number() else {
        return;
    };
    let length = array.len();
    let mut index = number.as_int();

    if index < 0 {
        index += length as i64;
    }

    ctx.push(Some(Value::Array(Rc::clone(&array))));

    if index < 0 || index >= length as i64 {
        ctx.set_error(ErrorCode::Range, "Array index out of bounds.");
        return;
    }
    ctx.push(array[index as usize].clone());
}

pub(crate) fn array_prototype() -> PrototypeDefinition {
    vec![
        ("length", w_length as crate::value::NativeWord),
        ("empty?", w_is_empty),
        ("reverse", w_reverse),
        ("for-each", w_for_each),
        ("map", w_map),
        ("+", w_concat),
        ("@", w_get),
    ]
}
