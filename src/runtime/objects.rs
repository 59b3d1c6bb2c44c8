//! Object prototype words

use super::PrototypeDefinition;
use crate::context::Context;
use crate::value::{ErrorCode, Value, ValueRef};
use std::rc::Rc;

/// Word: keys
/// Prototype: object
///
/// Takes:
/// - object
///
/// Gives:
/// - object
/// - array
///
/// Returns the names of the object's own properties in an array of
/// strings.
fn w_keys(ctx: &mut Context) {
    let Some(object) = ctx.pop_object() else {
        return;
    };
    let keys: Vec<ValueRef> = object
        .properties()
        .keys()
        .map(|key| Some(ctx.runtime().string(key)))
        .collect();

    ctx.push(Some(Value::Object(object)));
    ctx.push_array(keys);
}

/// Word: values
/// Prototype: object
///
/// Returns the values of the object's own properties in an array.
fn w_values(ctx: &mut Context) {
    let Some(object) = ctx.pop_object() else {
        return;
    };
    let values: Vec<ValueRef> = object.properties().values().cloned().collect();

    ctx.push(Some(Value::Object(object)));
    ctx.push_array(values);
}

/// Word: has?
/// Prototype: object
///
/// Takes:
/// - string
/// - object
///
/// Gives:
/// - object
/// - boolean
///
/// Tests whether the object itself carries a property with given name.
fn w_has(ctx: &mut Context) {
    let Some(object) = ctx.pop_object() else {
        return;
    };
    let Some(name) = ctx.pop_string() else { return };
    let result = object.own_property(&name.to_string()).is_some();

    ctx.push(Some(Value::Object(object)));
    ctx.push_boolean(result);
}

/// Word: @
/// Prototype: object
///
/// Takes:
/// - string
/// - object
///
/// Gives:
/// - object
/// - any
///
/// Retrieves a property with given name from the object or its
/// prototype chain. A missing property gives a range error.
fn w_get(ctx: &mut Context) {
    let Some(object) = ctx.pop_object() else {
        return;
    };
    let Some(name) = ctx.pop_string() else { return };
    let name = name.to_string();
    let runtime = Rc::clone(ctx.runtime());
    let property = object.property(&runtime, &name, true);

    ctx.push(Some(Value::Object(object)));
    match property {
        Some(value) => ctx.push(value),
        None => ctx.set_error(ErrorCode::Range, format!("No such property: `{name}'.")),
    }
}

/// Word: !
/// Prototype: object
///
/// Takes:
/// - any
/// - string
/// - object
///
/// Gives:
/// - object
///
/// Returns a copy of the object with one property added or replaced.
fn w_set(ctx: &mut Context) {
    let Some(object) = ctx.pop_object() else {
        return;
    };
    let Some(name) = ctx.pop_string() else { return };
    let Some(value) = ctx.pop() else { return };
    let updated = object.with_property(name.to_string(), value);

    ctx.push(Some(Value::Object(Rc::new(updated))));
}

pub(crate) fn object_prototype() -> PrototypeDefinition {
    vec![
        ("keys", w_keys as crate::value::NativeWord),
        ("values", w_values),
        ("has?", w_has),
        ("@", w_get),
        ("!", w_set),
    ]
}
