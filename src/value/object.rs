//! Object values

use crate::runtime::Runtime;
use crate::value::{Value, ValueRef};
use std::collections::HashMap;
use std::rc::Rc;

/// Name of the property that overrides an object's prototype.
pub const PROTO_PROPERTY: &str = "__proto__";

/// Upper bound on prototype chain traversal. A `__proto__` chain longer
/// than this is treated as ending at the runtime's object prototype.
pub const PROTOTYPE_DEPTH_LIMIT: usize = 32;

/// An immutable mapping from Unicode string to value. Mutation is
/// functional: it allocates a new object.
#[derive(Debug, Default)]
pub struct Object {
    properties: HashMap<String, ValueRef>,
}

impl Object {
    pub fn new(properties: HashMap<String, ValueRef>) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &HashMap<String, ValueRef> {
        &self.properties
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Property of the object itself, ignoring the prototype chain.
    pub fn own_property(&self, name: &str) -> Option<ValueRef> {
        self.properties.get(name).cloned()
    }

    /// Retrieves a property from the object or, when `inherited` is set,
    /// from its prototype chain. The chain is followed through object
    /// `__proto__` links only, up to [`PROTOTYPE_DEPTH_LIMIT`].
    pub fn property(&self, runtime: &Runtime, name: &str, inherited: bool) -> Option<ValueRef> {
        if let Some(value) = self.own_property(name) {
            return Some(value);
        }
        if !inherited {
            return None;
        }

        let mut current = self.prototype(runtime);

        for _ in 0..PROTOTYPE_DEPTH_LIMIT {
            if let Some(value) = current.own_property(name) {
                return Some(value);
            }
            let next = current.prototype(runtime);

            if Rc::ptr_eq(&next, &current) {
                break;
            }
            current = next;
        }

        None
    }

    /// Prototype of the object: its own `__proto__` property when that is
    /// an object, the runtime's object prototype otherwise.
    pub fn prototype(&self, runtime: &Runtime) -> Rc<Object> {
        match self.properties.get(PROTO_PROPERTY) {
            Some(Some(Value::Object(proto))) => Rc::clone(proto),
            _ => runtime.object_prototype(),
        }
    }

    /// Functional update: a new object with one property added or
    /// replaced.
    pub fn with_property(&self, name: impl Into<String>, value: ValueRef) -> Object {
        let mut properties = self.properties.clone();

        properties.insert(name.into(), value);
        Object::new(properties)
    }
}

/// Objects compare by key set with pairwise equal values.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        if self.properties.len() != other.properties.len() {
            return false;
        }
        self.properties.iter().all(|(key, value)| {
            other
                .properties
                .get(key)
                .is_some_and(|theirs| crate::value::equals(value, theirs))
        })
    }
}
