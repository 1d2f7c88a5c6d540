//! Deep structural cloning of [`Value`] graphs.
//!
//! Dispatch order:
//! 1. primitives and callables are returned as is;
//! 2. host objects use their native `clone_node(true)`, or are copied field by
//!    field (shallow) into a plain record when they have none;
//! 3. dates become new dates at the same instant;
//! 4. patterns become new patterns from the same source and flags;
//! 5. lists and records are rebuilt and every enumerable entry is cloned.
//!
//! There is no cycle detection. A graph that reaches itself recurses until
//! the stack overflows.

use std::rc::Rc;

use crate::value::{HostObject, List, Record, Value};

/// Types that can produce an independent deep copy of themselves.
pub trait DeepClone {
    fn deep_clone(&self) -> Self;
}

impl DeepClone for Value {
    fn deep_clone(&self) -> Self {
        deep_clone(self)
    }
}

impl DeepClone for List {
    fn deep_clone(&self) -> Self {
        clone_list(self)
    }
}

impl DeepClone for Record {
    fn deep_clone(&self) -> Self {
        clone_record(self)
    }
}

/// Produce an independent copy of `value`.
///
/// Must not be called on self-referential graphs.
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::Text(_)
        | Value::Callable(_) => value.clone(),
        Value::Host(host) => clone_host(host),
        Value::Date(date) => Value::date(date.instant()),
        Value::Pattern(pattern) => Value::Pattern(pattern.renew()),
        Value::List(list) => Value::List(clone_list(list)),
        Value::Record(record) => Value::Record(clone_record(record)),
    }
}

fn clone_host(host: &Rc<dyn HostObject>) -> Value {
    if let Some(copy) = host.clone_node(true) {
        return copy;
    }

    let record = Record::new();
    for (key, value) in host.fields() {
        record.set(key, value);
    }
    Value::Record(record)
}

fn clone_list(list: &List) -> List {
    // No borrow may be held across recursion: clone_node can read this list.
    let items: Vec<Value> = list.items().clone();
    List::from_values(items.iter().map(deep_clone))
}

fn clone_record(record: &Record) -> Record {
    let fresh = record
        .class()
        .and_then(|class| class.construct())
        .unwrap_or_default();

    for (key, value) in record.enumerable_entries() {
        if let Some(existing) = fresh.get(&key) {
            if existing.strict_eq(&value) {
                continue;
            }
        }
        fresh.set(key, deep_clone(&value));
    }

    fresh
}
