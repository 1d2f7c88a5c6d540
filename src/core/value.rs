//! Dynamic value graph.
//!
//! Objects (`List`, `Record`, `Date`, `Pattern`, `Host`, `Callable`) are
//! shared handles: cloning a `Value` with `Clone` copies the handle, not the
//! object, so two values may alias the same list or record. Use
//! [`crate::clone::deep_clone`] for an independent copy.

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::number::display_number;

#[derive(Clone, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Callable(Callable),
    List(List),
    Record(Record),
    Date(Date),
    Pattern(Pattern),
    Host(Rc<dyn HostObject>),
}

impl Value {
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(List::from_values(items))
    }

    pub fn record<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Record(Record::from_entries(entries))
    }

    pub fn date(instant: DateTime<Utc>) -> Self {
        Value::Date(Date::new(instant))
    }

    pub fn callable(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Value::Callable(Callable::new(f))
    }

    pub fn host(object: impl HostObject + 'static) -> Self {
        Value::Host(Rc::new(object))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Callable(_) => "callable",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Date(_) => "date",
            Value::Pattern(_) => "pattern",
            Value::Host(_) => "host",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Objects are everything with identity except callables.
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            Value::List(_) | Value::Record(_) | Value::Date(_) | Value::Pattern(_) | Value::Host(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Value::Date(date) => Some(date),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Value::Pattern(pattern) => Some(pattern),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(f) => Some(f),
            _ => None,
        }
    }

    /// Same handle for objects and callables; never true for primitives.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Record(a), Value::Record(b)) => a.ptr_eq(b),
            (Value::Date(a), Value::Date(b)) => a.ptr_eq(b),
            (Value::Pattern(a), Value::Pattern(b)) => a.ptr_eq(b),
            (Value::Host(a), Value::Host(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Identity for objects, value equality for primitives. NaN is never
    /// strictly equal to anything.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => self.ptr_eq(other),
        }
    }
}

/// Structural equality. Does not terminate on cyclic graphs.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a.ptr_eq(b) || *a.items() == *b.items(),
            (Value::Record(a), Value::Record(b)) => {
                a.ptr_eq(b)
                    || (a.class_name() == b.class_name()
                        && a.enumerable_entries() == b.enumerable_entries())
            }
            (Value::Date(a), Value::Date(b)) => a.instant() == b.instant(),
            (Value::Pattern(a), Value::Pattern(b)) => {
                a.source() == b.source() && a.flags() == b.flags()
            }
            (Value::Host(a), Value::Host(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", display_number(*n)),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Callable(_) => write!(f, "<callable>"),
            Value::List(list) => f.debug_list().entries(list.items().iter()).finish(),
            Value::Record(record) => {
                let mut map = f.debug_map();
                for (key, value) in record.own_entries() {
                    map.entry(&key, &value);
                }
                map.finish()
            }
            Value::Date(date) => write!(f, "Date({})", date.instant().to_rfc3339()),
            Value::Pattern(pattern) => write!(f, "/{}/{}", pattern.source(), pattern.flags()),
            Value::Host(host) => write!(f, "<{}>", host.kind()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

// =============================================================================
// Callable
// =============================================================================

type NativeFn = dyn Fn(&[Value]) -> Value;

#[derive(Clone)]
pub struct Callable(Rc<NativeFn>);

impl Callable {
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Callable(Rc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<callable>")
    }
}

// =============================================================================
// List
// =============================================================================

#[derive(Clone, Default)]
pub struct List(Rc<RefCell<Vec<Value>>>);

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(items: impl IntoIterator<Item = Value>) -> Self {
        List(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Replace the item at `index`, padding with nulls when past the end.
    pub fn set(&self, index: usize, value: Value) {
        let mut items = self.0.borrow_mut();
        if index >= items.len() {
            items.resize(index + 1, Value::Null);
        }
        items[index] = value;
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// =============================================================================
// Records and classes
// =============================================================================

/// A named slot with an enumerability flag. Non-enumerable slots are
/// readable but skipped by enumeration (and therefore by deep cloning).
#[derive(Clone, Debug)]
pub struct Property {
    pub value: Value,
    pub enumerable: bool,
}

impl Property {
    pub fn enumerable(value: Value) -> Self {
        Self {
            value,
            enumerable: true,
        }
    }

    pub fn hidden(value: Value) -> Self {
        Self {
            value,
            enumerable: false,
        }
    }
}

type Constructor = dyn Fn() -> Vec<(String, Property)>;

/// Shared behavior and defaults for records: a prototype property table, an
/// optional parent class, and an optional zero-argument constructor that
/// produces the initial own properties of a new instance.
pub struct Class {
    name: String,
    prototype: Vec<(String, Property)>,
    parent: Option<Rc<Class>>,
    constructor: Option<Box<Constructor>>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prototype: Vec::new(),
            parent: None,
            constructor: None,
        }
    }

    pub fn extends(mut self, parent: Rc<Class>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Add an inherited property.
    pub fn with(mut self, key: impl Into<String>, property: Property) -> Self {
        let key = key.into();
        self.prototype.retain(|(k, _)| *k != key);
        self.prototype.push((key, property));
        self
    }

    pub fn with_constructor(
        mut self,
        constructor: impl Fn() -> Vec<(String, Property)> + 'static,
    ) -> Self {
        self.constructor = Some(Box::new(constructor));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<Class>> {
        self.parent.as_ref()
    }

    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// Look a key up along the prototype chain.
    pub fn lookup(&self, key: &str) -> Option<&Property> {
        let mut class = Some(self);
        while let Some(current) = class {
            if let Some((_, property)) = current.prototype.iter().find(|(k, _)| k == key) {
                return Some(property);
            }
            class = current.parent.as_deref();
        }
        None
    }

    /// Build a new instance with constructor-initialized own properties.
    /// `None` when the class has no constructor.
    pub fn construct(self: &Rc<Self>) -> Option<Record> {
        let constructor = self.constructor.as_ref()?;
        let record = Record::with_class(Rc::clone(self));
        for (key, property) in constructor() {
            record.define(key, property);
        }
        Some(record)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("prototype", &self.prototype)
            .field("parent", &self.parent.as_ref().map(|p| p.name.clone()))
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

#[derive(Default)]
struct RecordData {
    class: Option<Rc<Class>>,
    props: Vec<(String, Property)>,
}

/// Mutable property bag with insertion-ordered own properties.
#[derive(Clone, Default)]
pub struct Record(Rc<RefCell<RecordData>>);

impl Record {
    /// Plain record without a class.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(class: Rc<Class>) -> Self {
        Record(Rc::new(RefCell::new(RecordData {
            class: Some(class),
            props: Vec::new(),
        })))
    }

    pub fn from_entries<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let record = Record::new();
        for (key, value) in entries {
            record.set(key, value);
        }
        record
    }

    pub fn class(&self) -> Option<Rc<Class>> {
        self.0.borrow().class.clone()
    }

    pub fn class_name(&self) -> Option<String> {
        self.0.borrow().class.as_ref().map(|c| c.name.clone())
    }

    /// Own property first, then the class chain.
    pub fn get(&self, key: &str) -> Option<Value> {
        let data = self.0.borrow();
        if let Some((_, property)) = data.props.iter().find(|(k, _)| k == key) {
            return Some(property.value.clone());
        }
        data.class
            .as_ref()
            .and_then(|class| class.lookup(key))
            .map(|property| property.value.clone())
    }

    pub fn has_own(&self, key: &str) -> bool {
        self.0.borrow().props.iter().any(|(k, _)| k == key)
    }

    /// Assign an own property. Keeps the existing enumerability when the
    /// key is already an own property; new keys are enumerable.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let mut data = self.0.borrow_mut();
        if let Some((_, property)) = data.props.iter_mut().find(|(k, _)| *k == key) {
            property.value = value;
        } else {
            data.props.push((key, Property::enumerable(value)));
        }
    }

    /// Define (or redefine) an own property with explicit enumerability.
    pub fn define(&self, key: impl Into<String>, property: Property) {
        let key = key.into();
        let mut data = self.0.borrow_mut();
        if let Some((_, existing)) = data.props.iter_mut().find(|(k, _)| *k == key) {
            *existing = property;
        } else {
            data.props.push((key, property));
        }
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        let mut data = self.0.borrow_mut();
        let index = data.props.iter().position(|(k, _)| k == key)?;
        Some(data.props.remove(index).1.value)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().props.is_empty()
    }

    /// All own properties, enumerable or not, in insertion order.
    pub fn own_entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .props
            .iter()
            .map(|(k, p)| (k.clone(), p.value.clone()))
            .collect()
    }

    /// Enumerable properties: own first, then each class up the chain.
    /// A name is reported once, from the nearest level that defines it, and
    /// a non-enumerable definition hides enumerable ones further up.
    pub fn enumerable_entries(&self) -> Vec<(String, Value)> {
        let data = self.0.borrow();
        let mut seen: Vec<&str> = Vec::new();
        let mut entries = Vec::new();

        for (key, property) in &data.props {
            seen.push(key);
            if property.enumerable {
                entries.push((key.clone(), property.value.clone()));
            }
        }

        let mut class = data.class.as_deref();
        while let Some(current) = class {
            for (key, property) in &current.prototype {
                if seen.contains(&key.as_str()) {
                    continue;
                }
                seen.push(key);
                if property.enumerable {
                    entries.push((key.clone(), property.value.clone()));
                }
            }
            class = current.parent.as_deref();
        }

        entries
    }

    pub fn ptr_eq(&self, other: &Record) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// =============================================================================
// Date
// =============================================================================

/// Mutable instant.
#[derive(Clone)]
pub struct Date(Rc<RefCell<DateTime<Utc>>>);

impl Date {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Date(Rc::new(RefCell::new(instant)))
    }

    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(Self::new)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        *self.0.borrow()
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.0.borrow().timestamp_millis()
    }

    pub fn set_instant(&self, instant: DateTime<Utc>) {
        *self.0.borrow_mut() = instant;
    }

    pub fn ptr_eq(&self, other: &Date) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// =============================================================================
// Pattern
// =============================================================================

#[derive(Debug)]
struct PatternData {
    source: String,
    flags: String,
    regex: Regex,
}

/// Regular expression remembered by its source and flags.
///
/// Flags: `i` case-insensitive, `m` multi-line anchors, `s` dot matches
/// newline, `x` verbose. `g`, `u` and `y` are accepted and kept but do not
/// change matching.
#[derive(Clone, Debug)]
pub struct Pattern(Rc<PatternData>);

impl Pattern {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let flags = flags.into();

        let mut builder = RegexBuilder::new(&source);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'g' | 'u' | 'y' => &mut builder,
                other => {
                    return Err(Error::pattern_invalid(
                        source.clone(),
                        flags.clone(),
                        format!("Unknown flag '{}'", other),
                    ))
                }
            };
        }

        let regex = builder
            .build()
            .map_err(|e| Error::pattern_invalid(source.clone(), flags.clone(), e.to_string()))?;

        Ok(Pattern(Rc::new(PatternData {
            source,
            flags,
            regex,
        })))
    }

    pub fn source(&self) -> &str {
        &self.0.source
    }

    pub fn flags(&self) -> &str {
        &self.0.flags
    }

    pub fn regex(&self) -> &Regex {
        &self.0.regex
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.regex.is_match(text)
    }

    /// A fresh instance with the same source and flags.
    pub fn renew(&self) -> Pattern {
        Pattern(Rc::new(PatternData {
            source: self.0.source.clone(),
            flags: self.0.flags.clone(),
            regex: self.0.regex.clone(),
        }))
    }

    pub fn ptr_eq(&self, other: &Pattern) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// =============================================================================
// Host objects
// =============================================================================

/// Objects owned by an embedding host (document nodes, handles, ...).
pub trait HostObject {
    /// Short type name used in diagnostics and JSON output.
    fn kind(&self) -> &str;

    /// Native copy. `None` when the host offers no clone capability.
    fn clone_node(&self, deep: bool) -> Option<Value> {
        let _ = deep;
        None
    }

    /// Visible fields, used when no native copy exists.
    fn fields(&self) -> Vec<(String, Value)> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_alias_the_same_list() {
        let list = Value::list([Value::from(1), Value::from(2)]);
        let alias = list.clone();
        alias.as_list().unwrap().push(Value::from(3));
        assert_eq!(list.as_list().unwrap().len(), 3);
        assert!(list.ptr_eq(&alias));
    }

    #[test]
    fn strict_eq_is_identity_for_objects() {
        let a = Value::list([]);
        let b = Value::list([]);
        assert!(!a.strict_eq(&b));
        assert_eq!(a, b);
        assert!(a.strict_eq(&a.clone()));
        assert!(Value::from("x").strict_eq(&Value::from("x")));
        assert!(!Value::Number(f64::NAN).strict_eq(&Value::Number(f64::NAN)));
    }

    #[test]
    fn list_set_pads_with_null() {
        let list = List::new();
        list.set(2, Value::from("c"));
        assert_eq!(list.len(), 3);
        assert!(list.get(0).unwrap().is_null());
    }

    #[test]
    fn record_get_walks_class_chain() {
        let base = Rc::new(Class::new("Base").with("greeting", Property::enumerable("hi".into())));
        let derived = Rc::new(
            Class::new("Derived")
                .extends(Rc::clone(&base))
                .with("size", Property::enumerable(3.into())),
        );
        let record = Record::with_class(derived);

        assert_eq!(record.get("greeting"), Some(Value::from("hi")));
        assert_eq!(record.get("size"), Some(Value::from(3)));
        assert!(!record.has_own("size"));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn enumerable_entries_order_and_shadowing() {
        let class = Rc::new(
            Class::new("Thing")
                .with("shared", Property::enumerable("proto".into()))
                .with("method", Property::hidden(Value::callable(|_| Value::Null)))
                .with("tag", Property::enumerable("t".into())),
        );
        let record = Record::with_class(class);
        record.set("own", Value::from(1));
        record.set("shared", Value::from("mine"));
        record.define("secret", Property::hidden(Value::from(2)));

        let keys: Vec<String> = record
            .enumerable_entries()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["own", "shared", "tag"]);
        assert_eq!(record.get("shared"), Some(Value::from("mine")));
        assert_eq!(record.get("secret"), Some(Value::from(2)));
    }

    #[test]
    fn set_keeps_enumerability_of_existing_key() {
        let record = Record::new();
        record.define("hidden", Property::hidden(Value::from(1)));
        record.set("hidden", Value::from(2));
        assert!(record.enumerable_entries().is_empty());
        assert_eq!(record.get("hidden"), Some(Value::from(2)));
    }

    #[test]
    fn construct_requires_constructor() {
        let bare = Rc::new(Class::new("Bare"));
        assert!(bare.construct().is_none());

        let counted = Rc::new(
            Class::new("Counter")
                .with_constructor(|| vec![("count".to_string(), Property::enumerable(0.into()))]),
        );
        let instance = counted.construct().unwrap();
        assert_eq!(instance.class_name().as_deref(), Some("Counter"));
        assert_eq!(instance.get("count"), Some(Value::from(0)));
    }

    #[test]
    fn pattern_flags() {
        let pattern = Pattern::new("^abc$", "im").unwrap();
        assert!(pattern.is_match("x\nABC"));
        assert_eq!(pattern.flags(), "im");

        let err = Pattern::new("abc", "q").unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::PatternInvalid);
        assert!(Pattern::new("(", "").is_err());
    }

    #[test]
    fn date_is_mutable_through_handle() {
        let date = Date::from_millis(1_000).unwrap();
        let alias = date.clone();
        alias.set_instant(DateTime::<Utc>::from_timestamp_millis(5_000).unwrap());
        assert_eq!(date.timestamp_millis(), 5_000);
    }

    #[test]
    fn kinds() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::record(Vec::<(String, Value)>::new()).kind(), "record");
        assert!(Value::date(Utc::now()).is_object());
        assert!(!Value::callable(|_| Value::Null).is_object());
    }
}
