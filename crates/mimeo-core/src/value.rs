//! The dynamic value universe.
//!
//! `Value` is a closed tagged enum over every kind the library recognizes.
//! Scalars are stored inline; everything heap-backed sits behind an `Arc`,
//! so `Value::clone` is a refcount bump and two values can share one
//! allocation. Reference identity (`ptr_eq`, `identity`) is defined by that
//! allocation, which is what the deep cloner keys its visited map on.
//!
//! Kind classification is total: every value belongs to exactly one
//! [`ValueKind`], checked in declaration order by the cloner.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::collections::{ValueList, ValueMap, ValueSet};
use crate::pattern::Pattern;
use crate::record::Record;
use crate::timestamp::Timestamp;

/// A dynamically-typed value.
///
/// This type is `Send + Sync`: scalars are immutable and all mutable storage
/// is behind `Arc` + lock.
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar (IEEE 754 double, like the host model it mirrors).
    Number(f64),
    /// Immutable text scalar.
    Text(Arc<str>),
    /// Symbolic atom; compared and hashed by its process-unique id.
    Symbol(Arc<Symbol>),
    /// Date/time instant (milliseconds since the Unix epoch).
    Timestamp(Arc<Timestamp>),
    /// Compiled text-matching pattern.
    Pattern(Arc<Pattern>),
    /// Keyed collection: unique keys, insertion-ordered.
    Map(Arc<ValueMap>),
    /// Unique collection: unique elements, insertion-ordered.
    Set(Arc<ValueSet>),
    /// Ordered sequence: dense, integer-indexed.
    List(Arc<ValueList>),
    /// Generic record: named and symbol-keyed own properties.
    Record(Arc<Record>),
    /// Opaque host-provided value; the catch-all for everything else.
    Foreign(Arc<dyn ForeignValue>),
}

/// The kind of a [`Value`], in classification priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Absence of a value.
    Null,
    /// Boolean scalar.
    Bool,
    /// Numeric scalar.
    Number,
    /// Text scalar.
    Text,
    /// Symbolic atom.
    Symbol,
    /// Date/time instant.
    Timestamp,
    /// Compiled pattern.
    Pattern,
    /// Keyed collection.
    Map,
    /// Unique collection.
    Set,
    /// Ordered sequence.
    List,
    /// Generic record.
    Record,
    /// Opaque host value.
    Foreign,
}

impl ValueKind {
    /// Lowercase kind label, for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::Text => "text",
            ValueKind::Symbol => "symbol",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Pattern => "pattern",
            ValueKind::Map => "map",
            ValueKind::Set => "set",
            ValueKind::List => "list",
            ValueKind::Record => "record",
            ValueKind::Foreign => "foreign",
        }
    }
}

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// A symbolic atom.
///
/// Every symbol created through [`Symbol::new`] gets a fresh id; two symbols
/// are the same atom exactly when their ids match, regardless of description.
pub struct Symbol {
    description: Option<Arc<str>>,
    id: u64,
}

impl Symbol {
    /// Create a new, globally distinct symbol.
    pub fn new(description: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            description: description.map(Arc::from),
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Optional human-readable description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Process-unique id.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "Symbol({desc})"),
            None => write!(f, "Symbol()"),
        }
    }
}

/// An opaque value supplied by the embedding host.
///
/// The library cannot see inside a foreign value: the deep cloner copies the
/// handle itself and the payload stays shared between original and clone.
pub trait ForeignValue: Any + fmt::Debug + Send + Sync {
    /// Downcasting hook for hosts that need their concrete type back.
    fn as_any(&self) -> &dyn Any;
}

impl Value {
    /// Create the null value.
    pub const fn null() -> Self {
        Value::Null
    }

    /// Create a boolean value.
    pub const fn boolean(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create a number value.
    pub const fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Create a text value.
    pub fn text(s: impl Into<Arc<str>>) -> Self {
        Value::Text(s.into())
    }

    /// Create a symbol value.
    pub fn symbol(symbol: Arc<Symbol>) -> Self {
        Value::Symbol(symbol)
    }

    /// Create a timestamp value.
    pub fn timestamp(timestamp: Timestamp) -> Self {
        Value::Timestamp(Arc::new(timestamp))
    }

    /// Create a pattern value.
    pub fn pattern(pattern: Pattern) -> Self {
        Value::Pattern(Arc::new(pattern))
    }

    /// Create an empty map value.
    pub fn map() -> Self {
        Value::Map(Arc::new(ValueMap::new()))
    }

    /// Create an empty set value.
    pub fn set() -> Self {
        Value::Set(Arc::new(ValueSet::new()))
    }

    /// Create an empty list value.
    pub fn list() -> Self {
        Value::List(Arc::new(ValueList::new()))
    }

    /// Create a list value from existing elements.
    pub fn list_from(values: Vec<Value>) -> Self {
        Value::List(Arc::new(ValueList::from_values(values)))
    }

    /// Create an empty record value with no prototype.
    pub fn record() -> Self {
        Value::Record(Arc::new(Record::new()))
    }

    /// Create an empty record value inheriting from `prototype`.
    pub fn record_with_prototype(prototype: Arc<Record>) -> Self {
        Value::Record(Arc::new(Record::with_prototype(prototype)))
    }

    /// Wrap an opaque host value.
    pub fn foreign(handle: Arc<dyn ForeignValue>) -> Self {
        Value::Foreign(handle)
    }

    /// Classify this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
            Value::Symbol(_) => ValueKind::Symbol,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::Pattern(_) => ValueKind::Pattern,
            Value::Map(_) => ValueKind::Map,
            Value::Set(_) => ValueKind::Set,
            Value::List(_) => ValueKind::List,
            Value::Record(_) => ValueKind::Record,
            Value::Foreign(_) => ValueKind::Foreign,
        }
    }

    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is a boolean.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Check if value is a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Check if value is text.
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Check if value is a symbol.
    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    /// Check if value is a timestamp.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    /// Check if value is a pattern.
    pub fn is_pattern(&self) -> bool {
        matches!(self, Value::Pattern(_))
    }

    /// Check if value is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if value is a set.
    pub fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    /// Check if value is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Check if value is a record.
    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Check if value is a foreign handle.
    pub fn is_foreign(&self) -> bool {
        matches!(self, Value::Foreign(_))
    }

    /// Check if value is one of the container kinds that can hold further
    /// values (map, set, list or record), and therefore appear in cycles.
    pub fn is_composite(&self) -> bool {
        self.identity().is_some()
    }

    /// Get as boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Get as symbol.
    pub fn as_symbol(&self) -> Option<&Arc<Symbol>> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Get as timestamp.
    pub fn as_timestamp(&self) -> Option<&Arc<Timestamp>> {
        match self {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Get as pattern.
    pub fn as_pattern(&self) -> Option<&Arc<Pattern>> {
        match self {
            Value::Pattern(p) => Some(p),
            _ => None,
        }
    }

    /// Get as map.
    pub fn as_map(&self) -> Option<&Arc<ValueMap>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get as set.
    pub fn as_set(&self) -> Option<&Arc<ValueSet>> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Get as list.
    pub fn as_list(&self) -> Option<&Arc<ValueList>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get as record.
    pub fn as_record(&self) -> Option<&Arc<Record>> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Get as foreign handle.
    pub fn as_foreign(&self) -> Option<&Arc<dyn ForeignValue>> {
        match self {
            Value::Foreign(h) => Some(h),
            _ => None,
        }
    }

    /// Address of the backing allocation for the composite kinds.
    ///
    /// Only maps, sets, lists and records have an identity here: they are
    /// the kinds that can reach other values and so the only ones the deep
    /// cloner must recognize when it meets them again.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Map(m) => Some(Arc::as_ptr(m) as usize),
            Value::Set(s) => Some(Arc::as_ptr(s) as usize),
            Value::List(l) => Some(Arc::as_ptr(l) as usize),
            Value::Record(r) => Some(Arc::as_ptr(r) as usize),
            _ => None,
        }
    }

    /// Reference identity: true when both values are backed by the same
    /// heap allocation. Always false for scalar kinds.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => Arc::ptr_eq(a, b),
            (Value::Symbol(a), Value::Symbol(b)) => Arc::ptr_eq(a, b),
            (Value::Timestamp(a), Value::Timestamp(b)) => Arc::ptr_eq(a, b),
            (Value::Pattern(a), Value::Pattern(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            (Value::Set(a), Value::Set(b)) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b),
            (Value::Foreign(a), Value::Foreign(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// SameValueZero equivalence, the key discipline for maps and sets:
    /// like `==` except NaN equals NaN (and +0 equals −0 in both).
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a == b
            }
            _ => self == other,
        }
    }
}

impl PartialEq for Value {
    /// Host-style equality: scalars by value (NaN ≠ NaN), text by content,
    /// symbols by id, heap-backed kinds by reference identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a.id() == b.id(),
            _ => self.ptr_eq(other),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Text(s) => write!(f, "Text({s:?})"),
            Value::Symbol(s) => write!(f, "{s:?}"),
            Value::Timestamp(ts) => write!(f, "{ts:?}"),
            Value::Pattern(p) => write!(f, "{p:?}"),
            Value::Map(m) => write!(f, "{m:?}"),
            Value::Set(s) => write!(f, "{s:?}"),
            Value::List(l) => write!(f, "{l:?}"),
            Value::Record(r) => write!(f, "{r:?}"),
            Value::Foreign(h) => write!(f, "Foreign({h:?})"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Arc::from(s))
    }
}
