//! Keyed, unique and ordered collections.
//!
//! All three containers preserve insertion order and use interior
//! mutability, so a `Value` handle to a shared collection observes
//! mutations made through any other handle. Maps and sets compare keys
//! and elements with SameValueZero ([`Value::same_value_zero`]): NaN is
//! one key, +0 and −0 are the same key, heap-backed values key by
//! reference identity.
//!
//! Iteration hands out snapshots, so callers may mutate the collection
//! while walking the snapshot without invalidating it.

use std::fmt;

use parking_lot::RwLock;

use crate::value::Value;

/// An ordered sequence of values.
#[derive(Default)]
pub struct ValueList {
    elements: RwLock<Vec<Value>>,
}

impl ValueList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list from existing elements.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            elements: RwLock::new(values),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.read().len()
    }

    /// Check if the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.read().is_empty()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.elements.read().get(index).cloned()
    }

    /// Replace the element at `index`. Returns false when out of bounds.
    pub fn set(&self, index: usize, value: Value) -> bool {
        let mut elements = self.elements.write();
        match elements.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Append an element.
    pub fn push(&self, value: Value) {
        self.elements.write().push(value);
    }

    /// Remove and return the last element.
    pub fn pop(&self) -> Option<Value> {
        self.elements.write().pop()
    }

    /// Snapshot of the elements in order.
    pub fn to_vec(&self) -> Vec<Value> {
        self.elements.read().clone()
    }
}

impl fmt::Debug for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List(len={})", self.len())
    }
}

/// A keyed collection with unique keys in insertion order.
#[derive(Default)]
pub struct ValueMap {
    entries: RwLock<Vec<(Value, Value)>>,
}

impl ValueMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &Value) -> Option<Value> {
        self.entries
            .read()
            .iter()
            .find(|(k, _)| k.same_value_zero(key))
            .map(|(_, v)| v.clone())
    }

    /// Check if `key` is present.
    pub fn has(&self, key: &Value) -> bool {
        self.entries
            .read()
            .iter()
            .any(|(k, _)| k.same_value_zero(key))
    }

    /// Insert or overwrite an entry, returning the replaced value.
    ///
    /// Overwriting keeps the entry's position and its original key.
    pub fn insert(&self, key: Value, value: Value) -> Option<Value> {
        let mut entries = self.entries.write();
        match entries.iter().position(|(k, _)| k.same_value_zero(&key)) {
            Some(index) => Some(std::mem::replace(&mut entries[index].1, value)),
            None => {
                entries.push((key, value));
                None
            }
        }
    }

    /// Remove the entry under `key`. Returns true when something was removed.
    pub fn delete(&self, key: &Value) -> bool {
        let mut entries = self.entries.write();
        match entries.iter().position(|(k, _)| k.same_value_zero(key)) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.entries.read().clone()
    }

    /// Snapshot of the keys in insertion order.
    pub fn keys(&self) -> Vec<Value> {
        self.entries.read().iter().map(|(k, _)| k.clone()).collect()
    }
}

impl fmt::Debug for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Map(size={})", self.len())
    }
}

/// A collection of unique values in insertion order.
#[derive(Default)]
pub struct ValueSet {
    elements: RwLock<Vec<Value>>,
}

impl ValueSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.read().len()
    }

    /// Check if the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.read().is_empty()
    }

    /// Check if `value` is present.
    pub fn has(&self, value: &Value) -> bool {
        self.elements
            .read()
            .iter()
            .any(|v| v.same_value_zero(value))
    }

    /// Add `value` if absent. Returns true when it was newly inserted.
    pub fn add(&self, value: Value) -> bool {
        let mut elements = self.elements.write();
        if elements.iter().any(|v| v.same_value_zero(&value)) {
            return false;
        }
        elements.push(value);
        true
    }

    /// Remove `value`. Returns true when something was removed.
    pub fn delete(&self, value: &Value) -> bool {
        let mut elements = self.elements.write();
        match elements.iter().position(|v| v.same_value_zero(value)) {
            Some(index) => {
                elements.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every element.
    pub fn clear(&self) {
        self.elements.write().clear();
    }

    /// Snapshot of the elements in insertion order.
    pub fn values(&self) -> Vec<Value> {
        self.elements.read().clone()
    }
}

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Set(size={})", self.len())
    }
}
