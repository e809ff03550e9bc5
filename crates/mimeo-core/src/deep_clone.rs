//! Deep copying of values.
//!
//! [`deep_clone`] walks a value graph and builds an isomorphic copy.
//! Scalars and foreign handles pass through, timestamps and patterns are
//! duplicated, and the four composite kinds are rebuilt entry by entry.
//! Every composite is registered in a visited map keyed by allocation
//! address before its contents are walked, so cycles terminate and a
//! value reachable along two paths comes out as one shared copy.
//!
//! Cloning never mutates the input and never fails.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::collections::{ValueList, ValueMap, ValueSet};
use crate::record::Record;
use crate::timestamp::Timestamp;
use crate::value::Value;

/// A visited-map slot: the finished copy plus a handle that keeps the
/// source allocation alive while the cloner can still meet its address.
struct VisitedSlot {
    _source: Value,
    copy: Value,
}

/// Reusable deep-clone context.
///
/// The visited map lives as long as the cloner, so cloning several values
/// through one `DeepCloner` preserves sharing across those calls too.
#[derive(Default)]
pub struct DeepCloner {
    visited: FxHashMap<usize, VisitedSlot>,
}

impl DeepCloner {
    /// Create a cloner with an empty visited map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep copy a value.
    pub fn clone_value(&mut self, value: &Value) -> Value {
        match value {
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Text(_)
            | Value::Symbol(_) => value.clone(),
            Value::Timestamp(ts) => Value::timestamp(Timestamp::from_millis(ts.millis())),
            Value::Pattern(p) => Value::pattern(p.fresh()),
            Value::Map(map) => self.clone_map(map),
            Value::Set(set) => self.clone_set(set),
            Value::List(list) => self.clone_list(list),
            Value::Record(record) => self.clone_record(record),
            Value::Foreign(_) => value.clone(),
        }
    }

    fn clone_map(&mut self, source: &Arc<ValueMap>) -> Value {
        let ptr = Arc::as_ptr(source) as usize;
        if let Some(copy) = self.lookup(ptr) {
            return copy;
        }
        let target = Arc::new(ValueMap::new());
        let result = Value::Map(target.clone());
        self.remember(ptr, Value::Map(source.clone()), result.clone());
        for (key, value) in source.entries() {
            target.insert(self.clone_value(&key), self.clone_value(&value));
        }
        result
    }

    fn clone_set(&mut self, source: &Arc<ValueSet>) -> Value {
        let ptr = Arc::as_ptr(source) as usize;
        if let Some(copy) = self.lookup(ptr) {
            return copy;
        }
        let target = Arc::new(ValueSet::new());
        let result = Value::Set(target.clone());
        self.remember(ptr, Value::Set(source.clone()), result.clone());
        for value in source.values() {
            target.add(self.clone_value(&value));
        }
        result
    }

    fn clone_list(&mut self, source: &Arc<ValueList>) -> Value {
        let ptr = Arc::as_ptr(source) as usize;
        if let Some(copy) = self.lookup(ptr) {
            return copy;
        }
        let target = Arc::new(ValueList::new());
        let result = Value::List(target.clone());
        self.remember(ptr, Value::List(source.clone()), result.clone());
        for value in source.to_vec() {
            target.push(self.clone_value(&value));
        }
        result
    }

    fn clone_record(&mut self, source: &Arc<Record>) -> Value {
        let ptr = Arc::as_ptr(source) as usize;
        if let Some(copy) = self.lookup(ptr) {
            return copy;
        }
        let target = Arc::new(Record::new());
        let result = Value::Record(target.clone());
        self.remember(ptr, Value::Record(source.clone()), result.clone());
        for key in source.own_keys() {
            if let Some(value) = source.get_own(&key) {
                target.set(key, self.clone_value(&value));
            }
        }
        result
    }

    fn lookup(&self, ptr: usize) -> Option<Value> {
        let slot = self.visited.get(&ptr)?;
        #[cfg(feature = "clone_logging")]
        tracing::trace!(
            target: "mimeo::clone",
            ptr,
            "shared reference resolved from visited map"
        );
        Some(slot.copy.clone())
    }

    fn remember(&mut self, ptr: usize, source: Value, copy: Value) {
        self.visited.insert(ptr, VisitedSlot { _source: source, copy });
    }
}

/// Deep copy a value with a fresh cloner.
pub fn deep_clone(value: &Value) -> Value {
    let mut cloner = DeepCloner::new();
    let result = cloner.clone_value(value);
    #[cfg(feature = "clone_logging")]
    tracing::debug!(
        target: "mimeo::clone",
        composites = cloner.visited.len(),
        "deep clone finished"
    );
    result
}
