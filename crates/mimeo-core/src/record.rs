//! Generic records with named and symbol-keyed properties.
//!
//! A [`Record`] holds its own properties in insertion order and may
//! inherit from a prototype record fixed at construction. Lookup walks
//! the prototype chain; mutation always targets own properties, and
//! enumeration ([`Record::own_keys`]) never reaches into the chain.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::value::{Symbol, Value};

/// Key of a record property: a name or a symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// Text-named property.
    Name(Arc<str>),
    /// Symbol-keyed property.
    Symbol(Arc<Symbol>),
}

impl PropertyKey {
    /// Create a named key.
    pub fn name(name: impl Into<Arc<str>>) -> Self {
        PropertyKey::Name(name.into())
    }

    /// Create a symbol key.
    pub fn symbol(symbol: Arc<Symbol>) -> Self {
        PropertyKey::Symbol(symbol)
    }

    /// The name, if this is a named key.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            PropertyKey::Name(name) => Some(name.as_ref()),
            PropertyKey::Symbol(_) => None,
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        PropertyKey::Name(Arc::from(name))
    }
}

/// A record of own properties plus an optional prototype.
#[derive(Default)]
pub struct Record {
    properties: RwLock<IndexMap<PropertyKey, Value>>,
    prototype: Option<Arc<Record>>,
}

impl Record {
    /// Create an empty record with no prototype.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record inheriting from `prototype`.
    pub fn with_prototype(prototype: Arc<Record>) -> Self {
        Self {
            properties: RwLock::new(IndexMap::new()),
            prototype: Some(prototype),
        }
    }

    /// The prototype record, if any.
    pub fn prototype(&self) -> Option<&Arc<Record>> {
        self.prototype.as_ref()
    }

    /// Look up a property, walking the prototype chain.
    pub fn get(&self, key: &PropertyKey) -> Option<Value> {
        if let Some(value) = self.get_own(key) {
            return Some(value);
        }
        let mut current = self.prototype.clone();
        while let Some(record) = current {
            if let Some(value) = record.get_own(key) {
                return Some(value);
            }
            current = record.prototype.clone();
        }
        None
    }

    /// Look up an own property only.
    pub fn get_own(&self, key: &PropertyKey) -> Option<Value> {
        self.properties.read().get(key).cloned()
    }

    /// Set an own property. Overwriting keeps the property's position.
    pub fn set(&self, key: PropertyKey, value: Value) {
        self.properties.write().insert(key, value);
    }

    /// Delete an own property, preserving the order of the rest.
    /// Returns true when something was removed.
    pub fn delete(&self, key: &PropertyKey) -> bool {
        self.properties.write().shift_remove(key).is_some()
    }

    /// Check for a property anywhere on the chain.
    pub fn has(&self, key: &PropertyKey) -> bool {
        self.get(key).is_some()
    }

    /// Check for an own property.
    pub fn has_own(&self, key: &PropertyKey) -> bool {
        self.properties.read().contains_key(key)
    }

    /// Snapshot of the own property keys in insertion order.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.properties.read().keys().cloned().collect()
    }

    /// Snapshot of the own properties in insertion order.
    pub fn own_entries(&self) -> Vec<(PropertyKey, Value)> {
        self.properties
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of own properties.
    pub fn len(&self) -> usize {
        self.properties.read().len()
    }

    /// Check if the record has no own properties.
    pub fn is_empty(&self) -> bool {
        self.properties.read().is_empty()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record(props={})", self.len())
    }
}
