//! Insertion-ordered, freezable dictionaries.
//!
//! Entries live in a `Vec` in insertion order with an `FxHashMap` index from
//! key to slot. Assigning to an existing key replaces the value in place and
//! keeps its position. There is no removal, so slots never shift.

use num_bigint::BigInt;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{Heap, Value};
use crate::errors::{frozen_value, unhashable, EvalError};

/// A hashable dictionary key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DictKey {
    None,
    Bool(bool),
    Int(BigInt),
    Str(String),
}

impl DictKey {
    /// Convert a value to a key; only `None`, bools, ints and strings hash.
    pub fn from_value(value: &Value) -> Result<DictKey, EvalError> {
        match value {
            Value::None => Ok(DictKey::None),
            Value::Bool(b) => Ok(DictKey::Bool(*b)),
            Value::Int(n) => Ok(DictKey::Int(n.clone())),
            Value::Str(s) => Ok(DictKey::Str(s.to_string())),
            other => Err(unhashable(other.type_name())),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            DictKey::None => Value::None,
            DictKey::Bool(b) => Value::Bool(*b),
            DictKey::Int(n) => Value::Int(n.clone()),
            DictKey::Str(s) => Value::string(s.as_str()),
        }
    }
}

impl From<&str> for DictKey {
    fn from(s: &str) -> Self {
        DictKey::Str(s.to_string())
    }
}

impl From<String> for DictKey {
    fn from(s: String) -> Self {
        DictKey::Str(s)
    }
}

#[derive(Default)]
struct DictData {
    entries: Vec<(DictKey, Value)>,
    index: FxHashMap<DictKey, usize>,
    frozen: bool,
}

impl DictData {
    fn insert(&mut self, key: DictKey, value: Value) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 = value;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }
}

/// A dictionary shared by reference.
#[derive(Clone)]
pub struct DictValue(Heap<RwLock<DictData>>);

impl DictValue {
    pub(super) fn from_entries(entries: impl IntoIterator<Item = (DictKey, Value)>) -> Self {
        let mut data = DictData::default();
        for (key, value) in entries {
            data.insert(key, value);
        }
        DictValue(Heap::new(RwLock::new(data)))
    }

    pub fn len(&self) -> usize {
        self.0.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_frozen(&self) -> bool {
        self.0.read().frozen
    }

    pub fn get(&self, key: &DictKey) -> Option<Value> {
        let data = self.0.read();
        data.index.get(key).map(|&slot| data.entries[slot].1.clone())
    }

    pub fn contains_key(&self, key: &DictKey) -> bool {
        self.0.read().index.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<DictKey> {
        self.0.read().entries.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> Vec<(DictKey, Value)> {
        self.0.read().entries.clone()
    }

    pub fn insert(&self, key: DictKey, value: Value) -> Result<(), EvalError> {
        let mut data = self.0.write();
        if data.frozen {
            return Err(frozen_value("dict"));
        }
        data.insert(key, value);
        Ok(())
    }

    pub(super) fn freeze_shallow(&self) -> Option<Vec<Value>> {
        let mut data = self.0.write();
        if data.frozen {
            return None;
        }
        data.frozen = true;
        Some(data.entries.iter().map(|(_, v)| v.clone()).collect())
    }

    pub(super) fn ptr_eq(&self, other: &DictValue) -> bool {
        Heap::ptr_eq(&self.0, &other.0)
    }

    pub(super) fn addr(&self) -> usize {
        self.0.addr()
    }
}
