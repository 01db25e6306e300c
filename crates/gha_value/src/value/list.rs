//! Shared, freezable list storage.

use parking_lot::RwLock;

use super::{Heap, Value};
use crate::errors::{frozen_value, index_out_of_bounds, EvalError};

struct ListData {
    items: Vec<Value>,
    frozen: bool,
}

/// A list shared by reference: every alias observes mutations.
#[derive(Clone)]
pub struct ListValue(Heap<RwLock<ListData>>);

impl ListValue {
    pub(super) fn new(items: Vec<Value>) -> Self {
        ListValue(Heap::new(RwLock::new(ListData {
            items,
            frozen: false,
        })))
    }

    pub fn len(&self) -> usize {
        self.0.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_frozen(&self) -> bool {
        self.0.read().frozen
    }

    /// Element at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().items.get(index).cloned()
    }

    /// A copy of the current elements. Elements themselves stay shared.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.read().items.clone()
    }

    pub fn push(&self, value: Value) -> Result<(), EvalError> {
        let mut data = self.0.write();
        if data.frozen {
            return Err(frozen_value("list"));
        }
        data.items.push(value);
        Ok(())
    }

    pub fn set(&self, index: usize, value: Value) -> Result<(), EvalError> {
        let mut data = self.0.write();
        if data.frozen {
            return Err(frozen_value("list"));
        }
        let len = data.items.len();
        match data.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(index_out_of_bounds(index, len)),
        }
    }

    /// Mark this list frozen. Returns the elements to freeze next, or `None`
    /// when it was already frozen (which also terminates cycles).
    pub(super) fn freeze_shallow(&self) -> Option<Vec<Value>> {
        let mut data = self.0.write();
        if data.frozen {
            return None;
        }
        data.frozen = true;
        Some(data.items.clone())
    }

    pub(super) fn ptr_eq(&self, other: &ListValue) -> bool {
        Heap::ptr_eq(&self.0, &other.0)
    }

    pub(super) fn addr(&self) -> usize {
        self.0.addr()
    }
}
