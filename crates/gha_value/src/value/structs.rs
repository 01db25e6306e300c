//! Immutable records: structs and modules.

use std::collections::BTreeMap;

use super::{Heap, Value};

/// A named, immutable record with fields sorted by name.
#[derive(Clone)]
pub struct StructValue {
    name: Heap<String>,
    fields: Heap<Vec<(String, Value)>>,
}

impl StructValue {
    pub(super) fn new(name: impl Into<String>, mut fields: Vec<(String, Value)>) -> Self {
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        fields.dedup_by(|later, earlier| later.0 == earlier.0);
        StructValue {
            name: Heap::new(name.into()),
            fields: Heap::new(fields),
        }
    }

    /// Constructor name shown when the struct is printed.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .binary_search_by(|(field, _)| field.as_str().cmp(name))
            .ok()
            .map(|slot| &self.fields[slot].1)
    }

    /// Fields in name order.
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }
}

/// A named namespace of members, immutable once built.
#[derive(Clone)]
pub struct ModuleValue {
    name: Heap<String>,
    members: Heap<BTreeMap<String, Value>>,
}

impl ModuleValue {
    pub(super) fn new(name: impl Into<String>, members: BTreeMap<String, Value>) -> Self {
        ModuleValue {
            name: Heap::new(name.into()),
            members: Heap::new(members),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    /// Member names in sorted order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub(super) fn ptr_eq(&self, other: &ModuleValue) -> bool {
        Heap::ptr_eq(&self.members, &other.members)
    }
}
