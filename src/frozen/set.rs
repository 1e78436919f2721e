use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::value::display::write_joined;
use crate::value::{unordered_hash, Set, Value};

/// Immutable set of hashable values
///
/// Equality and hashing ignore insertion order, so frozen sets can be nested
/// inside other frozen sets.
#[derive(Clone)]
pub struct FrozenSet {
    items: Arc<Set>,
    deep: bool,
}

impl FrozenSet {
    /// Wrap items that have been frozen and checked for hashability
    pub(crate) fn from_items(items: Set) -> Self {
        let deep = items.iter().all(Value::is_deeply_frozen);
        Self {
            items: Arc::new(items),
            deep,
        }
    }

    pub(crate) fn into_items(self) -> Set {
        Arc::try_unwrap(self.items).unwrap_or_else(|shared| (*shared).clone())
    }

    pub fn contains(&self, item: &Value) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn is_subset(&self, other: &FrozenSet) -> bool {
        self.items.is_subset(&*other.items)
    }

    pub fn is_disjoint(&self, other: &FrozenSet) -> bool {
        self.items.is_disjoint(&*other.items)
    }

    pub fn is_deeply_frozen(&self) -> bool {
        self.deep
    }

    pub fn ptr_eq(&self, other: &FrozenSet) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<'a> IntoIterator for &'a FrozenSet {
    type Item = &'a Value;
    type IntoIter = indexmap::set::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for FrozenSet {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.items == *other.items
    }
}

impl Eq for FrozenSet {}

impl Hash for FrozenSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        unordered_hash(self.items.iter()).hash(state);
    }
}

impl fmt::Debug for FrozenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FrozenSet").field(&*self.items).finish()
    }
}

impl fmt::Display for FrozenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return write!(f, "frozenset()");
        }
        write!(f, "frozenset({{")?;
        write_joined(f, self.items.iter())?;
        write!(f, "}})")
    }
}

impl Serialize for FrozenSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in self.items.iter() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}
