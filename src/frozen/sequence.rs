use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::value::display::write_joined;
use crate::value::Value;

/// Fixed-length ordered sequence
///
/// Dereferences to a shared `[Value]` slice, so the whole read-only slice
/// API (indexing, `iter`, `first`, `contains`) is available.
#[derive(Clone)]
pub struct FrozenSequence {
    items: Arc<[Value]>,
    deep: bool,
    hashable: bool,
}

impl FrozenSequence {
    pub(crate) fn from_items(items: Vec<Value>) -> Self {
        let deep = items.iter().all(Value::is_deeply_frozen);
        let hashable = items.iter().all(Value::is_hashable);
        Self {
            items: items.into(),
            deep,
            hashable,
        }
    }

    pub(crate) fn into_items(self) -> Vec<Value> {
        self.items.to_vec()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn is_deeply_frozen(&self) -> bool {
        self.deep
    }

    /// Check that every item may be stored in a frozen set
    pub fn is_hashable(&self) -> bool {
        self.hashable
    }

    pub fn ptr_eq(&self, other: &FrozenSequence) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl Deref for FrozenSequence {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a FrozenSequence {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl PartialEq for FrozenSequence {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.items == other.items
    }
}

impl Eq for FrozenSequence {}

impl Hash for FrozenSequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl fmt::Debug for FrozenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FrozenSequence").field(&&*self.items).finish()
    }
}

impl fmt::Display for FrozenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_joined(f, self.items.iter())?;
        if self.items.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

impl Serialize for FrozenSequence {
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
