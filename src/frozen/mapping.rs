use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::Equivalent;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::display::write_entries;
use crate::value::{Key, Mapping, Value};

/// Read-only view of an ordered mapping
#[derive(Clone)]
pub struct FrozenMapping {
    entries: Arc<Mapping>,
    deep: bool,
}

impl FrozenMapping {
    /// Wrap entries whose values have already been through the freezer
    pub(crate) fn from_entries(entries: Mapping) -> Self {
        let deep = entries.values().all(Value::is_deeply_frozen);
        Self {
            entries: Arc::new(entries),
            deep,
        }
    }

    /// Take the entries back out, copying them if the storage is shared
    pub(crate) fn into_entries(self) -> Mapping {
        Arc::try_unwrap(self.entries).unwrap_or_else(|shared| (*shared).clone())
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&Value>
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        self.entries.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        self.entries.contains_key(key)
    }

    /// Entry at position `index` in insertion order
    pub fn get_index(&self, index: usize) -> Option<(&Key, &Value)> {
        self.entries.get_index(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }

    /// Borrow the underlying map for read-only use
    pub fn as_map(&self) -> &Mapping {
        &self.entries
    }

    /// Check that no mutable container is reachable through this mapping
    pub fn is_deeply_frozen(&self) -> bool {
        self.deep
    }

    pub fn ptr_eq(&self, other: &FrozenMapping) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<'a> IntoIterator for &'a FrozenMapping {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for FrozenMapping {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.entries == *other.entries
    }
}

impl Eq for FrozenMapping {}

// Mappings are never set elements; hashing the length keeps `Hash`
// consistent with the order-independent `Eq`.
impl Hash for FrozenMapping {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entries.len().hash(state);
    }
}

impl fmt::Debug for FrozenMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FrozenMapping").field(&*self.entries).finish()
    }
}

impl fmt::Display for FrozenMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mappingproxy({{")?;
        write_entries(f, self.iter())?;
        write!(f, "}})")
    }
}

impl Serialize for FrozenMapping {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
