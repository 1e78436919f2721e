//! Source values
//!
//! `Value` is the dynamically-typed tree a caller builds before freezing:
//! scalars, ordered mappings, sequences, sets, plus already-frozen values and
//! opaque host values. The mutation helpers on `Value` are the only way to
//! write into a tree, and they refuse to touch frozen containers.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use indexmap::{Equivalent, IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::frozen::FrozenValue;

pub(crate) mod display;
mod json;
mod key;
mod opaque;

pub use key::Key;
pub use opaque::Opaque;

/// Ordered key-value container
pub type Mapping = IndexMap<Key, Value>;

/// Set of unique values; equality ignores insertion order
pub type Set = IndexSet<Value>;

/// A source value
///
/// Scalars are stored inline. Containers own their children, so cloning a
/// `Value` copies every mutable container it reaches. Frozen and opaque values
/// are shared handles and are never copied.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Mapping(Mapping),
    Sequence(Vec<Value>),
    Set(Set),
    /// A value that has already been frozen
    Frozen(FrozenValue),
    /// Host value assumed to be immutable; passed through without inspection
    Other(Opaque),
}

impl Value {
    /// Build a mapping value from key-value pairs, keeping their order
    pub fn mapping<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a sequence value
    pub fn sequence<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Build a set value; duplicate items collapse
    pub fn set<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    /// Wrap a host value as an opaque scalar
    pub fn opaque<T: std::any::Any + Send + Sync>(value: T) -> Self {
        Value::Other(Opaque::new(value))
    }

    /// Short name of the value's variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Mapping(_) => "mapping",
            Value::Sequence(_) => "sequence",
            Value::Set(_) => "set",
            Value::Frozen(frozen) => frozen.kind_name(),
            Value::Other(_) => "opaque",
        }
    }

    /// Check if this value is a scalar (null, bool, number or string)
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_)
        )
    }

    /// Check if this value is a mutable container
    pub fn is_mutable_container(&self) -> bool {
        matches!(self, Value::Mapping(_) | Value::Sequence(_) | Value::Set(_))
    }

    /// Check if this value is a frozen container
    pub fn is_frozen(&self) -> bool {
        matches!(self, Value::Frozen(_))
    }

    /// Check that no mutable container is reachable from this value
    pub fn is_deeply_frozen(&self) -> bool {
        match self {
            Value::Mapping(_) | Value::Sequence(_) | Value::Set(_) => false,
            Value::Frozen(frozen) => frozen.is_deeply_frozen(),
            _ => true,
        }
    }

    /// Check if this value may be stored in a frozen set
    ///
    /// Scalars, opaque values, frozen sets and frozen sequences of hashable
    /// items qualify. Mappings never do, and neither do mutable containers.
    pub fn is_hashable(&self) -> bool {
        match self {
            Value::Mapping(_) | Value::Sequence(_) | Value::Set(_) => false,
            Value::Frozen(frozen) => frozen.is_hashable(),
            _ => true,
        }
    }

    /// Independent copy sharing no mutable storage with `self`
    ///
    /// Frozen and opaque values are immutable and stay shared.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Look up a key in a mapping or frozen mapping
    pub fn get<Q>(&self, key: &Q) -> Option<&Value>
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        match self {
            Value::Mapping(map) => map.get(key),
            Value::Frozen(FrozenValue::Mapping(map)) => map.get(key),
            _ => None,
        }
    }

    /// Mutable access to an entry of a mutable mapping
    ///
    /// Frozen mappings never hand out mutable references.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut Value>
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        match self {
            Value::Mapping(map) => map.get_mut(key),
            _ => None,
        }
    }

    /// Item at `index` of a sequence or frozen sequence
    pub fn at(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Sequence(items) => items.get(index),
            Value::Frozen(FrozenValue::Sequence(items)) => items.get(index),
            _ => None,
        }
    }

    /// Membership test on a set or frozen set
    pub fn contains(&self, item: &Value) -> bool {
        match self {
            Value::Set(set) => set.contains(item),
            Value::Frozen(FrozenValue::Set(set)) => set.contains(item),
            _ => false,
        }
    }

    /// Number of entries of a container, `None` for scalars
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Mapping(map) => Some(map.len()),
            Value::Sequence(items) => Some(items.len()),
            Value::Set(set) => Some(set.len()),
            Value::Frozen(frozen) => Some(frozen.len()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_frozen(&self) -> Option<&FrozenValue> {
        match self {
            Value::Frozen(frozen) => Some(frozen),
            _ => None,
        }
    }

    /// Assign `value` to `key` in a mutable mapping
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Result<Option<Value>> {
        match self {
            Value::Mapping(map) => Ok(map.insert(key.into(), value.into())),
            Value::Frozen(frozen) => Err(frozen.mutation("assign item")),
            other => Err(Error::InputType {
                expected: "mapping",
                found: other.kind_name(),
            }),
        }
    }

    /// Remove `key` from a mutable mapping, keeping the order of the rest
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<Value>>
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        match self {
            Value::Mapping(map) => Ok(map.shift_remove(key)),
            Value::Frozen(frozen) => Err(frozen.mutation("delete item")),
            other => Err(Error::InputType {
                expected: "mapping",
                found: other.kind_name(),
            }),
        }
    }

    /// Append to a mutable sequence
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        match self {
            Value::Sequence(items) => {
                items.push(value.into());
                Ok(())
            }
            Value::Frozen(frozen) => Err(frozen.mutation("append")),
            other => Err(Error::InputType {
                expected: "sequence",
                found: other.kind_name(),
            }),
        }
    }

    /// Add to a mutable set; returns whether the item was new
    pub fn add(&mut self, value: impl Into<Value>) -> Result<bool> {
        match self {
            Value::Set(set) => Ok(set.insert(value.into())),
            Value::Frozen(frozen) => Err(frozen.mutation("add")),
            other => Err(Error::InputType {
                expected: "set",
                found: other.kind_name(),
            }),
        }
    }
}

/// Hash of an unordered collection: the wrapping sum of the item hashes
pub(crate) fn unordered_hash<'a>(items: impl Iterator<Item = &'a Value>) -> u64 {
    items
        .map(|item| {
            let mut hasher = DefaultHasher::new();
            item.hash(&mut hasher);
            hasher.finish()
        })
        .fold(0u64, u64::wrapping_add)
}

// Floats compare by bit pattern so that `Eq` and `Hash` agree; NaN equals
// itself and 0.0 differs from -0.0. Mutable and frozen containers never
// compare equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Frozen(a), Value::Frozen(b)) => a == b,
            (Value::Other(a), Value::Other(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            // Unhashable in the frozen model; length keeps Hash consistent with Eq
            Value::Mapping(map) => map.len().hash(state),
            Value::Sequence(items) => items.hash(state),
            Value::Set(set) => unordered_hash(set.iter()).hash(state),
            Value::Frozen(frozen) => frozen.hash(state),
            Value::Other(opaque) => opaque.hash(state),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl From<Set> for Value {
    fn from(set: Set) -> Self {
        Value::Set(set)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Null => Value::Null,
            Key::Bool(b) => Value::Bool(b),
            Key::Int(i) => Value::Int(i),
            Key::Str(s) => Value::Str(s),
            Key::Frozen(frozen) => Value::Frozen(frozen),
        }
    }
}

impl From<FrozenValue> for Value {
    fn from(frozen: FrozenValue) -> Self {
        Value::Frozen(frozen)
    }
}

impl From<Opaque> for Value {
    fn from(opaque: Opaque) -> Self {
        Value::Other(opaque)
    }
}
