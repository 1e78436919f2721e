use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::Equivalent;

use super::Value;
use crate::error::{Error, Result};
use crate::frozen::{FrozenSet, FrozenValue};

/// Mapping key
///
/// Keys are hashable scalars or hashable frozen containers (frozen sets and
/// frozen sequences of hashable items). Floats are excluded; string keys are
/// the common case and can be looked up with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Frozen(FrozenValue),
}

impl Key {
    /// The key as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            _ => None,
        }
    }
}

// `Key::Str` hashes exactly like `str` so that `&str` lookups work through
// `Equivalent`.
impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Key::Null => ().hash(state),
            Key::Bool(b) => b.hash(state),
            Key::Int(i) => i.hash(state),
            Key::Str(s) => s.as_str().hash(state),
            Key::Frozen(frozen) => frozen.hash(state),
        }
    }
}

impl Equivalent<Key> for str {
    fn equivalent(&self, key: &Key) -> bool {
        matches!(key, Key::Str(s) if s == self)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => write!(f, "None"),
            Key::Bool(true) => write!(f, "True"),
            Key::Bool(false) => write!(f, "False"),
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
            Key::Frozen(frozen) => write!(f, "{}", frozen),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl From<FrozenSet> for Key {
    fn from(set: FrozenSet) -> Self {
        Key::Frozen(FrozenValue::Set(set))
    }
}

impl TryFrom<FrozenValue> for Key {
    type Error = Error;

    fn try_from(frozen: FrozenValue) -> Result<Self> {
        if !frozen.is_hashable() {
            return Err(Error::type_conversion(format!(
                "{} is not hashable and cannot be a mapping key",
                frozen.kind_name()
            )));
        }
        Ok(Key::Frozen(frozen))
    }
}

impl TryFrom<Value> for Key {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Key::Null),
            Value::Bool(b) => Ok(Key::Bool(b)),
            Value::Int(i) => Ok(Key::Int(i)),
            Value::Str(s) => Ok(Key::Str(s)),
            Value::Frozen(frozen) => Key::try_from(frozen),
            other => Err(Error::type_conversion(format!(
                "{} cannot be a mapping key",
                other.kind_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freezer::freeze;
    use indexmap::IndexMap;

    #[test]
    fn test_str_lookup_matches_string_key() {
        let mut map: IndexMap<Key, i32> = IndexMap::new();
        map.insert(Key::from("console"), 1);
        map.insert(Key::Int(7), 2);
        assert_eq!(map.get("console"), Some(&1));
        assert_eq!(map.get(&Key::Int(7)), Some(&2));
        assert_eq!(map.get("7"), None);
    }

    #[test]
    fn test_frozen_container_keys() {
        let pair = freeze(Value::sequence([1, 2]), true).unwrap();
        let key = Key::try_from(pair.clone()).unwrap();
        let mut map: IndexMap<Key, i32> = IndexMap::new();
        map.insert(key.clone(), 1);
        assert_eq!(map.get(&Key::try_from(pair).unwrap()), Some(&1));
        assert_eq!(key.to_string(), "(1, 2)");
    }

    #[test]
    fn test_unhashable_keys_rejected() {
        let nested = freeze(Value::mapping([("a", 1)]), true).unwrap();
        assert!(matches!(Key::try_from(nested), Err(Error::TypeConversion { .. })));
        assert!(matches!(
            Key::try_from(Value::sequence([1])),
            Err(Error::TypeConversion { .. })
        ));
        assert!(matches!(Key::try_from(Value::Float(1.5)), Err(Error::TypeConversion { .. })));
    }
}
