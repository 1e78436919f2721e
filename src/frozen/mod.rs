//! Frozen values
//!
//! The immutable counterparts of the source containers. Each frozen container
//! is a cheap-to-clone `Arc` handle that exposes read accessors only, so any
//! attempt to write into one is rejected by the compiler. Through the dynamic
//! `Value` API the same attempt returns `Error::Mutation`.

use std::fmt;

use serde::ser::{Serialize, Serializer};

use crate::error::Error;

mod mapping;
mod sequence;
mod set;

pub use mapping::FrozenMapping;
pub use sequence::FrozenSequence;
pub use set::FrozenSet;

/// An immutable container produced by the freezer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrozenValue {
    Mapping(FrozenMapping),
    Sequence(FrozenSequence),
    Set(FrozenSet),
}

impl FrozenValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FrozenValue::Mapping(_) => "frozen mapping",
            FrozenValue::Sequence(_) => "frozen sequence",
            FrozenValue::Set(_) => "frozen set",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FrozenValue::Mapping(map) => map.len(),
            FrozenValue::Sequence(items) => items.len(),
            FrozenValue::Set(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that no mutable container is reachable through this value
    pub fn is_deeply_frozen(&self) -> bool {
        match self {
            FrozenValue::Mapping(map) => map.is_deeply_frozen(),
            FrozenValue::Sequence(items) => items.is_deeply_frozen(),
            FrozenValue::Set(set) => set.is_deeply_frozen(),
        }
    }

    /// Check if this value may be stored in a frozen set
    pub fn is_hashable(&self) -> bool {
        match self {
            FrozenValue::Mapping(_) => false,
            FrozenValue::Sequence(items) => items.is_hashable(),
            FrozenValue::Set(_) => true,
        }
    }

    /// Check whether two frozen values share the same storage
    pub fn ptr_eq(&self, other: &FrozenValue) -> bool {
        match (self, other) {
            (FrozenValue::Mapping(a), FrozenValue::Mapping(b)) => a.ptr_eq(b),
            (FrozenValue::Sequence(a), FrozenValue::Sequence(b)) => a.ptr_eq(b),
            (FrozenValue::Set(a), FrozenValue::Set(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn as_mapping(&self) -> Option<&FrozenMapping> {
        match self {
            FrozenValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&FrozenSequence> {
        match self {
            FrozenValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&FrozenSet> {
        match self {
            FrozenValue::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Error for an attempted write of kind `operation` into this value
    pub(crate) fn mutation(&self, operation: &'static str) -> Error {
        Error::Mutation {
            operation,
            kind: self.kind_name(),
        }
    }
}

impl From<FrozenMapping> for FrozenValue {
    fn from(map: FrozenMapping) -> Self {
        FrozenValue::Mapping(map)
    }
}

impl From<FrozenSequence> for FrozenValue {
    fn from(items: FrozenSequence) -> Self {
        FrozenValue::Sequence(items)
    }
}

impl From<FrozenSet> for FrozenValue {
    fn from(set: FrozenSet) -> Self {
        FrozenValue::Set(set)
    }
}

impl fmt::Display for FrozenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrozenValue::Mapping(map) => write!(f, "{}", map),
            FrozenValue::Sequence(items) => write!(f, "{}", items),
            FrozenValue::Set(set) => write!(f, "{}", set),
        }
    }
}

impl Serialize for FrozenValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FrozenValue::Mapping(map) => map.serialize(serializer),
            FrozenValue::Sequence(items) => items.serialize(serializer),
            FrozenValue::Set(set) => set.serialize(serializer),
        }
    }
}
