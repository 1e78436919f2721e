//! Recursive freezing
//!
//! The freezer maps every source container to its immutable counterpart:
//! mappings become `FrozenMapping`, sequences become `FrozenSequence`, and
//! sets become `FrozenSet`. Scalars and opaque values pass through unchanged.
//! In recursive mode children are frozen before their parent is built from
//! them; in shallow mode only the outermost container is converted.
//!
//! The owned entry points consume their input and move its parts into the
//! new frozen containers. The borrowed entry points copy first, so the
//! caller's tree is never modified.

use crate::error::{Error, Result};
use crate::frozen::{FrozenMapping, FrozenSequence, FrozenSet, FrozenValue};
use crate::value::{Mapping, Set, Value};

/// Converts source values into frozen values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freezer {
    recursive: bool,
}

impl Default for Freezer {
    fn default() -> Self {
        Self::deep()
    }
}

impl Freezer {
    pub fn new(recursive: bool) -> Self {
        Self { recursive }
    }

    /// Freezer that converts every nested container
    pub fn deep() -> Self {
        Self::new(true)
    }

    /// Freezer that converts only the outermost container
    pub fn shallow() -> Self {
        Self::new(false)
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Freeze an owned value
    ///
    /// Re-freezing a frozen value returns the same handle, unless this is a
    /// recursive freezer and the value was frozen shallowly; then the mutable
    /// children left behind are frozen too.
    pub fn freeze(&self, value: Value) -> Result<Value> {
        match value {
            Value::Mapping(entries) => Ok(Value::Frozen(self.freeze_mapping(entries)?.into())),
            Value::Sequence(items) => Ok(Value::Frozen(self.freeze_sequence(items)?.into())),
            Value::Set(items) => Ok(Value::Frozen(self.freeze_set(items)?.into())),
            Value::Frozen(frozen) => Ok(Value::Frozen(self.refreeze(frozen)?)),
            scalar => Ok(scalar),
        }
    }

    /// Freeze a copy of `value`, leaving the original untouched
    pub fn freeze_ref(&self, value: &Value) -> Result<Value> {
        self.freeze(value.deep_copy())
    }

    pub fn freeze_mapping(&self, entries: Mapping) -> Result<FrozenMapping> {
        log::trace!("Freezing mapping with {} entries", entries.len());
        let entries = entries
            .into_iter()
            .map(|(key, value)| Ok((key, self.freeze_child(value)?)))
            .collect::<Result<Mapping>>()?;
        Ok(FrozenMapping::from_entries(entries))
    }

    pub fn freeze_sequence(&self, items: Vec<Value>) -> Result<FrozenSequence> {
        log::trace!("Freezing sequence of length {}", items.len());
        let items = items
            .into_iter()
            .map(|item| self.freeze_child(item))
            .collect::<Result<Vec<_>>>()?;
        Ok(FrozenSequence::from_items(items))
    }

    /// Freeze a set; every item must be hashable once frozen
    pub fn freeze_set(&self, items: Set) -> Result<FrozenSet> {
        log::trace!("Freezing set of {} items", items.len());
        let mut frozen = Set::with_capacity(items.len());
        for item in items {
            let kind = item.kind_name();
            let item = self.freeze_child(item)?;
            if !item.is_hashable() {
                return Err(unhashable(kind));
            }
            frozen.insert(item);
        }
        Ok(FrozenSet::from_items(frozen))
    }

    /// Check that freezing `value` would succeed, without copying or moving it
    pub fn check(&self, value: &Value) -> Result<()> {
        match value {
            Value::Mapping(entries) => self.check_children(entries.values()),
            Value::Sequence(items) => self.check_children(items.iter()),
            Value::Set(items) => {
                for item in items {
                    if self.recursive {
                        self.check(item)?;
                    }
                    if !self.hashable_after_freeze(item) {
                        return Err(unhashable(item.kind_name()));
                    }
                }
                Ok(())
            }
            Value::Frozen(frozen) if self.recursive && !frozen.is_deeply_frozen() => match frozen {
                FrozenValue::Mapping(map) => self.check_children(map.values()),
                FrozenValue::Sequence(items) => self.check_children(items.iter()),
                // Set items are hashable, and hashable values hold no mutable containers
                FrozenValue::Set(_) => Ok(()),
            },
            _ => Ok(()),
        }
    }

    fn check_children<'a>(&self, children: impl Iterator<Item = &'a Value>) -> Result<()> {
        if !self.recursive {
            return Ok(());
        }
        for child in children {
            self.check(child)?;
        }
        Ok(())
    }

    fn hashable_after_freeze(&self, value: &Value) -> bool {
        if !self.recursive {
            return value.is_hashable();
        }
        match value {
            Value::Mapping(_) => false,
            Value::Sequence(items) => items.iter().all(|item| self.hashable_after_freeze(item)),
            Value::Set(_) => true,
            Value::Frozen(FrozenValue::Sequence(items)) => {
                items.iter().all(|item| self.hashable_after_freeze(item))
            }
            other => other.is_hashable(),
        }
    }

    fn freeze_child(&self, value: Value) -> Result<Value> {
        if self.recursive {
            self.freeze(value)
        } else {
            Ok(value)
        }
    }

    fn refreeze(&self, frozen: FrozenValue) -> Result<FrozenValue> {
        if !self.recursive || frozen.is_deeply_frozen() {
            return Ok(frozen);
        }
        log::trace!("Deepening shallow {}", frozen.kind_name());
        Ok(match frozen {
            FrozenValue::Mapping(map) => self.freeze_mapping(map.into_entries())?.into(),
            FrozenValue::Sequence(items) => self.freeze_sequence(items.into_items())?.into(),
            FrozenValue::Set(set) => self.freeze_set(set.into_items())?.into(),
        })
    }
}

fn unhashable(kind: &str) -> Error {
    Error::type_conversion(format!("set element of kind {} is not hashable", kind))
}

/// Freeze an owned value
pub fn freeze(value: Value, recursive: bool) -> Result<Value> {
    Freezer::new(recursive).freeze(value)
}

/// Freeze a copy of a mapping
pub fn freeze_mapping(source: &Mapping, recursive: bool) -> Result<FrozenMapping> {
    Freezer::new(recursive).freeze_mapping(source.clone())
}

/// Freeze a copy of a sequence
pub fn freeze_sequence(source: &[Value], recursive: bool) -> Result<FrozenSequence> {
    Freezer::new(recursive).freeze_sequence(source.to_vec())
}

/// Freeze a copy of a set
pub fn freeze_set(source: &Set, recursive: bool) -> Result<FrozenSet> {
    Freezer::new(recursive).freeze_set(source.clone())
}
