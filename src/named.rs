//! Named value objects
//!
//! A `NamedObject` is a read-only record: a type name plus an ordered set of
//! attributes bound to frozen values. It also carries the complete frozen
//! mapping it was built from, so entries that were not promoted to attributes
//! remain reachable by key.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::{Equivalent, IndexMap};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};
use crate::frozen::FrozenMapping;
use crate::value::{Key, Mapping, Value};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Check that `name` can be used as an attribute name
pub fn validate_attribute_name(name: &str) -> Result<()> {
    validate_identifier(name)?;
    if name.starts_with('_') {
        return Err(Error::name_conflict(
            name,
            "attribute names cannot start with an underscore",
        ));
    }
    Ok(())
}

pub(crate) fn validate_identifier(name: &str) -> Result<()> {
    if !IDENTIFIER.is_match(name) {
        return Err(Error::name_conflict(name, "not a valid identifier"));
    }
    Ok(())
}

/// Create a named object whose attributes are exactly `attributes`
///
/// The type name and every attribute name must be identifiers; attribute
/// names may not start with an underscore.
pub fn make_named_object(
    type_name: &str,
    attributes: IndexMap<String, Value>,
) -> Result<NamedObject> {
    validate_identifier(type_name)?;
    for name in attributes.keys() {
        validate_attribute_name(name)?;
    }
    let items: Mapping = attributes
        .iter()
        .map(|(name, value)| (Key::Str(name.clone()), value.clone()))
        .collect();
    Ok(NamedObject {
        type_name: Arc::from(type_name),
        attributes: Arc::new(attributes),
        items: FrozenMapping::from_entries(items),
    })
}

/// Read-only record with named attributes
#[derive(Debug, Clone, PartialEq)]
pub struct NamedObject {
    type_name: Arc<str>,
    attributes: Arc<IndexMap<String, Value>>,
    items: FrozenMapping,
}

impl NamedObject {
    /// Replace the backing mapping used for key lookups
    pub(crate) fn with_items(mut self, items: FrozenMapping) -> Self {
        self.items = items;
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Value of attribute `name`
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute names in definition order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn attributes(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Look up any top-level entry by key, promoted or not
    pub fn item<Q>(&self, key: &Q) -> Option<&Value>
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        self.items.get(key)
    }

    /// The complete frozen mapping behind this object
    pub fn mapping(&self) -> &FrozenMapping {
        &self.items
    }

    /// Check that no mutable container is reachable through any entry
    pub fn is_deeply_frozen(&self) -> bool {
        self.items.is_deeply_frozen()
    }

    /// Deserialize the attributes into a concrete record type
    pub fn record<T: DeserializeOwned>(&self) -> Result<T> {
        let json = serde_json::to_value(self)?;
        Ok(serde_json::from_value(json)?)
    }
}

impl Serialize for NamedObject {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.attributes.len()))?;
        for (name, value) in self.attributes.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for NamedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        for (i, (name, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}
