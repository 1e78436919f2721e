//! Named object construction
//!
//! The builder takes a top-level mapping, freezes every entry, and promotes
//! the selected entries to attributes of a `NamedObject`.
//!
//! # Clone policy
//!
//! With `clone` set (the default) the builder freezes a deep copy and the
//! caller's mapping is left exactly as it was. With `clone` unset the builder
//! works on the caller's mapping directly: each top-level value is moved out,
//! frozen, and a handle to the frozen value is written back into the same
//! slot. After the call the source holds frozen values where it used to hold
//! mutable containers. The `&mut` borrow guarantees nobody else can observe
//! the source during the call; copies taken before the call are independent
//! of the frozen result, and writes through them never show up in it.
//! `build_owned` consumes the source outright.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::freezer::Freezer;
use crate::frozen::{FrozenMapping, FrozenValue};
use crate::named::{
    make_named_object, validate_attribute_name, validate_identifier, NamedObject,
};
use crate::value::{Key, Mapping, Value};

/// Predicate deciding which top-level entries become attributes
/// when only constants are promoted
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstPolicy {
    /// Keys with at least one upper-case letter and no lower-case ones,
    /// such as `DEBUG` or `MAX_RETRIES`
    UpperCase,
    /// Entries whose value is a scalar
    Scalars,
    /// Caller-supplied predicate over the key and the frozen value
    #[serde(skip)]
    Custom(Arc<dyn Fn(&str, &Value) -> bool + Send + Sync>),
}

impl ConstPolicy {
    pub fn custom(predicate: impl Fn(&str, &Value) -> bool + Send + Sync + 'static) -> Self {
        ConstPolicy::Custom(Arc::new(predicate))
    }

    /// Check whether the entry `key` → `value` is a constant
    pub fn accepts(&self, key: &str, value: &Value) -> bool {
        match self {
            ConstPolicy::UpperCase => {
                key.chars().any(char::is_uppercase) && !key.chars().any(char::is_lowercase)
            }
            ConstPolicy::Scalars => value.is_scalar(),
            ConstPolicy::Custom(predicate) => predicate(key, value),
        }
    }
}

impl fmt::Debug for ConstPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstPolicy::UpperCase => write!(f, "UpperCase"),
            ConstPolicy::Scalars => write!(f, "Scalars"),
            ConstPolicy::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Options for building a named object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Promote only entries accepted by `const_policy`
    pub only_const: bool,
    pub const_policy: Option<ConstPolicy>,
    /// Freeze nested containers, not just the top-level values
    pub recursive: bool,
    /// Freeze a deep copy instead of consuming the source in place
    pub clone: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            only_const: false,
            const_policy: None,
            recursive: true,
            clone: true,
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promote only the entries accepted by `policy`
    pub fn with_only_const(mut self, policy: ConstPolicy) -> Self {
        self.only_const = true;
        self.const_policy = Some(policy);
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_clone(mut self, clone: bool) -> Self {
        self.clone = clone;
        self
    }

    /// Read options from a JSON object such as
    /// `{"only_const": true, "const_policy": "upper_case", "clone": false}`
    pub fn from_json(text: &str) -> Result<Self> {
        let options: BuildOptions =
            serde_json::from_str(text).map_err(|e| Error::invalid_options(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.only_const && self.const_policy.is_none() {
            return Err(Error::invalid_options(
                "only_const requires a const_policy",
            ));
        }
        Ok(())
    }

    /// Whether promotion can be decided before the values are frozen
    ///
    /// Only a custom predicate looks at the frozen value itself.
    fn names_known_before_freeze(&self) -> bool {
        !self.only_const || !matches!(self.const_policy, Some(ConstPolicy::Custom(_)))
    }

    /// Attribute name for `key`, if the entry gets promoted
    fn promoted_name<'a>(&self, key: &'a Key, value: &Value) -> Result<Option<&'a str>> {
        match (key, self.only_const, &self.const_policy) {
            (Key::Str(name), false, _) => Ok(Some(name.as_str())),
            (other, false, _) => Err(Error::name_conflict(
                other.to_string(),
                "attribute names must be strings",
            )),
            (Key::Str(name), true, Some(policy)) if policy.accepts(name, value) => {
                Ok(Some(name.as_str()))
            }
            _ => Ok(None),
        }
    }
}

/// Freezes top-level mappings into named objects
#[derive(Debug, Clone)]
pub struct Builder {
    options: BuildOptions,
    freezer: Freezer,
}

impl Builder {
    pub fn new(options: BuildOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            freezer: Freezer::new(options.recursive),
            options,
        })
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build a named object from the mapping in `source`
    ///
    /// See the module documentation for how `clone` affects `source`. Type
    /// errors and invalid names are detected before anything is moved, so a
    /// failed in-place build leaves `source` untouched. The one exception is
    /// a custom `ConstPolicy`, whose attribute names are only known once the
    /// entries have been frozen.
    pub fn build(&self, name: &str, source: &mut Value) -> Result<NamedObject> {
        validate_identifier(name)?;
        let items = match source {
            // Cloning a mapping copies every mutable container below it
            Value::Mapping(entries) if self.options.clone => self.freeze_entries(entries.clone())?,
            Value::Mapping(entries) => self.freeze_in_place(entries)?,
            Value::Frozen(FrozenValue::Mapping(map)) => {
                self.freeze_entries(map.clone().into_entries())?
            }
            other => {
                return Err(Error::InputType {
                    expected: "mapping",
                    found: other.kind_name(),
                })
            }
        };
        self.promote(name, items)
    }

    /// Build a named object, taking ownership of `source`
    pub fn build_owned(&self, name: &str, source: Value) -> Result<NamedObject> {
        validate_identifier(name)?;
        let items = match source {
            Value::Mapping(entries) => self.freeze_entries(entries)?,
            Value::Frozen(FrozenValue::Mapping(map)) => self.freeze_entries(map.into_entries())?,
            other => {
                return Err(Error::InputType {
                    expected: "mapping",
                    found: other.kind_name(),
                })
            }
        };
        self.promote(name, items)
    }

    fn freeze_entries(&self, entries: Mapping) -> Result<FrozenMapping> {
        let entries = entries
            .into_iter()
            .map(|(key, value)| Ok((key, self.freezer.freeze(value)?)))
            .collect::<Result<Mapping>>()?;
        Ok(FrozenMapping::from_entries(entries))
    }

    fn freeze_in_place(&self, entries: &mut Mapping) -> Result<FrozenMapping> {
        let names_known = self.options.names_known_before_freeze();
        for (key, value) in entries.iter() {
            self.freezer.check(value)?;
            if names_known {
                if let Some(attr) = self.options.promoted_name(key, value)? {
                    validate_attribute_name(attr)?;
                }
            }
        }
        let mut frozen = Mapping::with_capacity(entries.len());
        for (key, slot) in entries.iter_mut() {
            let value = self.freezer.freeze(std::mem::take(slot))?;
            *slot = value.clone();
            frozen.insert(key.clone(), value);
        }
        Ok(FrozenMapping::from_entries(frozen))
    }

    fn promote(&self, name: &str, items: FrozenMapping) -> Result<NamedObject> {
        let mut attributes = IndexMap::with_capacity(items.len());
        for (key, value) in items.iter() {
            if let Some(attr) = self.options.promoted_name(key, value)? {
                attributes.insert(attr.to_string(), value.clone());
            }
        }
        log::debug!(
            "Building {}: {} of {} entries promoted (recursive={}, clone={})",
            name,
            attributes.len(),
            items.len(),
            self.options.recursive,
            self.options.clone
        );
        if !items.is_deeply_frozen() {
            log::debug!("{} still reaches mutable containers after a shallow freeze", name);
        }
        Ok(make_named_object(name, attributes)?.with_items(items))
    }
}

/// Build a named object with explicit options
pub fn build(name: &str, source: &mut Value, options: &BuildOptions) -> Result<NamedObject> {
    Builder::new(options.clone())?.build(name, source)
}

/// Build a named object from flag arguments
///
/// `only_const` promotes upper-case keys only; use `BuildOptions` with a
/// `ConstPolicy` to choose another predicate.
pub fn build_named(
    name: &str,
    source: &mut Value,
    only_const: bool,
    recursive: bool,
    clone: bool,
) -> Result<NamedObject> {
    let mut options = BuildOptions::new()
        .with_recursive(recursive)
        .with_clone(clone);
    if only_const {
        options = options.with_only_const(ConstPolicy::UpperCase);
    }
    Builder::new(options)?.build(name, source)
}
