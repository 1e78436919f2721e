//! deepfreeze: one-shot deep freezing of nested configuration values
//!
//! This library converts a mutable tree of mappings, sequences, sets and
//! scalars into an immutable equivalent, and optionally wraps the top-level
//! entries of a mapping in a `NamedObject` with read-only attributes.
//!
//! ```
//! use deepfreeze::{build_named, Value};
//!
//! let mut source = Value::mapping([("a", Value::mapping([("b", Value::sequence([1, 2, 3]))]))]);
//! let config = build_named("Config", &mut source, false, true, true).unwrap();
//!
//! let b = config.attr("a").unwrap().get("b").unwrap();
//! assert_eq!(b.to_string(), "(1, 2, 3)");
//! assert!(config.is_deeply_frozen());
//! ```
//!
//! Frozen containers expose no mutators. Writes through the dynamic `Value`
//! API fail with `Error::Mutation`. Opaque values (`Value::Other`) are passed
//! through as-is and are trusted to be immutable.

pub mod builder;
pub mod error;
pub mod freezer;
pub mod frozen;
pub mod named;
pub mod value;

pub use builder::{build, build_named, BuildOptions, Builder, ConstPolicy};
pub use error::{Error, Result};
pub use freezer::{freeze, freeze_mapping, freeze_sequence, freeze_set, Freezer};
pub use frozen::{FrozenMapping, FrozenSequence, FrozenSet, FrozenValue};
pub use named::{make_named_object, validate_attribute_name, NamedObject};
pub use value::{Key, Mapping, Opaque, Set, Value};
